use std::io;

pub type Result<T> = std::result::Result<T, JumpError>;

#[derive(Debug)]
pub enum JumpError {
    EmptyQuery,
    InvalidRegex(regex::Error),
    Io(io::Error),
    Settings(serde_json::Error),
}

impl std::fmt::Display for JumpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JumpError::EmptyQuery => write!(f, "Literal query must not be empty"),
            JumpError::InvalidRegex(e) => write!(f, "Invalid regex: {}", e),
            JumpError::Io(e) => write!(f, "IO error: {}", e),
            JumpError::Settings(e) => write!(f, "Invalid settings: {}", e),
        }
    }
}

impl std::error::Error for JumpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JumpError::EmptyQuery => None,
            JumpError::InvalidRegex(e) => Some(e),
            JumpError::Io(e) => Some(e),
            JumpError::Settings(e) => Some(e),
        }
    }
}

impl From<io::Error> for JumpError {
    fn from(e: io::Error) -> Self {
        JumpError::Io(e)
    }
}

impl From<regex::Error> for JumpError {
    fn from(e: regex::Error) -> Self {
        JumpError::InvalidRegex(e)
    }
}

impl From<serde_json::Error> for JumpError {
    fn from(e: serde_json::Error) -> Self {
        JumpError::Settings(e)
    }
}
