use crate::kernel::error::{JumpError, Result};
use crate::models::Document;
use regex::{Regex, RegexBuilder};

/// Current search query of a session.
///
/// A literal query whose first character is lowercase is case-insensitive as a
/// whole; typing an uppercase first character makes the search case-sensitive.
/// Build literals through [`SearchQuery::literal`] or [`SearchQuery::from_char`],
/// which never produce an empty query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Literal(String),
    RegularExpression(String),
}

impl SearchQuery {
    pub fn literal(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(JumpError::EmptyQuery);
        }
        Ok(Self::Literal(text))
    }

    pub fn from_char(ch: char) -> Self {
        Self::Literal(ch.to_string())
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::RegularExpression(pattern.into())
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, Self::RegularExpression(_))
    }

    /// Typed text; regex queries have none.
    pub fn raw_text(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::RegularExpression(_) => "",
        }
    }

    pub fn is_case_insensitive(&self) -> bool {
        match self {
            Self::Literal(text) => text.chars().next().is_some_and(char::is_lowercase),
            Self::RegularExpression(_) => true,
        }
    }

    pub fn to_regex(&self) -> Result<Regex> {
        let regex = match self {
            Self::Literal(text) => RegexBuilder::new(&regex::escape(text))
                .multi_line(true)
                .case_insensitive(self.is_case_insensitive())
                .build()?,
            Self::RegularExpression(pattern) => RegexBuilder::new(pattern)
                .multi_line(true)
                .case_insensitive(true)
                .build()?,
        };
        Ok(regex)
    }

    /// How many characters at `offset` count as matched. Regex matches have no
    /// query-dependent length and are highlighted as single-char markers.
    pub fn highlight_length(&self, doc: &Document, offset: usize) -> usize {
        match self {
            Self::Literal(text) => doc.count_matching_chars(offset, text),
            Self::RegularExpression(_) => 0,
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/jump/query.rs"]
mod tests;
