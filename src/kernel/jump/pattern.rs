use serde::{Deserialize, Serialize};

/// Predefined regex searches that tag structural positions instead of typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    LineStarts,
    LineEnds,
    LineIndents,
    LineAllMarks,
    AllWords,
}

const LINE_STARTS: &str = r"^.|^\n";
const LINE_ENDS: &str = r"\n|\z";
const LINE_INDENTS: &str = r"[^\s].*|^\n";
const ALL_WORDS: &str = r"\b[a-zA-Z0-9_]";

impl Pattern {
    pub fn regex(self) -> String {
        match self {
            Self::LineStarts => LINE_STARTS.to_string(),
            Self::LineEnds => LINE_ENDS.to_string(),
            Self::LineIndents => LINE_INDENTS.to_string(),
            Self::LineAllMarks => format!("{LINE_ENDS}|{LINE_STARTS}|{LINE_INDENTS}"),
            Self::AllWords => ALL_WORDS.to_string(),
        }
    }
}
