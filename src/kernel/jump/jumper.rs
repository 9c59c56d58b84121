//! Caret placement once a tag is selected, and stepping between results.

use super::query::SearchQuery;
use crate::models::Document;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// What a jump does with the caret. Holding shift additionally selects from
/// the original caret position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpMode {
    /// No mode picked yet; jumps behave like [`JumpMode::Jump`].
    #[default]
    Disabled,
    /// Caret on the first character of the match.
    Jump,
    /// Caret after the word at the match, or after the matched query.
    JumpEnd,
    /// Like `JumpEnd`, and selects the word (or the matched query).
    Target,
}

impl fmt::Display for JumpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Disabled => "(Skip)",
            Self::Jump => "Jump",
            Self::JumpEnd => "Jump to End",
            Self::Target => "Target",
        };
        f.write_str(name)
    }
}

/// Current mode of a session, cycled through the configured order or toggled.
#[derive(Debug, Clone)]
pub struct JumpModeTracker {
    modes: Vec<JumpMode>,
    current: JumpMode,
    index: Option<usize>,
}

impl JumpModeTracker {
    /// `cycle_modes` is the cycling order; `Disabled` entries are skipped.
    pub fn new(cycle_modes: &[JumpMode]) -> Self {
        Self {
            modes: cycle_modes
                .iter()
                .copied()
                .filter(|mode| *mode != JumpMode::Disabled)
                .collect(),
            current: JumpMode::Disabled,
            index: None,
        }
    }

    pub fn current(&self) -> JumpMode {
        self.current
    }

    /// Moves to the next (or previous) configured mode, wrapping around. With
    /// a single configured mode this toggles it.
    pub fn cycle(&mut self, forward: bool) -> JumpMode {
        let n = self.modes.len();
        let next = match self.index {
            _ if n == 0 => None,
            None => Some(if forward { 0 } else { n - 1 }),
            Some(_) if n == 1 => None,
            Some(i) if forward => Some((i + 1) % n),
            Some(i) => Some((i + n - 1) % n),
        };
        self.index = next;
        self.current = next.map_or(JumpMode::Disabled, |i| self.modes[i]);
        self.current
    }

    /// Switches to `mode`, or back to `Disabled` if it is already active.
    pub fn toggle(&mut self, mode: JumpMode) -> JumpMode {
        if self.current == mode {
            self.current = JumpMode::Disabled;
            self.index = None;
        } else {
            self.current = mode;
            self.index = self.modes.iter().position(|m| *m == mode);
        }
        self.current
    }
}

/// Where the caret ends up, and what is selected afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Motion {
    pub caret: usize,
    pub selection: Option<Range<usize>>,
}

impl Motion {
    pub fn caret(offset: usize) -> Self {
        Self {
            caret: offset,
            selection: None,
        }
    }

    /// Selects between `from` and `to`, leaving the caret at `to`.
    pub fn select(from: usize, to: usize) -> Self {
        Self {
            caret: to,
            selection: Some(from.min(to)..from.max(to)),
        }
    }
}

/// Caret placement for `offset` under `mode`, without shift.
pub fn visit(doc: &Document, mode: JumpMode, query: &SearchQuery, offset: usize) -> Motion {
    if !matches!(mode, JumpMode::JumpEnd | JumpMode::Target) {
        return Motion::caret(offset);
    }

    // Regex matches have no typed text; the word at the site is the match.
    let matching = doc.count_matching_chars(offset, query.raw_text());
    let (target, inside_word) = if matching == 0 {
        (offset, doc.is_word_part_at(offset))
    } else {
        let target = offset + matching;
        let inside = doc.is_word_part_at(target - 1) && doc.is_word_part_at(target);
        (target, inside)
    };
    let end = if inside_word {
        doc.word_end(target) + 1
    } else {
        target
    };

    match mode {
        JumpMode::Target if inside_word => Motion::select(doc.word_start(target), end),
        JumpMode::Target => Motion::select(offset, end),
        _ => Motion::caret(end),
    }
}

/// Final caret placement for a selected tag. With `shift`, the selection
/// is extended from the caret position held before the jump.
pub fn jump(doc: &Document, mode: JumpMode, query: &SearchQuery, offset: usize, shift: bool) -> Motion {
    let motion = visit(doc, mode, query, offset);
    if !shift {
        return motion;
    }

    let old = doc.caret();
    match (mode, &motion.selection) {
        (JumpMode::Target, Some(selection)) => {
            let to = if motion.caret < old {
                selection.start
            } else {
                selection.end
            };
            Motion::select(old, to)
        }
        _ => Motion::select(old, motion.caret),
    }
}

/// First result after `from`, wrapping to the first one.
pub fn next_result(results: &[usize], from: usize) -> Option<usize> {
    if results.is_empty() {
        return None;
    }
    let index = match results.binary_search(&from) {
        Ok(i) => i + 1,
        Err(i) => i,
    };
    results.get(index).or(results.first()).copied()
}

/// Last result before `from`, wrapping to the last one.
pub fn previous_result(results: &[usize], from: usize) -> Option<usize> {
    let (Ok(i) | Err(i)) = results.binary_search(&from);
    i.checked_sub(1)
        .and_then(|index| results.get(index))
        .or(results.last())
        .copied()
}

/// Result nearest to `caret`, on either side.
pub fn closest_result(results: &[usize], caret: usize) -> Option<usize> {
    let (Ok(i) | Err(i)) = results.binary_search(&caret);
    let before = i.checked_sub(1).and_then(|index| results.get(index));
    let after = results.get(i);
    [before, after]
        .into_iter()
        .flatten()
        .copied()
        .min_by_key(|offset| offset.abs_diff(caret))
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/jump/jumper.rs"]
mod tests;
