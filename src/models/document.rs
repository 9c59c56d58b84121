//! Read-only document snapshot used by a jump session.
//!
//! All offsets are char indices into the rope. The snapshot also carries the
//! bits of editor state the search core needs: caret, visible range and
//! collapsed (folded) regions.

use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use std::ops::Range;
use unicode_xid::UnicodeXID;

/// Borrows the slice as a `&str` when it lives in a single chunk, copies otherwise.
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

/// Identifier-part classifier used for every word decision in the crate.
#[inline]
pub fn is_word_part(ch: char) -> bool {
    ch == '$' || ch.is_xid_continue()
}

#[derive(Clone, Debug)]
pub struct Document {
    rope: Rope,
    caret: usize,
    viewport: Range<usize>,
    folds: Vec<Range<usize>>,
}

impl Document {
    pub fn new(rope: Rope) -> Self {
        let len = rope.len_chars();
        Self {
            rope,
            caret: 0,
            viewport: 0..len,
            folds: Vec::new(),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(Rope::from_str(text))
    }

    pub fn with_caret(mut self, caret: usize) -> Self {
        self.caret = caret.min(self.len_chars());
        self
    }

    /// Visible offsets, half-open. Clamped to the document.
    pub fn with_viewport(mut self, viewport: Range<usize>) -> Self {
        let len = self.len_chars();
        let start = viewport.start.min(len);
        self.viewport = start..viewport.end.clamp(start, len);
        self
    }

    pub fn with_folds(mut self, mut folds: Vec<Range<usize>>) -> Self {
        folds.retain(|r| r.start < r.end);
        folds.sort_by_key(|r| r.start);
        self.folds = folds;
        self
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn viewport(&self) -> Range<usize> {
        self.viewport.clone()
    }

    pub fn folds(&self) -> &[Range<usize>] {
        &self.folds
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.get_char(offset)
    }

    pub fn text(&self) -> Cow<'_, str> {
        slice_to_cow(self.rope.slice(..))
    }

    pub fn is_folded(&self, offset: usize) -> bool {
        let idx = self.folds.partition_point(|r| r.start <= offset);
        idx > 0 && self.folds[idx - 1].contains(&offset)
    }

    /// Inside the viewport and not hidden by a fold.
    pub fn is_visible(&self, offset: usize) -> bool {
        self.viewport.contains(&offset) && !self.is_folded(offset)
    }

    pub fn is_word_part_at(&self, offset: usize) -> bool {
        self.char_at(offset).is_some_and(is_word_part)
    }

    /// True if the text at `offset` starts with `other`.
    pub fn matches_at(&self, offset: usize, other: &str, ignore_case: bool) -> bool {
        let mut pos = offset;
        for expected in other.chars() {
            let Some(actual) = self.char_at(pos) else {
                return false;
            };
            if !chars_equal(actual, expected, ignore_case) {
                return false;
            }
            pos += 1;
        }
        true
    }

    /// Length of the case-insensitive common prefix of `other` and the text at `offset`.
    pub fn count_matching_chars(&self, offset: usize, other: &str) -> usize {
        let mut count = 0;
        for expected in other.chars() {
            match self.char_at(offset + count) {
                Some(actual) if chars_equal(actual, expected, true) => count += 1,
                _ => break,
            }
        }
        count
    }

    pub fn word_start(&self, pos: usize) -> usize {
        let mut start = pos;
        while start > 0 && self.is_word_part_at(start - 1) {
            start -= 1;
        }
        start
    }

    /// Index of the last character of the word containing `pos`.
    pub fn word_end(&self, pos: usize) -> usize {
        let len = self.len_chars();
        let mut end = pos;
        while end + 1 < len && self.is_word_part_at(end + 1) {
            end += 1;
        }
        end
    }

    /// Like [`Document::word_end`], then across the following non-word run and
    /// onto the first character of the next word.
    pub fn word_end_plus(&self, pos: usize) -> usize {
        let len = self.len_chars();
        let mut end = self.word_end(pos);
        while end + 1 < len && !self.is_word_part_at(end + 1) {
            end += 1;
        }
        if end + 1 < len && self.is_word_part_at(end + 1) {
            end += 1;
        }
        end
    }
}

pub fn chars_equal(a: char, b: char, ignore_case: bool) -> bool {
    if a == b {
        return true;
    }
    ignore_case && a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
#[path = "../../tests/unit/models/document.rs"]
mod tests;
