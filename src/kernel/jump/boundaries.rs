use crate::models::Document;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// A (possibly disjoint) set of offsets that limits where sites are scanned.
pub trait Boundaries {
    /// First to last offset of the boundary. May include offsets for which
    /// [`Boundaries::is_offset_inside`] is false.
    fn offset_range(&self, doc: &Document) -> RangeInclusive<usize>;

    fn is_offset_inside(&self, doc: &Document, offset: usize) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardBoundaries {
    WholeFile,
    VisibleOnScreen,
    BeforeCaret,
    AfterCaret,
}

impl Boundaries for StandardBoundaries {
    fn offset_range(&self, doc: &Document) -> RangeInclusive<usize> {
        let len = doc.len_chars();
        match self {
            Self::WholeFile => 0..=len,
            Self::VisibleOnScreen => {
                let viewport = doc.viewport();
                viewport.start..=viewport.end
            }
            Self::BeforeCaret => 0..=doc.caret(),
            Self::AfterCaret => doc.caret()..=len.saturating_sub(1),
        }
    }

    fn is_offset_inside(&self, doc: &Document, offset: usize) -> bool {
        match self {
            Self::WholeFile => offset <= doc.len_chars(),
            Self::VisibleOnScreen => doc.is_visible(offset),
            Self::BeforeCaret => offset <= doc.caret(),
            Self::AfterCaret => offset >= doc.caret(),
        }
    }
}

/// Offsets inside both boundaries.
pub struct Intersection<'a> {
    first: &'a dyn Boundaries,
    second: &'a dyn Boundaries,
}

impl<'a> Intersection<'a> {
    pub fn new(first: &'a dyn Boundaries, second: &'a dyn Boundaries) -> Self {
        Self { first, second }
    }
}

impl Boundaries for Intersection<'_> {
    fn offset_range(&self, doc: &Document) -> RangeInclusive<usize> {
        let a = self.first.offset_range(doc);
        let b = self.second.offset_range(doc);
        (*a.start()).max(*b.start())..=(*a.end()).min(*b.end())
    }

    fn is_offset_inside(&self, doc: &Document, offset: usize) -> bool {
        self.first.is_offset_inside(doc, offset) && self.second.is_offset_inside(doc, offset)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/jump/boundaries.rs"]
mod tests;
