//! Tag lifecycle for one session.
//!
//! Keeps the tag ↔ offset assignment, decides on every keystroke whether the
//! query completes a tag, and otherwise extends the assignment through the
//! solver while leaving compatible tags where they are.

use super::layout::TagAlphabet;
use super::query::SearchQuery;
use super::solver;
use super::tag_map::{Tag, TagMap};
use crate::models::{chars_equal, Document};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggingResult {
    /// The query completed the tag at this offset.
    Jump(usize),
    /// Tags of the current results, ascending by offset.
    Mark(Vec<(Tag, usize)>),
}

#[derive(Debug, Clone, Default)]
pub struct Tagger {
    tags: TagMap,
    full: bool,
}

impl Tagger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }

    /// True if the last marking round tagged every result.
    pub fn is_full(&self) -> bool {
        self.full
    }

    pub fn tags(&self) -> Vec<(Tag, usize)> {
        self.tags.sorted()
    }

    pub fn tag_at(&self, offset: usize) -> Option<&Tag> {
        self.tags.tag_at(offset)
    }

    /// Drops every tag so the next round assigns from scratch.
    pub fn unmark(&mut self) {
        self.tags.clear();
        self.full = false;
    }

    /// Jumps if `query` ends with a live tag typed after its plaintext,
    /// otherwise tags as many `results` as possible. Sites that cannot hold a
    /// tag are removed from `results`.
    pub fn mark_or_jump(
        &mut self,
        doc: &Document,
        alphabet: &TagAlphabet,
        query: &SearchQuery,
        results: &mut Vec<usize>,
    ) -> TaggingResult {
        let is_regex = query.is_regex();
        let query_text = normalize_query(query);

        if !is_regex {
            if let Some((tag, offset)) = self.find_completed_tag(doc, &query_text) {
                tracing::debug!(tag = %tag, offset, "query completed a tag");
                return TaggingResult::Jump(offset);
            }
            if query_text.chars().count() == 1 {
                results.retain(|&offset| admits_tag_at(doc, offset));
            }
        }

        if !is_regex || self.tags.is_empty() {
            self.tags = self.assign_and_merge(doc, alphabet, query, &query_text, results);
        }

        let marked: Vec<(Tag, usize)> = results
            .iter()
            .filter_map(|&offset| self.tags.tag_at(offset).map(|tag| (tag.clone(), offset)))
            .collect();
        self.full = marked.len() == results.len();

        tracing::debug!(
            results = results.len(),
            tagged = marked.len(),
            full = self.full,
            "marked results"
        );
        TaggingResult::Mark(marked)
    }

    /// True if some visible tag could still be completed by typing more of `query`.
    pub fn can_query_match_any_visible_tag(&self, doc: &Document, query: &str) -> bool {
        self.tags.iter().any(|(tag, offset)| {
            let portion = tag_portion(query, tag);
            !portion.is_empty()
                && starts_with_ignore_case(tag, portion)
                && is_tag_compatible_with_query(doc, tag, offset, query)
                && doc.is_visible(offset)
        })
    }

    pub fn is_query_compatible_with_tag_at(&self, doc: &Document, query: &str, offset: usize) -> bool {
        self.tags
            .tag_at(offset)
            .is_some_and(|tag| is_tag_compatible_with_query(doc, tag, offset, query))
    }

    fn find_completed_tag(&self, doc: &Document, query: &str) -> Option<(Tag, usize)> {
        self.tags.sorted().into_iter().find(|(tag, offset)| {
            ends_with_ignore_case(query, tag) && is_tag_compatible_with_query(doc, tag, *offset, query)
        })
    }

    fn assign_and_merge(
        &self,
        doc: &Document,
        alphabet: &TagAlphabet,
        query: &SearchQuery,
        query_text: &str,
        results: &[usize],
    ) -> TagMap {
        let result_set: FxHashSet<usize> = results.iter().copied().collect();
        let retained: Vec<(Tag, usize)> = self
            .tags
            .sorted()
            .into_iter()
            .filter(|(tag, offset)| {
                is_tag_compatible_with_query(doc, tag, *offset, query_text)
                    || result_set.contains(offset)
            })
            .collect();

        let retained_offsets: FxHashSet<usize> = retained.iter().map(|(_, offset)| *offset).collect();
        let vacant: Vec<usize> = results
            .iter()
            .copied()
            .filter(|offset| !retained_offsets.contains(offset))
            .collect();

        let available = self.available_tags(alphabet, query_text);
        let solved = solver::solve(doc, query, &vacant, results, &available, alphabet);

        let mut merged = retained;
        merged.extend(solved);
        compact_tags(&merged, query_text)
    }

    /// Tags the solver may hand out: not live already, not starting with the
    /// last typed character, and not extending a live one-key tag.
    fn available_tags(&self, alphabet: &TagAlphabet, query_text: &str) -> Vec<Tag> {
        let last = query_text.chars().last();
        let short: FxHashSet<char> = self
            .tags
            .iter()
            .filter(|(tag, _)| tag.chars().count() == 1)
            .filter_map(|(tag, _)| tag.chars().next())
            .collect();

        alphabet
            .all_tags()
            .iter()
            .filter(|tag| {
                let Some(first) = tag.chars().next() else {
                    return false;
                };
                !last.is_some_and(|c| chars_equal(c, first, true))
                    && !short.contains(&first)
                    && !self.tags.contains_tag(tag)
            })
            .cloned()
            .collect()
    }
}

/// Regex queries have no plaintext, so they are treated as a lone space.
fn normalize_query(query: &SearchQuery) -> String {
    if query.is_regex() {
        return " ".to_string();
    }
    let raw = query.raw_text();
    let mut chars = raw.chars();
    let mut text = String::with_capacity(raw.len());
    if let Some(first) = chars.next() {
        text.push(first);
    }
    text.extend(chars.flat_map(char::to_lowercase));
    text
}

/// Builds the tag map from `merged`, shrinking tags where possible. Entries
/// that would repeat a tag or an offset are dropped with a warning.
fn compact_tags(merged: &[(Tag, usize)], query: &str) -> TagMap {
    let mut tags = TagMap::with_capacity(merged.len());
    for (tag, offset) in merged {
        let tag = if can_compact(tag, merged, query) {
            tag.chars().take(1).collect()
        } else {
            tag.clone()
        };
        if !tags.insert(tag.clone(), *offset) {
            tracing::warn!(tag = %tag, offset, "dropped conflicting tag");
        }
    }
    tags
}

/// A two-key tag shrinks to its first key when no other tag shares that key
/// and the query does not already end with it.
fn can_compact(tag: &Tag, all: &[(Tag, usize)], query: &str) -> bool {
    let Some(first) = tag.chars().next() else {
        return false;
    };
    if tag.chars().count() < 2 {
        return false;
    }
    let query_ends = query.chars().last().is_some_and(|c| chars_equal(c, first, true))
        || ends_with_ignore_case(query, tag);
    if query_ends {
        return false;
    }
    !all
        .iter()
        .any(|(other, _)| other != tag && other.chars().next() == Some(first))
}

/// False for a site in the middle of a run of three identical
/// non-whitespace characters, where a tag would blend into the run.
pub fn admits_tag_at(doc: &Document, offset: usize) -> bool {
    if offset == 0 || offset + 1 >= doc.len_chars() {
        return true;
    }
    match (
        doc.char_at(offset - 1),
        doc.char_at(offset),
        doc.char_at(offset + 1),
    ) {
        (Some(prev), Some(ch), Some(next)) => prev != ch || ch != next || ch.is_whitespace(),
        _ => true,
    }
}

fn is_tag_compatible_with_query(doc: &Document, tag: &str, offset: usize, query: &str) -> bool {
    doc.matches_at(offset, plaintext_portion(query, tag), true)
}

/// The part of `query` typed before the tag.
fn plaintext_portion<'q>(query: &'q str, tag: &str) -> &'q str {
    if ends_with_ignore_case(query, tag) {
        drop_last_chars(query, tag.chars().count())
    } else if ends_with_first_char(query, tag) {
        drop_last_chars(query, 1)
    } else {
        query
    }
}

/// The part of `query` that selects the tag; empty if none of it does.
fn tag_portion<'q>(query: &'q str, tag: &str) -> &'q str {
    if ends_with_ignore_case(query, tag) {
        &query[drop_last_chars(query, tag.chars().count()).len()..]
    } else if ends_with_first_char(query, tag) {
        &query[drop_last_chars(query, 1).len()..]
    } else {
        ""
    }
}

fn ends_with_first_char(query: &str, tag: &str) -> bool {
    match (query.chars().last(), tag.chars().next()) {
        (Some(last), Some(first)) => chars_equal(last, first, true),
        _ => false,
    }
}

fn ends_with_ignore_case(text: &str, suffix: &str) -> bool {
    let n = suffix.chars().count();
    if text.chars().count() < n {
        return false;
    }
    text.chars()
        .rev()
        .zip(suffix.chars().rev())
        .all(|(a, b)| chars_equal(a, b, true))
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let n = prefix.chars().count();
    if text.chars().count() < n {
        return false;
    }
    text.chars().zip(prefix.chars()).all(|(a, b)| chars_equal(a, b, true))
}

fn drop_last_chars(text: &str, n: usize) -> &str {
    if n == 0 {
        return text;
    }
    text.char_indices()
        .rev()
        .nth(n - 1)
        .map_or("", |(idx, _)| &text[..idx])
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/jump/tagger.rs"]
mod tests;
