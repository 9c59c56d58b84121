//! Finds the sites where a query matches.
//!
//! - Full scan: regex over the boundary, used when there is no previous result
//!   set to refine.
//! - Cache filter: checks only the last typed character at every cached site,
//!   so narrowing a literal query costs O(sites) instead of O(document).
//!   A regex query is rescanned and kept to the cached sites.

use super::boundaries::Boundaries;
use super::query::SearchQuery;
use crate::kernel::error::Result;
use crate::models::{chars_equal, Document};
use rustc_hash::FxHashSet;
use std::time::Instant;

/// Sorted offsets where `query` matches inside `boundaries`. A non-empty
/// `cache` holds the previous results and is filtered instead of rescanned.
pub fn find_matching_sites(
    doc: &Document,
    query: &SearchQuery,
    boundaries: &dyn Boundaries,
    cache: &[usize],
) -> Result<Vec<usize>> {
    let started = Instant::now();

    let mut sites = if cache.is_empty() {
        scan(doc, query, boundaries)?
    } else {
        match query {
            SearchQuery::Literal(text) => filter_cache(doc, cache, text),
            SearchQuery::RegularExpression(_) => {
                let cached: FxHashSet<usize> = cache.iter().copied().collect();
                scan(doc, query, boundaries)?
                    .into_iter()
                    .filter(|offset| cached.contains(offset))
                    .collect()
            }
        }
    };
    sites.sort_unstable();
    sites.dedup();

    tracing::debug!(
        sites = sites.len(),
        cached = !cache.is_empty(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "scanned for matching sites"
    );
    Ok(sites)
}

/// True if the last character of `query` sits where it should for a match
/// starting at `offset`.
pub fn last_char_matches(doc: &Document, offset: usize, query: &str) -> bool {
    let Some(last) = query.chars().last() else {
        return false;
    };
    let end = offset + query.chars().count() - 1;
    doc.char_at(end)
        .is_some_and(|ch| chars_equal(ch, last, last.is_lowercase()))
}

fn filter_cache(doc: &Document, cache: &[usize], query: &str) -> Vec<usize> {
    cache
        .iter()
        .copied()
        .filter(|&offset| last_char_matches(doc, offset, query))
        .collect()
}

fn scan(doc: &Document, query: &SearchQuery, boundaries: &dyn Boundaries) -> Result<Vec<usize>> {
    if let SearchQuery::Literal(text) = query {
        if text.is_empty() {
            return Ok(Vec::new());
        }
    }

    let regex = query.to_regex()?;
    let range = boundaries.offset_range(doc);
    let (first, last) = (*range.start(), *range.end());
    let len = doc.len_chars();
    if first > len || first > last {
        return Ok(Vec::new());
    }

    let rope = doc.rope();
    let text = doc.text();
    let overlapping = !query.is_regex();
    let mut sites = Vec::new();
    let mut byte_pos = rope.char_to_byte(first);

    while byte_pos <= text.len() {
        let Some(m) = regex.find_at(&text, byte_pos) else {
            break;
        };
        let offset = rope.byte_to_char(m.start());
        if offset > last {
            break;
        }
        if boundaries.is_offset_inside(doc, offset) && !doc.is_folded(offset) {
            sites.push(offset);
        }

        // Literal matches may overlap ("aa" in "aaa"), regex matches may not.
        byte_pos = if overlapping || m.end() == m.start() {
            m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8)
        } else {
            m.end()
        };
    }

    Ok(sites)
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/jump/scanner.rs"]
mod tests;
