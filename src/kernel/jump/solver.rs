//! Tag assignment.
//!
//! Given the sites I of a document d and the tags T, find an injection from a
//! subset of T into I such that for every assigned pair (t, i), typing the
//! query and then t[0] can never spell the text following another site
//! i' != i. Maximize the number of tagged sites.
//!
//! The check is relaxed to word fragments: the lowercase prefixes of the text
//! from the last query character to the first character of the next word. A
//! first key `c` is allowed at site `i` iff no fragment of `i` followed by `c`
//! is a fragment of any site.
//!
//! Assignment is greedy: scarce tags (fewest eligible sites) are placed first,
//! each on its best free site. This is not a maximum bipartite matching.

use super::layout::{has_digit, TagAlphabet};
use super::query::SearchQuery;
use super::tag_map::Tag;
use crate::models::Document;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;

/// Assigns `available_tags` to `vacant` sites. Word fragments are collected
/// from every site in `results`, so new tags also avoid already tagged sites.
pub fn solve(
    doc: &Document,
    query: &SearchQuery,
    vacant: &[usize],
    results: &[usize],
    available_tags: &[Tag],
    alphabet: &TagAlphabet,
) -> Vec<(Tag, usize)> {
    if vacant.is_empty() || available_tags.is_empty() {
        return Vec::new();
    }
    let query_len = query.raw_text().chars().count().max(1);
    Solver::new(doc, query_len, vacant, results).assign(available_tags, alphabet)
}

struct Solver<'a> {
    doc: &'a Document,
    query_len: usize,
    results: &'a [usize],
    fragments: FxHashSet<String>,
}

impl<'a> Solver<'a> {
    /// `vacant` must be a subset of `results`.
    fn new(doc: &'a Document, query_len: usize, vacant: &'a [usize], results: &[usize]) -> Self {
        let mut solver = Self {
            doc,
            query_len,
            results: vacant,
            fragments: FxHashSet::default(),
        };
        let mut fragments = FxHashSet::default();
        for &site in results {
            solver.for_each_word_fragment(site, |fragment| {
                fragments.insert(fragment.to_string());
                true
            });
        }
        solver.fragments = fragments;
        solver
    }

    fn assign(&self, available_tags: &[Tag], alphabet: &TagAlphabet) -> Vec<(Tag, usize)> {
        let mut tags_by_first: FxHashMap<char, Vec<&Tag>> = FxHashMap::default();
        for tag in available_tags {
            if let Some(first) = tag.chars().next() {
                tags_by_first.entry(first).or_default().push(tag);
            }
        }

        // Tags sharing a first key share their eligible sites.
        let mut sites_by_first: FxHashMap<char, Vec<usize>> = FxHashMap::default();
        for &first in tags_by_first.keys() {
            let mut sites: Vec<usize> = self
                .results
                .iter()
                .copied()
                .filter(|&site| self.can_tag_begin_with_char(site, first))
                .collect();
            if sites.is_empty() {
                continue;
            }
            sites.sort_by(|&a, &b| self.compare_sites(a, b));
            sites_by_first.insert(first, sites);
        }

        let layout = alphabet.layout();
        let eligible = |tag: &Tag| {
            tag.chars()
                .next()
                .and_then(|first| sites_by_first.get(&first))
                .map_or(0, Vec::len)
        };
        let sort_key = |tag: &Tag| {
            let first = tag.chars().next().unwrap_or(' ');
            let last = tag.chars().last().unwrap_or(first);
            (
                has_digit(tag),
                eligible(tag),
                layout.distance_between_keys(first, last),
                layout.priority(first),
                layout.priority(last),
            )
        };
        let mut sorted: Vec<&Tag> = tags_by_first
            .values()
            .flatten()
            .copied()
            .filter(|tag| eligible(*tag) > 0)
            .collect();
        sorted.sort_by_cached_key(|tag| (sort_key(*tag), *tag));

        let mut assigned_sites: FxHashSet<usize> = FxHashSet::default();
        let mut assigned: Vec<(Tag, usize)> = Vec::new();
        for tag in sorted {
            if assigned.len() == self.results.len() {
                break;
            }
            let Some(sites) = tag.chars().next().and_then(|c| sites_by_first.get(&c)) else {
                continue;
            };
            if let Some(&site) = sites.iter().find(|s| !assigned_sites.contains(s)) {
                assigned_sites.insert(site);
                assigned.push((tag.clone(), site));
            }
        }

        tracing::debug!(
            sites = self.results.len(),
            tags = available_tags.len(),
            assigned = assigned.len(),
            "solved tag assignment"
        );
        assigned
    }

    /// Visible sites first, then word starts, then by offset.
    fn compare_sites(&self, a: usize, b: usize) -> Ordering {
        let key = |site: usize| {
            let hidden = !self.doc.is_visible(site);
            let mid_word = site > 0 && self.doc.is_word_part_at(site - 1);
            (hidden, mid_word, site)
        };
        key(a).cmp(&key(b))
    }

    fn can_tag_begin_with_char(&self, site: usize, ch: char) -> bool {
        let mut single = String::new();
        single.push(ch);
        if self.fragments.contains(&single) {
            return false;
        }

        let mut candidate = String::new();
        self.for_each_word_fragment(site, |fragment| {
            candidate.clear();
            candidate.push_str(fragment);
            candidate.push(ch);
            !self.fragments.contains(&candidate)
        })
    }

    /// Calls `visit` with each lowercase prefix of the text after the matched
    /// query. Stops early, returning false, once `visit` returns false.
    fn for_each_word_fragment(&self, site: usize, mut visit: impl FnMut(&str) -> bool) -> bool {
        let len = self.doc.len_chars();
        if len == 0 {
            return true;
        }
        let left = site + self.query_len - 1;
        let right = self.doc.word_end_plus(site).min(len - 1);
        if left > right {
            return true;
        }

        let mut fragment = String::with_capacity(1 + right - left);
        for offset in left..=right {
            let Some(ch) = self.doc.char_at(offset) else {
                break;
            };
            fragment.extend(ch.to_lowercase());
            if !visit(&fragment) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/jump/solver.rs"]
mod tests;
