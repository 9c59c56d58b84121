use super::boundaries::Boundaries;
use super::query::SearchQuery;
use super::scanner::find_matching_sites;
use super::tagger::Tagger;
use crate::kernel::error::Result;
use crate::models::{chars_equal, is_word_part, Document};

/// Query and result set of one search, updated in place as characters are typed.
#[derive(Debug, Clone)]
pub struct SearchProcessor {
    query: SearchQuery,
    results: Vec<usize>,
}

impl SearchProcessor {
    pub fn from_char(doc: &Document, ch: char, boundaries: &dyn Boundaries) -> Result<Self> {
        Self::scan(doc, SearchQuery::from_char(ch), boundaries)
    }

    pub fn from_regex(doc: &Document, pattern: &str, boundaries: &dyn Boundaries) -> Result<Self> {
        Self::scan(doc, SearchQuery::regex(pattern), boundaries)
    }

    fn scan(doc: &Document, query: SearchQuery, boundaries: &dyn Boundaries) -> Result<Self> {
        let results = find_matching_sites(doc, &query, boundaries, &[])?;
        tracing::debug!(query = ?query, results = results.len(), "started search");
        Ok(Self { query, results })
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn results(&self) -> &[usize] {
        &self.results
    }

    /// Appends `ch` to the query and drops results that no longer match.
    ///
    /// Returns false, leaving everything unchanged, when the longer query
    /// neither continues any result nor selects any visible tag.
    pub fn type_char(&mut self, doc: &Document, ch: char, tagger: &mut Tagger) -> bool {
        let mut new_query = self.query.raw_text().to_string();
        new_query.push(ch);
        let len = new_query.chars().count();
        let can_match_tag = tagger.can_query_match_any_visible_tag(doc, &new_query);

        if len > 1 && !can_match_tag && !self.is_continuation(doc, &new_query) {
            tracing::debug!(query = %new_query, "rejected keystroke");
            return false;
        }

        // A word character after a non-word one starts a new search at the
        // start of every following word.
        let prev = new_query.chars().rev().nth(1);
        if !can_match_tag && prev.is_some_and(|p| !is_word_part(p)) && is_word_part(ch) {
            self.query = SearchQuery::from_char(ch);
            tagger.unmark();
            self.results = self
                .results
                .iter()
                .map(|&offset| offset + len - 1)
                .filter(|&moved| doc.char_at(moved).is_some_and(|c| chars_equal(c, ch, true)))
                .collect();
            tracing::debug!(results = self.results.len(), "restarted search at word boundary");
            return true;
        }

        self.remove_obsolete_results(doc, &new_query, tagger);
        self.query = SearchQuery::Literal(new_query);
        true
    }

    fn is_continuation(&self, doc: &Document, new_query: &str) -> bool {
        self.results
            .iter()
            .any(|&offset| doc.matches_at(offset, new_query, true))
    }

    fn remove_obsolete_results(&mut self, doc: &Document, new_query: &str, tagger: &Tagger) {
        let Some(last) = new_query.chars().last() else {
            return;
        };
        let last_offset = new_query.chars().count() - 1;
        let ignore_case = new_query.chars().next().is_some_and(char::is_lowercase);

        self.results.retain(|&offset| {
            let typed_matches = doc
                .char_at(offset + last_offset)
                .is_some_and(|c| chars_equal(c, last, ignore_case));
            typed_matches || tagger.is_query_compatible_with_tag_at(doc, new_query, offset)
        });
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/jump/processor.rs"]
mod tests;
