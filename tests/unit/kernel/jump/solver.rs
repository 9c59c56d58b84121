use super::*;
use crate::kernel::jump::boundaries::StandardBoundaries;
use crate::kernel::jump::layout::KeyLayout;
use crate::kernel::jump::pattern::Pattern;
use crate::kernel::jump::scanner::find_matching_sites;

fn sites(doc: &Document, query: &SearchQuery) -> Vec<usize> {
    find_matching_sites(doc, query, &StandardBoundaries::WholeFile, &[]).unwrap()
}

fn lower(doc: &Document, from: usize, to: usize) -> String {
    (from..to)
        .filter_map(|i| doc.char_at(i))
        .flat_map(char::to_lowercase)
        .collect()
}

fn assert_bijection(assigned: &[(Tag, usize)]) {
    let tags: FxHashSet<&Tag> = assigned.iter().map(|(t, _)| t).collect();
    let offsets: FxHashSet<usize> = assigned.iter().map(|(_, o)| *o).collect();
    assert_eq!(tags.len(), assigned.len());
    assert_eq!(offsets.len(), assigned.len());
}

/// Typing the query plus a tag's first key never spells another site's text,
/// as far as both sites' word fragments reach.
fn assert_no_collision(doc: &Document, query_len: usize, results: &[usize], assigned: &[(Tag, usize)]) {
    for (tag, site) in assigned {
        let first = tag.chars().next().unwrap();
        for &other in results {
            if other == *site {
                continue;
            }
            let mut k = 0;
            while site + query_len + k <= doc.word_end_plus(*site) + 1
                && other + query_len + k <= doc.word_end_plus(other)
            {
                let mut typed = lower(doc, *site, site + query_len + k);
                typed.push(first);
                let target = lower(doc, other, other + query_len + k + 1);
                assert_ne!(typed, target, "tag {tag} at {site} collides with {other}");
                k += 1;
            }
        }
    }
}

#[test]
fn test_all_words_are_tagged() {
    let doc = Document::from_text("test word action");
    let query = SearchQuery::regex(Pattern::AllWords.regex());
    let results = sites(&doc, &query);
    let alphabet = TagAlphabet::default();

    let assigned = solve(&doc, &query, &results, &results, alphabet.all_tags(), &alphabet);

    assert_eq!(assigned.len(), 3);
    assert_bijection(&assigned);
    for (tag, _) in &assigned {
        let first = tag.chars().next().unwrap();
        assert!(!matches!(first, 't' | 'w' | 'a'), "tag {tag} starts like a word");
    }
}

#[test]
fn test_literal_assignment_avoids_collisions() {
    let text = "tree trunk truth trap tram stream strap tr";
    let doc = Document::from_text(text);
    let query = SearchQuery::literal("tr").unwrap();
    let results = sites(&doc, &query);
    let alphabet = TagAlphabet::new(KeyLayout::Qwerty, "aeiousmptrnhx");

    let assigned = solve(&doc, &query, &results, &results, alphabet.all_tags(), &alphabet);

    assert!(!assigned.is_empty());
    assert_bijection(&assigned);
    assert_no_collision(&doc, 2, &results, &assigned);
    for (tag, _) in &assigned {
        assert!(!tag.starts_with(['e', 'u', 'a']), "tag {tag} continues a word");
    }
}

#[test]
fn test_single_char_assignment_avoids_collisions() {
    let doc = Document::from_text("alpha beta gamma delta epsilon zeta eta theta iota kappa");
    let query = SearchQuery::from_char('a');
    let results = sites(&doc, &query);
    let alphabet = TagAlphabet::default();

    let assigned = solve(&doc, &query, &results, &results, alphabet.all_tags(), &alphabet);

    assert_eq!(assigned.len(), results.len());
    assert_bijection(&assigned);
    assert_no_collision(&doc, 1, &results, &assigned);
}

#[test]
fn test_visible_sites_come_first() {
    let doc = Document::from_text("xa xa xa xa").with_viewport(6..11);
    let query = SearchQuery::from_char('x');
    let results = sites(&doc, &query);
    let alphabet = TagAlphabet::new(KeyLayout::Qwerty, "f");

    let assigned = solve(&doc, &query, &results, &results, alphabet.all_tags(), &alphabet);

    assert_eq!(assigned, vec![(Tag::from("ff"), 6)]);
}

#[test]
fn test_word_starts_come_first() {
    let doc = Document::from_text("xaxa ax");
    let query = SearchQuery::from_char('a');
    let results = sites(&doc, &query);
    assert_eq!(results, vec![1, 3, 5]);
    let alphabet = TagAlphabet::new(KeyLayout::Qwerty, "f");

    let assigned = solve(&doc, &query, &results, &results, alphabet.all_tags(), &alphabet);

    assert_eq!(assigned, vec![(Tag::from("ff"), 5)]);
}

#[test]
fn test_digit_tags_are_used_last() {
    let doc = Document::from_text("k k k");
    let query = SearchQuery::from_char('k');
    let results = sites(&doc, &query);
    let alphabet = TagAlphabet::new(KeyLayout::Qwerty, "fj1");

    let assigned = solve(&doc, &query, &results, &results, alphabet.all_tags(), &alphabet);

    assert_eq!(assigned.len(), 3);
    assert!(assigned.iter().all(|(tag, _)| !has_digit(tag)));
}

#[test]
fn test_tag_exhaustion_leaves_sites_untagged() {
    let doc = Document::from_text("q q q q");
    let query = SearchQuery::from_char('q');
    let results = sites(&doc, &query);
    let alphabet = TagAlphabet::new(KeyLayout::Qwerty, "f");

    let assigned = solve(&doc, &query, &results, &results, alphabet.all_tags(), &alphabet);

    assert_eq!(results.len(), 4);
    assert_eq!(assigned.len(), 1);
}

#[test]
fn test_no_results_or_tags() {
    let doc = Document::from_text("abc");
    let query = SearchQuery::from_char('a');
    let alphabet = TagAlphabet::default();
    assert!(solve(&doc, &query, &[], &[0], alphabet.all_tags(), &alphabet).is_empty());
    assert!(solve(&doc, &query, &[0], &[0], &[], &alphabet).is_empty());
}

#[test]
fn test_vacant_sites_avoid_fragments_of_tagged_sites() {
    let doc = Document::from_text("ab ac");
    let query = SearchQuery::from_char('a');
    let alphabet = TagAlphabet::new(KeyLayout::Qwerty, "bcf");

    let assigned = solve(&doc, &query, &[0], &[0, 3], alphabet.all_tags(), &alphabet);

    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].1, 0);
    assert!(assigned[0].0.starts_with('f'));
}

#[test]
fn test_easiest_tag_goes_first() {
    let doc = Document::from_text("x");
    let query = SearchQuery::from_char('x');
    let alphabet = TagAlphabet::new(KeyLayout::Qwerty, "");

    let assigned = solve(&doc, &query, &[0], &[0], alphabet.all_tags(), &alphabet);

    assert_eq!(assigned, vec![(Tag::from("ff"), 0)]);
}

#[test]
fn test_tagged_results_still_block_first_keys() {
    let doc = Document::from_text("ab ac ad");
    let query = SearchQuery::from_char('a');
    let alphabet = TagAlphabet::new(KeyLayout::Qwerty, "bcdf");

    let assigned = solve(&doc, &query, &[6], &[0, 3, 6], alphabet.all_tags(), &alphabet);

    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].1, 6);
    assert!(assigned[0].0.starts_with('f'));
}
