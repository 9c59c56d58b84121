use super::*;
use crate::kernel::jump::boundaries::StandardBoundaries;
use crate::kernel::jump::pattern::Pattern;

fn find(text: &str, query: &str) -> Vec<usize> {
    let doc = Document::from_text(text);
    let query = SearchQuery::literal(query).unwrap();
    find_matching_sites(&doc, &query, &StandardBoundaries::WholeFile, &[]).unwrap()
}

fn find_pattern(text: &str, pattern: Pattern) -> Vec<usize> {
    let doc = Document::from_text(text);
    let query = SearchQuery::regex(pattern.regex());
    find_matching_sites(&doc, &query, &StandardBoundaries::WholeFile, &[]).unwrap()
}

#[test]
fn test_single_char_scan() {
    assert_eq!(find("test test test", "t"), vec![0, 3, 5, 8, 10, 13]);
}

#[test]
fn test_multi_char_scan() {
    assert_eq!(find("abcd dabc cdab", "cd"), vec![2, 10]);
}

#[test]
fn test_case_sensitivity_follows_first_char() {
    assert_eq!(find("Foo foo FOO", "foo"), vec![0, 4, 8]);
    assert_eq!(find("Foo foo FOO", "Foo"), vec![0]);
    assert_eq!(find("Foo foo FOO", "FO"), vec![8]);
}

#[test]
fn test_overlapping_literal_matches() {
    assert_eq!(find("aaaa", "aa"), vec![0, 1, 2]);
}

#[test]
fn test_scan_matches_naive_definition() {
    let text = "the theme of these thesis: The THEN";
    for query in ["th", "the", "The", "e", "es", "s:"] {
        let expected: Vec<usize> = (0..text.len())
            .filter(|&i| {
                let Some(window) = text.get(i..i + query.len()) else {
                    return false;
                };
                if query.chars().next().unwrap().is_lowercase() {
                    window.eq_ignore_ascii_case(query)
                } else {
                    window == query
                }
            })
            .collect();
        assert_eq!(find(text, query), expected, "query {query:?}");
    }
}

#[test]
fn test_multibyte_offsets() {
    assert_eq!(find("héllo HÉLLO", "é"), vec![1, 7]);
}

#[test]
fn test_scan_skips_folded_and_out_of_bounds() {
    let doc = Document::from_text("a a a a a")
        .with_viewport(2..8)
        .with_folds(vec![4..5]);
    let query = SearchQuery::from_char('a');

    let whole = find_matching_sites(&doc, &query, &StandardBoundaries::WholeFile, &[]).unwrap();
    assert_eq!(whole, vec![0, 2, 6, 8]);

    let visible =
        find_matching_sites(&doc, &query, &StandardBoundaries::VisibleOnScreen, &[]).unwrap();
    assert_eq!(visible, vec![2, 6]);
}

#[test]
fn test_scan_after_caret() {
    let doc = Document::from_text("x x x x").with_caret(3);
    let query = SearchQuery::from_char('x');
    let sites = find_matching_sites(&doc, &query, &StandardBoundaries::AfterCaret, &[]).unwrap();
    assert_eq!(sites, vec![4, 6]);
}

#[test]
fn test_cache_is_filtered_by_last_char() {
    let doc = Document::from_text("test tent text");
    let query = SearchQuery::literal("tes").unwrap();
    let sites =
        find_matching_sites(&doc, &query, &StandardBoundaries::WholeFile, &[10, 0, 5]).unwrap();
    assert_eq!(sites, vec![0]);
}

#[test]
fn test_all_words_pattern() {
    assert_eq!(find_pattern("test word action", Pattern::AllWords), vec![0, 5, 10]);
    assert_eq!(find_pattern("a.b_c  d9", Pattern::AllWords), vec![0, 2, 7]);
}

#[test]
fn test_line_patterns() {
    assert_eq!(find_pattern("ab\n\ncd", Pattern::LineStarts), vec![0, 3, 4]);
    assert_eq!(find_pattern("ab\ncd", Pattern::LineEnds), vec![2, 5]);
    assert_eq!(find_pattern("  ab\n\n x", Pattern::LineIndents), vec![2, 5, 7]);
}

#[test]
fn test_invalid_regex_query() {
    let doc = Document::from_text("abc");
    let query = SearchQuery::regex("[");
    let result = find_matching_sites(&doc, &query, &StandardBoundaries::WholeFile, &[]);
    assert!(result.is_err());
}

#[test]
fn test_regex_cache_is_rescanned() {
    let doc = Document::from_text("test word action");
    let query = SearchQuery::regex(Pattern::AllWords.regex());
    let sites =
        find_matching_sites(&doc, &query, &StandardBoundaries::WholeFile, &[10, 3, 0]).unwrap();
    assert_eq!(sites, vec![0, 10]);
}
