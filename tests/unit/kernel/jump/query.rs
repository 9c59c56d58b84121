use super::*;

#[test]
fn test_empty_literal_is_rejected() {
    assert!(matches!(SearchQuery::literal(""), Err(JumpError::EmptyQuery)));
    assert!(SearchQuery::literal("a").is_ok());
}

#[test]
fn test_lowercase_first_char_ignores_case() {
    let query = SearchQuery::literal("hello").unwrap();
    let regex = query.to_regex().unwrap();
    assert!(regex.is_match("say HELLO"));

    let query = SearchQuery::literal("Hello").unwrap();
    let regex = query.to_regex().unwrap();
    assert!(regex.is_match("say Hello"));
    assert!(!regex.is_match("say hello"));
}

#[test]
fn test_literal_is_escaped() {
    let query = SearchQuery::literal("a.b(").unwrap();
    let regex = query.to_regex().unwrap();
    assert!(regex.is_match("xa.b(y"));
    assert!(!regex.is_match("axb("));
}

#[test]
fn test_invalid_regex_is_reported() {
    let query = SearchQuery::regex("(unclosed");
    assert!(matches!(query.to_regex(), Err(JumpError::InvalidRegex(_))));
}

#[test]
fn test_highlight_length() {
    let doc = Document::from_text("Testing tester");
    let query = SearchQuery::literal("testx").unwrap();
    assert_eq!(query.highlight_length(&doc, 0), 4);
    assert_eq!(query.highlight_length(&doc, 8), 4);
    assert_eq!(query.highlight_length(&doc, 1), 0);

    let query = SearchQuery::regex("t.");
    assert_eq!(query.highlight_length(&doc, 0), 0);
    assert_eq!(query.raw_text(), "");
}
