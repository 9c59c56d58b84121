use super::*;
use crate::kernel::jump::boundaries::StandardBoundaries;
use crate::kernel::jump::layout::TagAlphabet;
use crate::kernel::jump::pattern::Pattern;
use crate::kernel::jump::tagger::TaggingResult;

const WHOLE: StandardBoundaries = StandardBoundaries::WholeFile;

fn mark(doc: &Document, processor: &SearchProcessor, tagger: &mut Tagger) -> TaggingResult {
    let mut results = processor.results().to_vec();
    tagger.mark_or_jump(doc, &TagAlphabet::default(), processor.query(), &mut results)
}

#[test]
fn test_typing_narrows_results() {
    let doc = Document::from_text("test test test");
    let mut tagger = Tagger::new();
    let mut processor = SearchProcessor::from_char(&doc, 't', &WHOLE).unwrap();
    assert_eq!(processor.results(), &[0, 3, 5, 8, 10, 13]);
    mark(&doc, &processor, &mut tagger);

    for ch in ['e', 's', 't'] {
        assert!(processor.type_char(&doc, ch, &mut tagger));
        assert!(matches!(mark(&doc, &processor, &mut tagger), TaggingResult::Mark(_)));
    }
    assert_eq!(processor.query().raw_text(), "test");
    assert_eq!(processor.results(), &[0, 5, 10]);
}

#[test]
fn test_extra_character_keeps_prefix_results() {
    let doc = Document::from_text("test test test");
    let mut tagger = Tagger::new();
    let mut processor = SearchProcessor::from_char(&doc, 't', &WHOLE).unwrap();
    mark(&doc, &processor, &mut tagger);
    for ch in ['e', 's', 't'] {
        processor.type_char(&doc, ch, &mut tagger);
        mark(&doc, &processor, &mut tagger);
    }

    assert!(!processor.type_char(&doc, 'z', &mut tagger));
    assert_eq!(processor.query().raw_text(), "test");
    assert_eq!(processor.results(), &[0, 5, 10]);
}

#[test]
fn test_rejects_unmatched_character() {
    let doc = Document::from_text("abc abd");
    let mut tagger = Tagger::new();
    let mut processor = SearchProcessor::from_char(&doc, 'a', &WHOLE).unwrap();

    assert!(!processor.type_char(&doc, 'x', &mut tagger));
    assert_eq!(processor.query().raw_text(), "a");
    assert_eq!(processor.results(), &[0, 4]);

    assert!(processor.type_char(&doc, 'b', &mut tagger));
    assert!(processor.type_char(&doc, 'd', &mut tagger));
    assert_eq!(processor.results(), &[4]);
}

#[test]
fn test_word_boundary_restarts_query() {
    let doc = Document::from_text("a b a c");
    let mut tagger = Tagger::new();
    let mut processor = SearchProcessor::from_char(&doc, ' ', &WHOLE).unwrap();
    assert_eq!(processor.results(), &[1, 3, 5]);

    assert!(processor.type_char(&doc, 'b', &mut tagger));
    assert_eq!(processor.query().raw_text(), "b");
    assert_eq!(processor.results(), &[2]);
}

#[test]
fn test_typed_tag_keeps_its_site() {
    let doc = Document::from_text("ab ac ad");
    let mut tagger = Tagger::new();
    let mut processor = SearchProcessor::from_char(&doc, 'a', &WHOLE).unwrap();
    mark(&doc, &processor, &mut tagger);
    let tag = tagger.tag_at(3).cloned().unwrap();

    for ch in tag.chars() {
        assert!(processor.type_char(&doc, ch, &mut tagger));
    }
    assert!(processor.results().contains(&3));
    assert_eq!(mark(&doc, &processor, &mut tagger), TaggingResult::Jump(3));
}

#[test]
fn test_uppercase_first_char_is_case_sensitive() {
    let doc = Document::from_text("Test test");
    let upper = SearchProcessor::from_char(&doc, 'T', &WHOLE).unwrap();
    let lower = SearchProcessor::from_char(&doc, 't', &WHOLE).unwrap();
    assert_eq!(upper.results(), &[0]);
    assert_eq!(lower.results(), &[0, 3, 5, 8]);
}

#[test]
fn test_regex_search() {
    let doc = Document::from_text("test word action");
    let processor = SearchProcessor::from_regex(&doc, &Pattern::AllWords.regex(), &WHOLE).unwrap();
    assert!(processor.query().is_regex());
    assert_eq!(processor.results(), &[0, 5, 10]);
}

#[test]
fn test_invalid_regex_is_an_error() {
    let doc = Document::from_text("abc");
    assert!(SearchProcessor::from_regex(&doc, "(", &WHOLE).is_err());
}
