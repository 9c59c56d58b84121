use super::*;

fn doc() -> Document {
    Document::from_text("0123456789").with_caret(4).with_viewport(2..6)
}

#[test]
fn test_standard_ranges() {
    let doc = doc();
    assert_eq!(StandardBoundaries::WholeFile.offset_range(&doc), 0..=10);
    assert_eq!(StandardBoundaries::VisibleOnScreen.offset_range(&doc), 2..=6);
    assert_eq!(StandardBoundaries::BeforeCaret.offset_range(&doc), 0..=4);
    assert_eq!(StandardBoundaries::AfterCaret.offset_range(&doc), 4..=9);
}

#[test]
fn test_standard_membership() {
    let doc = doc();
    assert!(StandardBoundaries::WholeFile.is_offset_inside(&doc, 10));
    assert!(!StandardBoundaries::VisibleOnScreen.is_offset_inside(&doc, 6));
    assert!(StandardBoundaries::VisibleOnScreen.is_offset_inside(&doc, 5));
    assert!(StandardBoundaries::BeforeCaret.is_offset_inside(&doc, 4));
    assert!(!StandardBoundaries::BeforeCaret.is_offset_inside(&doc, 5));
    assert!(StandardBoundaries::AfterCaret.is_offset_inside(&doc, 4));
    assert!(!StandardBoundaries::AfterCaret.is_offset_inside(&doc, 3));
}

#[test]
fn test_intersection() {
    let doc = doc();
    let visible = StandardBoundaries::VisibleOnScreen;
    let after = StandardBoundaries::AfterCaret;
    let both = Intersection::new(&visible, &after);

    assert_eq!(both.offset_range(&doc), 4..=6);
    assert!(!both.is_offset_inside(&doc, 3));
    assert!(both.is_offset_inside(&doc, 4));
    assert!(both.is_offset_inside(&doc, 5));
    assert!(!both.is_offset_inside(&doc, 6));
}
