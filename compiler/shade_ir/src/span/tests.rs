use super::*;

#[test]
fn test_span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(span.contains(15));
    assert!(!span.contains(20));
}

#[test]
fn test_span_merge() {
    let merged = Span::new(10, 20).merge(Span::new(15, 30));
    assert_eq!(merged, Span::new(10, 30));
}

#[test]
fn test_span_point_and_dummy() {
    assert!(Span::point(7).is_empty());
    assert!(Span::DUMMY.is_empty());
    assert_eq!(Span::point(7).to_range(), 7..7);
}

#[test]
fn test_span_formatting() {
    assert_eq!(format!("{:?}", Span::new(3, 9)), "3..9");
    assert_eq!(Span::new(3, 9).to_string(), "3..9");
}
