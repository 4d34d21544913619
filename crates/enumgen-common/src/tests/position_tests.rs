use crate::{LineMap, Location, Span};

#[test]
fn test_location_first_line() {
    let source = "package colors\n";
    let map = LineMap::build(source);
    assert_eq!(map.location(8, source), Location { line: 1, column: 9 });
}

#[test]
fn test_location_after_newlines() {
    let source = "package p\n\ntype Color int\n";
    let map = LineMap::build(source);
    assert_eq!(map.line_count(), 4);
    assert_eq!(map.location(16, source), Location { line: 3, column: 6 });
    assert_eq!(map.location(16, source).to_string(), "3:6");
}

#[test]
fn test_location_counts_characters() {
    let source = "// é\nx";
    let map = LineMap::build(source);
    // 'é' is two bytes but one column.
    assert_eq!(map.location(5, source), Location { line: 1, column: 5 });
    assert_eq!(map.location(6, source), Location { line: 2, column: 1 });
}

#[test]
fn test_span_slice_and_merge() {
    let text = "type Color int";
    let name = Span::new(5, 10);
    assert_eq!(name.slice(text), "Color");
    assert_eq!(name.len(), 5);
    assert_eq!(name.merge(Span::new(11, 14)), Span::new(5, 14));
    assert_eq!(Span::new(40, 50).slice(text), "");
    assert!(Span::at(3).is_empty());
}
