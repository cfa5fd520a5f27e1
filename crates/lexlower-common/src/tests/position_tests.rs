use crate::position::LineMap;

#[test]
fn test_line_number_basic() {
    let map = LineMap::build("a\nbb\nccc");
    assert_eq!(map.line_count(), 3);
    assert_eq!(map.line_number(0), 1);
    assert_eq!(map.line_number(1), 1);
    assert_eq!(map.line_number(2), 2);
    assert_eq!(map.line_number(5), 3);
    assert_eq!(map.line_number(100), 3);
}

#[test]
fn test_crlf_counts_once() {
    let map = LineMap::build("a\r\nb\rc");
    assert_eq!(map.line_count(), 3);
    assert_eq!(map.line_number(3), 2);
    assert_eq!(map.line_number(5), 3);
}

#[test]
fn test_line_and_column() {
    let map = LineMap::build("let x;\n  x = 1;");
    assert_eq!(map.line_and_column(0), (1, 0));
    assert_eq!(map.line_and_column(9), (2, 2));
}

#[test]
fn test_unicode_line_separators() {
    // U+2028 and U+2029 are three bytes each.
    let map = LineMap::build("a\u{2028}b\u{2029}c");
    assert_eq!(map.line_count(), 3);
    assert_eq!(map.line_number(0), 1);
    assert_eq!(map.line_number(4), 2);
    assert_eq!(map.line_number(8), 3);
    assert_eq!(map.line_and_column(8), (3, 0));
}
