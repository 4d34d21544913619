use crate::quote_go_string;

#[test]
fn test_quote_plain() {
    assert_eq!(quote_go_string("active"), "\"active\"");
    assert_eq!(quote_go_string(""), "\"\"");
}

#[test]
fn test_quote_escapes() {
    assert_eq!(quote_go_string("a\"b"), "\"a\\\"b\"");
    assert_eq!(quote_go_string("back\\slash"), "\"back\\\\slash\"");
    assert_eq!(quote_go_string("tab\there\n"), "\"tab\\there\\n\"");
    assert_eq!(quote_go_string("\u{7}\u{b}"), "\"\\a\\v\"");
}

#[test]
fn test_quote_control_and_unicode() {
    assert_eq!(quote_go_string("\u{1}"), "\"\\x01\"");
    assert_eq!(quote_go_string("\u{7f}"), "\"\\x7f\"");
    assert_eq!(quote_go_string("\u{85}"), "\"\\u0085\"");
    assert_eq!(quote_go_string("héllo, 世界"), "\"héllo, 世界\"");
}

#[test]
fn test_quote_invalid_utf8_bytes() {
    assert_eq!(quote_go_string(b"\xff"), "\"\\xff\"");
    assert_eq!(quote_go_string(b"ok\xc3"), "\"ok\\xc3\"");
    assert_eq!(quote_go_string(b"\xe4\xb8\x96\xff\xe7\x95\x8c"), "\"世\\xff界\"");
}

#[test]
fn test_quote_non_printable_unicode() {
    assert_eq!(quote_go_string("a\u{200b}b"), "\"a\\u200bb\"");
    assert_eq!(quote_go_string("\u{feff}"), "\"\\ufeff\"");
    assert_eq!(quote_go_string("no\u{a0}break"), "\"no\\u00a0break\"");
    assert_eq!(quote_go_string("\u{2028}"), "\"\\u2028\"");
    assert_eq!(quote_go_string("\u{e000}"), "\"\\ue000\"");
    assert_eq!(quote_go_string("\u{e0041}"), "\"\\U000e0041\"");
    assert_eq!(quote_go_string("\u{1f600} ok"), "\"\u{1f600} ok\"");
}
