//! Property tests for line splitting and dump escaping.

use certinfo_core::serializer::{escape_line, reassemble, split_lines};
use proptest::prelude::*;

/// Reverse of `escape_line`, for checking that escaping loses nothing.
fn unescape(line: &str) -> String {
    let mut out = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                let byte = u8::from_str_radix(&hex, 16).unwrap();
                out.push(char::from(byte));
            },
            other => panic!("dangling escape {other:?}"),
        }
    }
    out
}

proptest! {
    #[test]
    fn escaped_lines_carry_no_control_characters(line in any::<String>()) {
        let escaped = escape_line(&line);
        prop_assert!(!escaped.chars().any(char::is_control));
    }

    #[test]
    fn escaping_is_reversible(line in any::<String>()) {
        prop_assert_eq!(unescape(&escape_line(&line)), line);
    }

    #[test]
    fn split_then_reassemble(lines in prop::collection::vec("[^\\n]{0,16}", 0..8)) {
        let text = reassemble(&lines);
        prop_assert_eq!(reassemble(&split_lines(&text)), text);
    }
}

#[test]
fn hex_escapes_are_uppercase() {
    assert_eq!(escape_line("\x1f\x7f"), "\\x1F\\x7F");
}
