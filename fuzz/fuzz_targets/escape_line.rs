//! Fuzz target for text dump escaping.
//!
//! Escaped output must carry no control characters, whatever the input.

#![no_main]

use certinfo_core::serializer::escape_line;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let escaped = escape_line(text);
    assert!(!escaped.chars().any(char::is_control));
    assert!(escaped.len() >= text.len());
});
