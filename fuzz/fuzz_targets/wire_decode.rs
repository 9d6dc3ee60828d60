//! Fuzz target for protocol line decoding.
//!
//! Decoding must never panic, and anything that decodes and re-encodes must
//! decode to the same record again.

#![no_main]

use certinfo_proto::WireLine;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(wire) = WireLine::decode(text) else {
        return;
    };
    if let Ok(line) = wire.encode() {
        assert_eq!(WireLine::decode(&line), Ok(wire));
    }
});
