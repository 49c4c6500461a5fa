//! PUZ Decode Fuzz Target
//!
//! Feeds arbitrary bytes to the decoder. Anything that decodes must encode,
//! and the re-encoded file must decode to the same puzzle.

#![no_main]

use libfuzzer_sys::fuzz_target;
use puz::{CodecConfig, decode, decode_with_config, encode};

fuzz_target!(|data: &[u8]| {
    let _ = decode_with_config(data, &CodecConfig::lenient());

    let Ok(puzzle) = decode(data) else {
        return;
    };
    // decoded files may still break invariants the encoder enforces
    let Ok(bytes) = encode(&puzzle) else {
        return;
    };
    let again = decode(&bytes).expect("encoder output must decode");
    assert_eq!(again, puzzle);
});
