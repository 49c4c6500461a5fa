//! Scramble Cipher Fuzz Target
//!
//! Any text the cipher accepts must unscramble back to itself.

#![no_main]

use libfuzzer_sys::fuzz_target;
use puz::{ScrambleKey, scramble_text, unscramble_text};

fuzz_target!(|input: (u16, &str)| {
    let (key, text) = input;
    let Ok(key) = ScrambleKey::try_from(key % 10_000) else {
        return;
    };
    if let Ok(ciphertext) = scramble_text(text, key) {
        assert_eq!(unscramble_text(&ciphertext, key).ok().as_deref(), Some(text));
    }
});
