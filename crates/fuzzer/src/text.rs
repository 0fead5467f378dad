// Path: crates/fuzzer/src/text.rs
//! Random lowercase text.

use rand::seq::SliceRandom;
use rand::Rng;

/// Characters that are never valid in an address or domain.
pub const BAD_CHARS: &[u8] = b"~!#$%^&*()+=\\|{}[]\";:?/.>,<@\"`";

/// Length of a generated word.
pub const WORD_LEN: usize = 6;

/// A random string of `length` lowercase ASCII letters.
pub fn random_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect()
}

/// A short random lowercase word.
pub fn word() -> String {
    random_string(WORD_LEN)
}

/// One random character from [`BAD_CHARS`].
pub fn bad_char() -> char {
    BAD_CHARS
        .choose(&mut rand::thread_rng())
        .copied()
        .map(char::from)
        .unwrap_or('~')
}
