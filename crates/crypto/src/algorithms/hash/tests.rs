// Path: crates/crypto/src/algorithms/hash/tests.rs
use super::*;

#[test]
fn test_sha256_known_vector() {
    assert_eq!(
        sha256_hex("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(
        sha256_hex(""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_concat_matches_single_buffer() {
    let joined = [b"chain".as_slice(), b"trx".as_slice()].concat();
    assert_eq!(sha256_concat(&[b"chain".as_slice(), b"trx".as_slice()]), sha256(&joined));
}
