//! RC4 known-answer vectors and keystream engine behavior.

use rc4hash_core::arcfour::Arcfour;

#[test]
fn test_arcfour_key() {
    let mut cipher = Arcfour::with_key(b"Key");
    let result = cipher.process(b"Plaintext");
    assert_eq!(hex::encode(result), "bbf316e8d940af0ad3");
}

#[test]
fn test_arcfour_wiki() {
    let mut cipher = Arcfour::with_key(b"Wiki");
    let result = cipher.process(b"pedia");
    assert_eq!(hex::encode(result), "1021bf0420");
}

#[test]
fn test_arcfour_secret() {
    let mut cipher = Arcfour::with_key(b"Secret");
    let result = cipher.process(b"Attack at dawn");
    assert_eq!(hex::encode(result), "45a01f645fc35b383552544b9bf5");
}

#[test]
fn test_arcfour_is_symmetric() {
    let plaintext = b"round trip through the keystream";
    let ciphertext = Arcfour::with_key(b"Key").process(plaintext);
    assert_ne!(&ciphertext[..], &plaintext[..]);
    let decrypted = Arcfour::with_key(b"Key").process(&ciphertext);
    assert_eq!(&decrypted[..], &plaintext[..]);
}

#[test]
fn test_absorb_on_fresh_engine_matches_with_key() {
    let mut engine = Arcfour::new();
    engine.absorb(b"Wiki");
    let mut keyed = Arcfour::with_key(b"Wiki");
    for _ in 0..64 {
        assert_eq!(engine.next_byte(), keyed.next_byte());
    }
}

#[test]
fn test_different_keys_diverge() {
    let mut a = Arcfour::with_key(b"key-a");
    let mut b = Arcfour::with_key(b"key-b");
    let sa: Vec<u8> = (0..32).map(|_| a.next_byte()).collect();
    let sb: Vec<u8> = (0..32).map(|_| b.next_byte()).collect();
    assert_ne!(sa, sb);
}
