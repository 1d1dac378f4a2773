//! The composed three-layer pipeline.
//!
//! Encryption: UTF-8 bytes → XOR with the Collatz keystream → affine
//! substitution → block transposition → lowercase hex. Decryption runs
//! the exact mirror: hex decode → transposition inverse → affine inverse
//! → the same XOR (self-inverse). The stage order is fixed; reordering
//! breaks compatibility with existing ciphertexts.

use crate::affine;
use crate::error::{CollatzboxError, ErrorCategory, ErrorKind, Result};
use crate::keyset::KeySet;
use crate::keystream;
use crate::transpose;

/// Bit-distribution metadata reported alongside a ciphertext.
#[derive(Debug, Clone, PartialEq)]
pub struct EncryptMetadata {
    /// Plaintext length in bytes, before transposition padding. Needed
    /// to strip the padding on decrypt.
    pub original_length: usize,
    /// Ciphertext length in bytes (a multiple of the transposition
    /// block size).
    pub encrypted_length: usize,
    /// Zero bits in the ciphertext.
    pub zeros: usize,
    /// One bits in the ciphertext.
    pub ones: usize,
    /// zeros/ones; +inf when the ciphertext has no one bits.
    pub balance_ratio: f64,
}

/// XOR a buffer with the keystream for its bit length. Self-inverse.
fn xor_keystream(data: &mut [u8], seed: u64) {
    let stream = keystream::keystream(seed, data.len() * 8);
    for (byte, key_byte) in data.iter_mut().zip(stream) {
        *byte ^= key_byte;
    }
}

/// Encrypts `plaintext` under `keyset`, returning the lowercase hex
/// ciphertext and its metadata.
///
/// Infallible: the KeySet was validated at construction and every stage
/// is total over byte buffers.
pub fn encrypt(plaintext: &str, keyset: &KeySet) -> (String, EncryptMetadata) {
    let mut data = plaintext.as_bytes().to_vec();
    let original_length = data.len();

    xor_keystream(&mut data, keyset.seed());
    let data = affine::encrypt(&data, keyset);
    let data = transpose::encrypt(&data, keyset);

    let ones: usize = data.iter().map(|b| b.count_ones() as usize).sum();
    let zeros = data.len() * 8 - ones;
    let metadata = EncryptMetadata {
        original_length,
        encrypted_length: data.len(),
        zeros,
        ones,
        balance_ratio: if ones > 0 {
            zeros as f64 / ones as f64
        } else {
            f64::INFINITY
        },
    };

    (hex::encode(&data), metadata)
}

/// Decrypts a hex ciphertext under `keyset`.
///
/// When `original_length` is given, the decoded bytes are truncated to
/// it, stripping the transposition zero-padding. Invalid UTF-8 in the
/// result is replaced rather than failing: a wrong key produces garbled
/// output, never an error. Only malformed hex input fails.
pub fn decrypt(
    ciphertext_hex: &str,
    keyset: &KeySet,
    original_length: Option<usize>,
) -> Result<String> {
    let data = hex::decode(ciphertext_hex).map_err(|e| {
        CollatzboxError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::HexDecode,
            format!("ciphertext is not valid hex: {}", e),
            e,
        )
    })?;

    let data = transpose::decrypt(&data, keyset);
    let mut data = affine::decrypt(&data, keyset);
    xor_keystream(&mut data, keyset.seed());

    if let Some(length) = original_length {
        data.truncate(length);
    }

    Ok(String::from_utf8_lossy(&data).into_owned())
}
