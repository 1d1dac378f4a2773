//! Affine byte substitution: `E(x) = (a·x + b) mod m`.
//!
//! Each byte is transformed independently — no chaining, no IV. The
//! decrypt direction uses the modular inverse of `a`, which the KeySet
//! derives once at construction.

use crate::keyset::KeySet;

/// Encrypts a single byte: `(a*x + b) mod m`, normalized into `[0, m)`.
pub fn encrypt_byte(x: u8, a: i64, b: i64, modulus: i64) -> u8 {
    let a = a.rem_euclid(modulus);
    let b = b.rem_euclid(modulus);
    (a * x as i64 + b).rem_euclid(modulus) as u8
}

/// Decrypts a single byte: `a_inv * (y - b) mod m`.
///
/// Intermediate results can be negative; `rem_euclid` keeps every step
/// normalized into `[0, m)`.
pub fn decrypt_byte(y: u8, a_inverse: i64, b: i64, modulus: i64) -> u8 {
    let diff = (y as i64 - b).rem_euclid(modulus);
    (a_inverse * diff).rem_euclid(modulus) as u8
}

/// Applies the affine transform to every byte of a buffer.
pub fn encrypt(data: &[u8], keyset: &KeySet) -> Vec<u8> {
    data.iter()
        .map(|&x| encrypt_byte(x, keyset.affine_a(), keyset.affine_b(), keyset.modulus()))
        .collect()
}

/// Inverts the affine transform on every byte of a buffer.
pub fn decrypt(data: &[u8], keyset: &KeySet) -> Vec<u8> {
    data.iter()
        .map(|&y| decrypt_byte(y, keyset.affine_a_inverse(), keyset.affine_b(), keyset.modulus()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_byte_formula() {
        // E(x) = (5x + 8) mod 256
        assert_eq!(encrypt_byte(0, 5, 8, 256), 8);
        assert_eq!(encrypt_byte(1, 5, 8, 256), 13);
        assert_eq!(encrypt_byte(100, 5, 8, 256), ((5 * 100 + 8) % 256) as u8);
        assert_eq!(encrypt_byte(255, 5, 8, 256), ((5 * 255 + 8) % 256) as u8);
    }

    #[test]
    fn test_decrypt_byte_negative_intermediate() {
        // y - b goes negative; the result must still normalize into [0, m).
        // E(0) = 8, so D(8) must be 0 even though 8 - 8 = 0 and D(5) hits 5 - 8 < 0.
        assert_eq!(decrypt_byte(8, 205, 8, 256), 0);
        let y = encrypt_byte(3, 5, 200, 256);
        assert_eq!(decrypt_byte(y, 205, 200, 256), 3);
    }

    #[test]
    fn test_byte_roundtrip_all_values() {
        for (a, a_inv, b) in [(5i64, 205i64, 8i64), (7, 183, 13), (249, 73, 255), (11, 163, 0)] {
            for x in 0..=255u8 {
                let y = encrypt_byte(x, a, b, 256);
                assert_eq!(decrypt_byte(y, a_inv, b, 256), x, "a={} b={} x={}", a, b, x);
            }
        }
    }

    #[test]
    fn test_encrypt_byte_is_bijective() {
        let mut seen = [false; 256];
        for x in 0..=255u8 {
            let y = encrypt_byte(x, 5, 8, 256) as usize;
            assert!(!seen[y], "collision at output {}", y);
            seen[y] = true;
        }
    }

    #[test]
    fn test_buffer_roundtrip() {
        let keyset = crate::keyset::KeySet::with_defaults();
        let data: Vec<u8> = (0..=255).collect();
        let encrypted = encrypt(&data, &keyset);
        assert_ne!(encrypted, data);
        assert_eq!(decrypt(&encrypted, &keyset), data);
    }

    #[test]
    fn test_buffer_bytes_independent() {
        // Per-byte transform: a buffer result equals the per-byte results.
        let keyset = crate::keyset::KeySet::with_defaults();
        let data = [1u8, 1, 2, 1];
        let encrypted = encrypt(&data, &keyset);
        assert_eq!(encrypted[0], encrypted[1]);
        assert_eq!(encrypted[1], encrypted[3]);
        assert_eq!(encrypted[0], encrypt_byte(1, 5, 8, 256));
    }

    #[test]
    fn test_empty_buffer() {
        let keyset = crate::keyset::KeySet::with_defaults();
        assert_eq!(encrypt(&[], &keyset), Vec::<u8>::new());
        assert_eq!(decrypt(&[], &keyset), Vec::<u8>::new());
    }
}
