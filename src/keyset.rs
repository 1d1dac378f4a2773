//! Validated key material for the transform pipeline.
//!
//! A [`KeySet`] bundles every parameter the pipeline needs: the Collatz
//! seed, the affine coefficients with their modulus, and the
//! transposition digit key. Construction is the single validation gate —
//! the transforms themselves assume a valid KeySet and never re-check.
//!
//! The exported text form is `SEED:A:B:TRANSKEY` (exactly four
//! colon-delimited fields). The modulus and the derived affine inverse
//! are not transported; import re-derives them.

use crate::error::{CollatzboxError, ErrorCategory, ErrorKind, Result};
use crate::modmath;

/// Default affine modulus: the full byte alphabet.
pub const DEFAULT_MODULUS: i64 = 256;

/// Immutable, validated parameter bundle for one encrypt/decrypt pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySet {
    seed: u64,
    affine_a: i64,
    affine_b: i64,
    modulus: i64,
    // Derived once at construction from (affine_a, modulus).
    affine_a_inverse: i64,
    trans_key: String,
}

/// Queryable snapshot of a KeySet, including derived values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInfo {
    pub seed: u64,
    pub affine_a: i64,
    pub affine_b: i64,
    pub affine_a_inverse: i64,
    pub modulus: i64,
    pub trans_key: String,
}

impl KeySet {
    /// Builds a KeySet from raw parameters, validating every invariant.
    ///
    /// Fails with [`ErrorKind::ModulusInvalid`] when `modulus` is outside
    /// `2..=256` (the affine layer emits bytes, so values past the byte
    /// alphabet could never be represented in the ciphertext), with
    /// [`ErrorKind::AffineNotCoprime`] when `affine_a` has no inverse
    /// under `modulus`, and with
    /// [`ErrorKind::TranspositionKeyInvalid`] when `trans_key` is not a
    /// digit-string permutation of `1..=len`.
    pub fn new(
        seed: u64,
        affine_a: i64,
        affine_b: i64,
        trans_key: impl Into<String>,
        modulus: i64,
    ) -> Result<Self> {
        if !(2..=256).contains(&modulus) {
            return Err(CollatzboxError::with_kind(
                ErrorCategory::User,
                ErrorKind::ModulusInvalid,
                format!("modulus ({}) must be within 2..=256", modulus),
            ));
        }

        let trans_key = trans_key.into();
        validate_transposition_key(&trans_key)?;

        let affine_a_inverse = modmath::mod_inverse(affine_a, modulus).ok_or_else(|| {
            CollatzboxError::with_kind(
                ErrorCategory::User,
                ErrorKind::AffineNotCoprime,
                format!(
                    "affine 'a' ({}) must be coprime with the modulus ({})",
                    affine_a, modulus
                ),
            )
        })?;

        Ok(Self {
            seed,
            affine_a,
            affine_b,
            modulus,
            affine_a_inverse,
            trans_key,
        })
    }

    /// The reference parameter set (seed 27, a 5, b 8, key "3142", mod 256).
    pub fn with_defaults() -> Self {
        // Known-valid constants; construction cannot fail.
        match Self::new(27, 5, 8, "3142", DEFAULT_MODULUS) {
            Ok(keyset) => keyset,
            Err(_) => unreachable!("default key parameters are valid"),
        }
    }

    /// Parses an exported `SEED:A:B:TRANSKEY` string back into a KeySet.
    ///
    /// The modulus is not part of the wire form and defaults to
    /// [`DEFAULT_MODULUS`]; the affine inverse is recomputed. A wrong
    /// field count or unparseable integer fails with
    /// [`ErrorKind::KeyFormatInvalid`]; invalid parameter values fail the
    /// same way construction does.
    pub fn import(key_string: &str) -> Result<Self> {
        let parts: Vec<&str> = key_string.split(':').collect();
        if parts.len() != 4 {
            return Err(CollatzboxError::with_kind(
                ErrorCategory::User,
                ErrorKind::KeyFormatInvalid,
                "invalid key format: expected SEED:A:B:TRANSKEY",
            ));
        }

        let seed: u64 = parts[0].parse().map_err(|e| {
            CollatzboxError::with_kind_and_source(
                ErrorCategory::User,
                ErrorKind::KeyFormatInvalid,
                format!("invalid seed field: {:?}", parts[0]),
                e,
            )
        })?;
        let affine_a: i64 = parts[1].parse().map_err(|e| {
            CollatzboxError::with_kind_and_source(
                ErrorCategory::User,
                ErrorKind::KeyFormatInvalid,
                format!("invalid affine 'a' field: {:?}", parts[1]),
                e,
            )
        })?;
        let affine_b: i64 = parts[2].parse().map_err(|e| {
            CollatzboxError::with_kind_and_source(
                ErrorCategory::User,
                ErrorKind::KeyFormatInvalid,
                format!("invalid affine 'b' field: {:?}", parts[2]),
                e,
            )
        })?;

        Self::new(seed, affine_a, affine_b, parts[3], DEFAULT_MODULUS)
            .map_err(|e| e.with_context(format!("invalid parameters in key string {:?}", key_string)))
    }

    /// Serializes the key as `SEED:A:B:TRANSKEY`.
    ///
    /// Derived values are intentionally omitted; import recomputes them.
    pub fn export(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.seed, self.affine_a, self.affine_b, self.trans_key
        )
    }

    /// Full parameter snapshot, including the derived affine inverse.
    pub fn info(&self) -> KeyInfo {
        KeyInfo {
            seed: self.seed,
            affine_a: self.affine_a,
            affine_b: self.affine_b,
            affine_a_inverse: self.affine_a_inverse,
            modulus: self.modulus,
            trans_key: self.trans_key.clone(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn affine_a(&self) -> i64 {
        self.affine_a
    }

    pub fn affine_b(&self) -> i64 {
        self.affine_b
    }

    pub fn affine_a_inverse(&self) -> i64 {
        self.affine_a_inverse
    }

    pub fn modulus(&self) -> i64 {
        self.modulus
    }

    pub fn trans_key(&self) -> &str {
        &self.trans_key
    }
}

/// True iff `a` has a multiplicative inverse under `modulus`.
pub fn validate_affine_a(a: i64, modulus: i64) -> bool {
    modulus > 1 && modmath::gcd(a, modulus) == 1
}

/// Checks that `key` is a digit string forming a permutation of `1..=len`.
///
/// The error message distinguishes the three failure modes: non-digit
/// content, repeated digits, and a digit set that is not exactly `1..=n`.
pub fn validate_transposition_key(key: &str) -> Result<()> {
    let invalid = |msg: String| {
        CollatzboxError::with_kind(ErrorCategory::User, ErrorKind::TranspositionKeyInvalid, msg)
    };

    if key.is_empty() || !key.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(format!(
            "transposition key {:?} must consist only of digits",
            key
        )));
    }

    let digits: Vec<u8> = key.bytes().map(|b| b - b'0').collect();

    let mut seen = [false; 10];
    for &d in &digits {
        if seen[d as usize] {
            return Err(invalid(format!(
                "transposition key {:?} contains duplicate digit {}",
                key, d
            )));
        }
        seen[d as usize] = true;
    }

    let n = digits.len();
    if digits.iter().any(|&d| d == 0 || d as usize > n) {
        return Err(invalid(format!(
            "transposition key {:?} must contain exactly the digits 1..={}",
            key, n
        )));
    }

    Ok(())
}
