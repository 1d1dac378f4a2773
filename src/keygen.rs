//! Random key-material generation.
//!
//! Parameters are drawn from `rand::rng()`, whose `ThreadRng` is a
//! cryptographically secure generator. Uniformity is obtained by
//! rejection sampling over raw random bytes; the transposition
//! permutation comes from a Fisher-Yates shuffle over the same source.
//!
//! Note the asymmetry with the rest of the crate: generation uses secure
//! randomness, but the keystream the seed feeds is a public Collatz
//! sequence. The secure source prevents guessable parameters, nothing
//! more.

use rand::Rng;

use crate::error::{CollatzboxError, ErrorCategory, ErrorKind, Result};
use crate::keyset::KeySet;
use crate::keystream;
use crate::modmath;

/// Default seed range for generated keys, matching the reference tooling.
pub const DEFAULT_SEED_MIN: u64 = 10;
pub const DEFAULT_SEED_MAX: u64 = 1000;

/// Default transposition key length.
pub const DEFAULT_TRANS_KEY_LENGTH: usize = 4;

/// Bit-distribution report for a candidate Collatz seed.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedAnalysis {
    pub seed: u64,
    pub total_bits: usize,
    pub zeros: usize,
    pub ones: usize,
    /// zeros/ones; +inf when the stream contains no ones.
    pub balance_ratio: f64,
}

/// Generates key parameters for a fixed modulus.
///
/// The coprime residues in `[1, modulus)` are precomputed once so affine
/// 'a' can be drawn uniformly from the valid set.
#[derive(Debug)]
pub struct KeyGenerator {
    modulus: i64,
    valid_a_values: Vec<i64>,
}

impl KeyGenerator {
    /// Creates a generator for `modulus`. The same `2..=256` bound as
    /// KeySet construction applies: a wider modulus could generate
    /// parameter sets that no KeySet would accept.
    pub fn new(modulus: i64) -> Result<Self> {
        if !(2..=256).contains(&modulus) {
            return Err(CollatzboxError::with_kind(
                ErrorCategory::User,
                ErrorKind::ModulusInvalid,
                format!("modulus ({}) must be within 2..=256", modulus),
            ));
        }
        let valid_a_values = (1..modulus).filter(|&a| modmath::gcd(a, modulus) == 1).collect();
        Ok(Self {
            modulus,
            valid_a_values,
        })
    }

    /// Generator for the default byte-alphabet modulus (256).
    pub fn with_default_modulus() -> Self {
        match Self::new(crate::keyset::DEFAULT_MODULUS) {
            Ok(generator) => generator,
            Err(_) => unreachable!("the default modulus is valid"),
        }
    }

    pub fn modulus(&self) -> i64 {
        self.modulus
    }

    /// Uniformly random seed in `[min, max)`.
    pub fn generate_seed(&self, min: u64, max: u64) -> Result<u64> {
        if min >= max {
            return Err(CollatzboxError::new(
                ErrorCategory::User,
                format!("empty seed range [{}, {})", min, max),
            ));
        }
        Ok(min + random_below(max - min))
    }

    /// Uniformly random valid affine pair: `a` from the coprime set,
    /// `b` from `[0, modulus)`.
    pub fn generate_affine_params(&self) -> (i64, i64) {
        let index = random_below(self.valid_a_values.len() as u64) as usize;
        let a = self.valid_a_values[index];
        let b = random_below(self.modulus as u64) as i64;
        (a, b)
    }

    /// Random permutation of `1..=length` rendered as a digit string.
    ///
    /// `length` is capped at 9: past that, single-character digits cannot
    /// satisfy the permutation invariant.
    pub fn generate_transposition_key(&self, length: usize) -> Result<String> {
        if length == 0 || length > 9 {
            return Err(CollatzboxError::with_kind(
                ErrorCategory::User,
                ErrorKind::TranspositionKeyInvalid,
                format!("transposition key length ({}) must be within 1..=9", length),
            ));
        }

        let mut digits: Vec<u8> = (1..=length as u8).collect();
        // Fisher-Yates over the secure source.
        for i in (1..digits.len()).rev() {
            let j = random_below(i as u64 + 1) as usize;
            digits.swap(i, j);
        }

        Ok(digits.iter().map(|d| char::from(b'0' + d)).collect())
    }

    /// Produces a complete, always-valid KeySet with default seed range.
    pub fn generate_full_keyset(&self, trans_key_length: usize) -> Result<KeySet> {
        let seed = self.generate_seed(DEFAULT_SEED_MIN, DEFAULT_SEED_MAX)?;
        let (affine_a, affine_b) = self.generate_affine_params();
        let trans_key = self.generate_transposition_key(trans_key_length)?;
        // Generated parameters satisfy every KeySet invariant; a
        // rejection here is a bug in this module, not a user error.
        KeySet::new(seed, affine_a, affine_b, trans_key, self.modulus).map_err(|e| {
            CollatzboxError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::InternalInvariant,
                "generated key parameters failed validation",
                e,
            )
        })
    }

    /// Reports the bit distribution of a seed's keystream prefix.
    pub fn analyze_seed(&self, seed: u64, bits_needed: usize) -> SeedAnalysis {
        let bits = keystream::generate(seed, bits_needed);
        let zeros = bits.iter().filter(|&&b| b == 0).count();
        let ones = bits.len() - zeros;
        let balance_ratio = if ones > 0 {
            zeros as f64 / ones as f64
        } else {
            f64::INFINITY
        };
        SeedAnalysis {
            seed,
            total_bits: bits.len(),
            zeros,
            ones,
            balance_ratio,
        }
    }
}

/// Uniform integer in `[0, bound)` via rejection sampling over the
/// secure generator.
fn random_below(bound: u64) -> u64 {
    debug_assert!(bound > 0);
    // Reject draws from the final incomplete multiple of `bound` so the
    // modulo below cannot bias low values.
    let limit = u64::MAX - u64::MAX % bound;
    let mut rng = rand::rng();
    loop {
        let mut buf = [0u8; 8];
        rng.fill_bytes(&mut buf);
        let value = u64::from_be_bytes(buf);
        if value < limit {
            return value % bound;
        }
    }
}
