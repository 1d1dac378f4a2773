//! Collatzbox - reversible text obfuscation built from a Collatz-derived
//! keystream, an affine byte cipher, and a keyed block transposition.
//!
//! This is an educational cipher with exact, deterministic invertibility
//! and no security claims: the keystream source (Collatz parity bits) is
//! publicly reproducible from the seed. What the crate guarantees is the
//! algebra — modular invertibility of the affine layer, permutation
//! validity of the transposition key, and byte-exact round trips through
//! the composed pipeline.
//!
//! ```
//! use collatzbox::{KeySet, pipeline};
//!
//! let keyset = KeySet::new(27, 5, 8, "3142", 256).unwrap();
//! let (ciphertext, metadata) = pipeline::encrypt("Hello World", &keyset);
//!
//! let plaintext =
//!     pipeline::decrypt(&ciphertext, &keyset, Some(metadata.original_length)).unwrap();
//! assert_eq!(plaintext, "Hello World");
//! ```

#![forbid(unsafe_code)]

pub mod affine;
pub mod error;
pub mod keygen;
pub mod keyset;
pub mod keystream;
pub mod modmath;
pub mod pipeline;
pub mod transpose;

pub use error::{CollatzboxError, ErrorCategory, ErrorKind, Result};
pub use keygen::{KeyGenerator, SeedAnalysis};
pub use keyset::{KeyInfo, KeySet};
pub use pipeline::EncryptMetadata;
