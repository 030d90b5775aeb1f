//! Pluggable password hash algorithms.
//!
//! A [`HashAlgorithm`] is a deterministic `(password, salt, iterations) -> bytes`
//! function with a stable identifier. The identifier is written into every
//! chain segment, so it must never change once hashes exist.
//!
//! Built-in algorithms:
//!
//! | Type | Identifier | Output |
//! |------|------------|--------|
//! | [`Pbkdf2::sha256`] | `pbkdf2-sha256` | 32 bytes |
//! | [`Pbkdf2::sha384`] | `pbkdf2-sha384` | 48 bytes |
//! | [`Pbkdf2::sha512`] | `pbkdf2-sha512` | 64 bytes |
//! | [`Argon2id`] | `argon2id` | 32 bytes (configurable) |
//!
//! # Example
//!
//! ```rust
//! use passchain::core::operations::algorithm::{HashAlgorithm, Pbkdf2};
//!
//! let algorithm = Pbkdf2::sha256();
//! let hash = algorithm.hash(b"password", b"saltsalt", 2).expect("hash should succeed");
//! assert_eq!(hash.len(), 32);
//! assert_eq!(algorithm.id(), "pbkdf2-sha256");
//! ```

#[cfg(feature = "argon2")]
mod argon2_impl;
mod pbkdf2_impl;

use core::fmt::Debug;

use crate::core::error::PasschainResult;

#[cfg(feature = "argon2")]
pub use argon2_impl::{Argon2id, ARGON2_DEFAULT_MEMORY_KIB, ARGON2_OUTPUT_SIZE};
pub use pbkdf2_impl::{Pbkdf2, Pbkdf2Params, Pbkdf2Prf};

/// A password hash function usable as a chain segment.
///
/// Implementations must be deterministic for identical inputs and must not
/// retain or mutate the inputs.
pub trait HashAlgorithm: Debug + Send + Sync {
    /// Stable identifier written into hash strings.
    ///
    /// Must be non-empty and free of the characters `" ~!@#$%^"` and `:`.
    fn id(&self) -> &str;

    /// Hashes `password` with `salt` using `iterations` rounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying primitive rejects its parameters.
    fn hash(&self, password: &[u8], salt: &[u8], iterations: u32) -> PasschainResult<Vec<u8>>;

    /// Iteration count used when a hasher is built without an explicit one.
    fn default_iterations(&self) -> u32;
}
