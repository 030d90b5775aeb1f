//! Ergonomic imports.
//!
//! ```rust
//! use passchain::prelude::*;
//!
//! let hasher = PasswordHasher::builder(Pbkdf2::sha512())
//!     .iterations(Pbkdf2Params::interactive().iterations)
//!     .build()
//!     .expect("valid configuration");
//! # let _ = hasher;
//! ```

pub use crate::core::config::{HasherBuilder, HasherConfig};
pub use crate::core::error::{ErrorKind, NormalizationError, PasschainError, PasschainResult};
pub use crate::core::hasher::{PasswordHasher, VerifyOutcome};
pub use crate::core::operations::algorithm::{HashAlgorithm, Pbkdf2, Pbkdf2Params, Pbkdf2Prf};
pub use crate::core::operations::encryption::{
    AesCtrHmac, EncryptionAlgorithm, EncryptionParams, XChaCha20Blake2b,
};
pub use crate::core::operations::random::{OsRandom, RandomSource};
pub use crate::core::types::{ChainSegment, HashRecord};

#[cfg(feature = "argon2")]
pub use crate::core::operations::algorithm::Argon2id;
