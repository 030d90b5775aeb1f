//! Chained, upgradeable password hashes.
//!
//! Stored password hashes age: iteration counts that were fine five years
//! ago are too low today, algorithms get replaced and encryption keys get
//! rotated. This crate stores a hash as a *chain* of hashing steps so every
//! one of those upgrades can be applied to the stored hash directly, without
//! waiting for the user to log in again.
//!
//! # Quick Start
//!
//! ```rust
//! use passchain::{PasswordHasher, VerifyOutcome};
//! use passchain::core::operations::algorithm::Pbkdf2;
//!
//! let hasher = PasswordHasher::builder(Pbkdf2::sha256())
//!     .iterations(1_000)
//!     .normalize(true)
//!     .build()
//!     .expect("valid configuration");
//!
//! let stored = hasher.hash("correct horse").expect("hash should succeed");
//! assert!(stored.starts_with("!1 pbkdf2-sha256:1000:"));
//!
//! // A no-break space normalizes to an ordinary space.
//! assert!(hasher.verify(&stored, "correct\u{00A0}horse").unwrap());
//! assert!(!hasher.verify(&stored, "battery staple").unwrap());
//!
//! // Verify and pick up any pending upgrade in one call.
//! match hasher.verify_and_update(&stored, "correct horse").unwrap() {
//!     VerifyOutcome::Match { upgraded: None } => {}
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```
//!
//! # Hash Format
//!
//! A hash is a single line of space-separated tokens:
//!
//! | Token | Format | Description |
//! |-------|--------|-------------|
//! | normalization tag | `!{version}` | Optional. The password was normalized first |
//! | encryption tag | `#{id}` | Optional. The hash bytes are encrypted |
//! | segment | `{algorithm}:{iterations}:{base64 salt}` | One or more hashing steps |
//! | hash | `{base64 bytes}` | Output of the last segment |
//!
//! # Upgrading Hashes
//!
//! - [`PasswordHasher::update`] raises the iteration count, switches to a new
//!   main algorithm or rotates the encryption key without the password by
//!   appending one chain segment and re-encrypting.
//! - [`PasswordHasher::requires_rehash`] reports when a fresh single-segment
//!   hash is preferable; [`PasswordHasher::rehash`] builds it from the
//!   password at the next login.
//!
//! # Features
//!
//! ```toml
//! [dependencies]
//! passchain = "0.1"  # prelude + argon2 (default)
//! passchain = { version = "0.1", default-features = false }  # PBKDF2 only
//! ```
//!
//! # Security
//!
//! - Hash comparison is constant-time
//! - Encrypted hashes are authenticated before decryption
//! - Passwords and keys are zeroized after use
//! - Debug output redacts key material and hash bytes
//! - No unsafe code
//!
//! # Modules
//!
//! - [`core`] - Core types and operations
//! - [`prelude`] - Ergonomic imports (requires `prelude` feature)

pub mod core;

#[cfg(feature = "prelude")]
pub mod prelude;

// Re-export commonly used items at crate root
pub use core::config::{HasherBuilder, HasherConfig};
pub use core::error::{ErrorKind, NormalizationError, PasschainError, PasschainResult};
pub use core::hasher::{PasswordHasher, VerifyOutcome};
pub use core::types::{ChainSegment, HashRecord};
