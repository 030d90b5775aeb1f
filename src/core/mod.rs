//! Core types and operations.
//!
//! - [`hasher`] - The hash chain policy (`PasswordHasher`)
//! - [`config`] - Hasher configuration and builder
//! - [`types`] - Parsed hash records and chain segments
//! - [`registry`] - Algorithm and encryption registries
//! - [`header`] - Tag parsing and generation utilities
//! - [`version`] - Normalization versions
//! - [`error`] - Error types
//! - [`operations`] - Hash algorithms, ciphers, normalization and comparison

pub mod config;
pub mod error;
pub mod hasher;
pub mod header;
pub mod operations;
pub mod registry;
pub mod types;
pub mod version;

// Re-export commonly used items
pub use error::{ErrorKind, NormalizationError, PasschainError, PasschainResult};
pub use hasher::{PasswordHasher, VerifyOutcome};
