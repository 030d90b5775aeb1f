//! Primitive operations used by the hasher.
//!
//! - [`algorithm`] - Pluggable password hash algorithms (PBKDF2, Argon2id)
//! - [`encryption`] - Pluggable ciphers for encrypting hash bytes at rest
//! - [`normalize`] - RFC 8265 OpaqueString password normalization
//! - [`compare`] - Constant-time byte comparison
//! - [`random`] - Injectable random byte sources

pub mod algorithm;
pub mod compare;
pub mod encryption;
pub mod normalize;
pub mod random;
