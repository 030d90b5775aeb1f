//! Error types for password hashing operations.
//!
//! This module provides a unified error type for all hasher operations.
//! Error messages never carry password material, hash bytes or key bytes.
//! Normalization failures report the index of the rejected code point, never
//! the code point itself.

use thiserror::Error;

/// Broad classification of a [`PasschainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid hasher construction arguments. Fatal, never recovered.
    Config,
    /// Malformed or unresolvable hash string.
    Format,
    /// The password failed Unicode validation or normalization.
    Normalization,
    /// A zero-length password was supplied.
    EmptyPassword,
    /// A cipher, KDF or random source failed.
    Crypto,
}

/// Reasons a password can fail normalization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    /// The input bytes are not valid UTF-8.
    #[error("Password is not valid UTF-8")]
    InvalidUtf8,

    /// A code point is not allowed by the Freeform string class.
    /// Only the character index is reported.
    #[error("Password contains a disallowed character at index {index}")]
    DisallowedCharacter {
        /// Zero-based index of the offending code point in the NFC string.
        index: usize,
    },
}

/// Errors that can occur when hashing, verifying or upgrading passwords.
#[derive(Debug, Error)]
pub enum PasschainError {
    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------
    /// The iteration count must be greater than zero.
    #[error("Iteration count must be greater than zero")]
    InvalidIterations,

    /// The salt size is outside the supported range.
    #[error("Salt size {0} is outside the supported range of 8 to 32 bytes")]
    InvalidSaltSize(usize),

    /// The algorithm identifier is empty or contains a reserved character.
    #[error("Invalid algorithm identifier: {0:?}")]
    InvalidAlgorithmId(String),

    /// Two registered algorithms share an identifier.
    #[error("Duplicate algorithm identifier: {0}")]
    DuplicateAlgorithmId(String),

    /// Two registered encryption parameter sets share an identifier.
    #[error("Duplicate encryption identifier: {0}")]
    DuplicateEncryptionId(u32),

    /// The key length is not accepted by the chosen cipher.
    #[error("Invalid key size {size} for encryption algorithm {algorithm}")]
    InvalidKeySize {
        /// Cipher name.
        algorithm: &'static str,
        /// Rejected key length in bytes.
        size: usize,
    },

    // ---------------------------------------------------------------------
    // Format
    // ---------------------------------------------------------------------
    /// The hash string does not have the expected structure.
    #[error("Invalid hash format")]
    InvalidFormat,

    /// The hash string references an algorithm that is not registered.
    #[error("Unknown algorithm identifier: {0}")]
    UnknownAlgorithm(String),

    /// The hash string references encryption parameters that are not registered.
    #[error("Unknown encryption identifier: {0}")]
    UnknownEncryptionId(u32),

    /// The normalization tag carries a version this crate does not understand.
    #[error("Unsupported normalization version: {0}")]
    UnsupportedNormalization(String),

    /// An integer field could not be parsed or is out of range.
    #[error("Invalid integer field")]
    InvalidInteger,

    /// The final hash field decoded to zero bytes.
    #[error("Hash bytes are empty")]
    EmptyHash,

    /// Base64 decoding error.
    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    // ---------------------------------------------------------------------
    // Password
    // ---------------------------------------------------------------------
    /// The password could not be normalized.
    #[error("Password normalization failed: {0}")]
    Normalization(#[from] NormalizationError),

    /// A zero-length password was supplied.
    #[error("Password must not be empty")]
    EmptyPassword,

    // ---------------------------------------------------------------------
    // Crypto
    // ---------------------------------------------------------------------
    /// Authentication tag verification failed while decrypting hash bytes.
    /// Intentionally vague for security.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Generic cryptographic error (random source, KDF parameters, cipher setup).
    /// Intentionally vague for security.
    #[error("Cryptographic operation failed")]
    CryptoError,
}

impl PasschainError {
    /// Returns the taxonomy bucket this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIterations
            | Self::InvalidSaltSize(_)
            | Self::InvalidAlgorithmId(_)
            | Self::DuplicateAlgorithmId(_)
            | Self::DuplicateEncryptionId(_)
            | Self::InvalidKeySize { .. } => ErrorKind::Config,
            Self::InvalidFormat
            | Self::UnknownAlgorithm(_)
            | Self::UnknownEncryptionId(_)
            | Self::UnsupportedNormalization(_)
            | Self::InvalidInteger
            | Self::EmptyHash
            | Self::Base64Decode(_) => ErrorKind::Format,
            Self::Normalization(_) => ErrorKind::Normalization,
            Self::EmptyPassword => ErrorKind::EmptyPassword,
            Self::AuthenticationFailed | Self::CryptoError => ErrorKind::Crypto,
        }
    }
}

/// Result type alias for hasher operations.
pub type PasschainResult<T> = Result<T, PasschainError>;
