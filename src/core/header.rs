//! Tag parsing and generation utilities for hash strings.
//!
//! Hash strings are space-separated tokens:
//! `[!{version}] [#{encryption-id}] {segment}+ {hash}` where each segment is
//! `{algorithm-id}:{iterations}:{base64-salt}`. Both leading tags are
//! optional because older records predate them.

use crate::core::error::{PasschainError, PasschainResult};
use crate::core::version::NormalizationVersion;

/// Separator between tokens of a hash string.
pub const TOKEN_SEPARATOR: char = ' ';

/// Separator between the fields of a chain segment.
pub const FIELD_SEPARATOR: char = ':';

/// Marker that starts a normalization tag.
pub const NORMALIZATION_MARKER: char = '!';

/// Marker that starts an encryption tag.
pub const ENCRYPTION_MARKER: char = '#';

/// Characters an algorithm identifier may never contain.
pub const RESERVED_ID_CHARS: &str = " ~!@#$%^";

/// Splits a hash string into its non-empty tokens.
#[must_use]
pub fn split_tokens(hash: &str) -> Vec<&str> {
    hash.split(TOKEN_SEPARATOR)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Parses a normalization tag.
///
/// Returns `Ok(None)` if the token is not a normalization tag at all.
///
/// # Errors
///
/// Returns `PasschainError::UnsupportedNormalization` if the token is a
/// normalization tag with an unknown version.
pub fn parse_normalization_tag(token: &str) -> PasschainResult<Option<NormalizationVersion>> {
    match token.strip_prefix(NORMALIZATION_MARKER) {
        Some(digits) => NormalizationVersion::try_from(digits).map(Some),
        None => Ok(None),
    }
}

/// Parses an encryption tag.
///
/// Returns `Ok(None)` if the token is not an encryption tag at all.
///
/// # Errors
///
/// Returns `PasschainError::InvalidInteger` if the identifier is not a
/// non-negative 32-bit integer.
pub fn parse_encryption_tag(token: &str) -> PasschainResult<Option<u32>> {
    match token.strip_prefix(ENCRYPTION_MARKER) {
        Some(digits) => parse_decimal(digits).map(Some),
        None => Ok(None),
    }
}

/// Parses a plain decimal `u32` field.
///
/// Signs, surrounding whitespace and leading zeros are rejected so that
/// every accepted field serializes back to the same text.
///
/// # Errors
///
/// Returns `PasschainError::InvalidInteger` on any malformed input.
pub fn parse_decimal(digits: &str) -> PasschainResult<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PasschainError::InvalidInteger);
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(PasschainError::InvalidInteger);
    }
    digits.parse().map_err(|_| PasschainError::InvalidInteger)
}

/// Constructs a normalization tag (e.g. `"!1"`).
#[must_use]
pub fn make_normalization_tag(version: NormalizationVersion) -> String {
    format!("{NORMALIZATION_MARKER}{version}")
}

/// Constructs an encryption tag (e.g. `"#3"`).
#[must_use]
pub fn make_encryption_tag(id: u32) -> String {
    format!("{ENCRYPTION_MARKER}{id}")
}

/// Checks that an algorithm identifier can be embedded in a hash string.
///
/// # Errors
///
/// Returns `PasschainError::InvalidAlgorithmId` if the identifier is empty or
/// contains a reserved character or the field separator.
pub fn validate_algorithm_id(id: &str) -> PasschainResult<()> {
    let reserved = |c: char| RESERVED_ID_CHARS.contains(c) || c == FIELD_SEPARATOR;
    if id.is_empty() || id.chars().any(reserved) {
        return Err(PasschainError::InvalidAlgorithmId(id.to_string()));
    }
    Ok(())
}
