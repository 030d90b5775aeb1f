//! Password normalization per RFC 8265 (OpaqueString profile).
//!
//! The profile is applied to the RFC 8264 Freeform string class in three
//! steps:
//!
//! 1. Every space separator (`Zs`) other than U+0020 is mapped to U+0020.
//! 2. The string is put into Unicode Normalization Form C.
//! 3. Every code point is validated against the Freeform class.
//!
//! Case mapping and the bidi rule are not applied: passwords keep their case.
//! Code points that need a CONTEXTJ or CONTEXTO rule are always rejected
//! instead of being checked in context.
//!
//! # Example
//!
//! ```rust
//! use passchain::core::operations::normalize::normalize;
//!
//! // U+00A0 NO-BREAK SPACE becomes an ordinary space.
//! assert_eq!(normalize("correct\u{00A0}horse").unwrap(), "correct horse");
//!
//! // Combining sequences are composed.
//! assert_eq!(normalize("cafe\u{0301}").unwrap(), "caf\u{00E9}");
//!
//! // Zero-width characters are rejected.
//! assert!(normalize("pass\u{200B}word").is_err());
//! ```

pub mod tables;

use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::core::error::NormalizationError;

use self::tables::{DEFAULT_IGNORABLE, EXCEPTIONS_DISALLOWED, OLD_HANGUL_JAMO, PVALID_EXCEPTIONS};

/// Normalizes a password, or reports why it cannot be normalized.
///
/// # Errors
///
/// Returns `NormalizationError::DisallowedCharacter` if the NFC form
/// contains a code point outside the Freeform class.
pub fn normalize(password: &str) -> Result<String, NormalizationError> {
    let mapped: Zeroizing<String> = Zeroizing::new(password.chars().map(map_space).collect());
    let mut composed: Zeroizing<String> = Zeroizing::new(mapped.nfc().collect());

    if let Some(index) = composed.chars().position(|c| !is_freeform_allowed(c)) {
        return Err(NormalizationError::DisallowedCharacter { index });
    }

    Ok(core::mem::take(&mut *composed))
}

/// Normalizes a password given as raw bytes.
///
/// # Errors
///
/// Returns `NormalizationError::InvalidUtf8` if the bytes are not UTF-8,
/// otherwise the same errors as [`normalize`].
pub fn normalize_utf8(password: &[u8]) -> Result<String, NormalizationError> {
    let password = core::str::from_utf8(password).map_err(|_| NormalizationError::InvalidUtf8)?;
    normalize(password)
}

/// Whether a single code point belongs to the Freeform class.
///
/// The PVALID exceptions are accepted before any disallow check runs.
#[must_use]
pub fn is_freeform_allowed(c: char) -> bool {
    let code_point = u32::from(c);

    if PVALID_EXCEPTIONS.contains(code_point) {
        return true;
    }

    if EXCEPTIONS_DISALLOWED.contains(code_point)
        || OLD_HANGUL_JAMO.contains(code_point)
        || DEFAULT_IGNORABLE.contains(code_point)
    {
        return false;
    }

    !matches!(
        get_general_category(c),
        GeneralCategory::Control | GeneralCategory::Unassigned
    )
}

fn map_space(c: char) -> char {
    if c != ' ' && get_general_category(c) == GeneralCategory::SpaceSeparator {
        ' '
    } else {
        c
    }
}
