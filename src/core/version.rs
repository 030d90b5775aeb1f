//! Normalization tag versions.
//!
//! A normalized hash record starts with `!{version}`. Only version `1`
//! (RFC 8265 OpaqueString over the RFC 8264 Freeform class) exists today;
//! any other version is rejected at parse time rather than ignored.

use core::fmt::{self, Display};

use crate::core::error::PasschainError;

/// Versions of the password normalization profile recorded in a hash.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizationVersion {
    /// RFC 8265 OpaqueString, without case mapping or bidi rule.
    #[default]
    V1,
}

impl NormalizationVersion {
    /// The version written by new hashes.
    pub const CURRENT: Self = Self::V1;

    /// The version digits as they appear after the `!` marker.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "1",
        }
    }
}

impl Display for NormalizationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for NormalizationVersion {
    type Error = PasschainError;

    fn try_from(digits: &str) -> Result<Self, Self::Error> {
        match digits {
            "1" => Ok(Self::V1),
            other => Err(PasschainError::UnsupportedNormalization(other.to_string())),
        }
    }
}
