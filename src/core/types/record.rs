//! `HashRecord` - the parsed form of a stored hash string.
//!
//! Format:
//!
//! ```text
//! [!{normalization}] [#{encryption-id}] {segment} [{segment} ...] {base64(hash)}
//! ```
//!
//! Tokens are separated by a single ASCII space. The tag tokens are
//! optional but must appear in this order. At least one segment and the
//! final hash token are always present.

use core::fmt::{self, Debug, Display};

use base64::prelude::*;
use log::trace;

use super::ChainSegment;
use crate::core::error::{PasschainError, PasschainResult};
use crate::core::header::{
    make_encryption_tag, make_normalization_tag, parse_encryption_tag, parse_normalization_tag,
    split_tokens, TOKEN_SEPARATOR,
};
use crate::core::registry::{AlgorithmRegistry, EncryptionRegistry};
use crate::core::version::NormalizationVersion;

/// A parsed hash string.
///
/// # Example
///
/// ```rust
/// use passchain::core::operations::algorithm::Pbkdf2;
/// use passchain::core::registry::{AlgorithmRegistry, EncryptionRegistry};
/// use passchain::core::types::HashRecord;
///
/// let algorithms = AlgorithmRegistry::from_algorithms([Pbkdf2::sha256()]).unwrap();
/// let encryptions = EncryptionRegistry::empty();
///
/// let stored = "pbkdf2-sha256:1000:c2FsdHNhbHQ= pbkdf2-sha256:2000:cGVwcGVycGVwcGVy AAECAw==";
/// let record = HashRecord::parse(stored, &algorithms, &encryptions).unwrap();
///
/// assert!(!record.is_normalized());
/// assert_eq!(record.chain().len(), 2);
/// assert_eq!(record.total_iterations("pbkdf2-sha256"), 3000);
/// assert_eq!(record.to_string(), stored);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashRecord {
    normalization: Option<NormalizationVersion>,
    encryption_id: Option<u32>,
    chain: Vec<ChainSegment>,
    hash: Vec<u8>,
}

impl HashRecord {
    pub(crate) fn new(
        normalization: Option<NormalizationVersion>,
        encryption_id: Option<u32>,
        chain: Vec<ChainSegment>,
        hash: Vec<u8>,
    ) -> Self {
        debug_assert!(!chain.is_empty());
        Self {
            normalization,
            encryption_id,
            chain,
            hash,
        }
    }

    /// Parses a hash string.
    ///
    /// Every segment's algorithm must be registered in `algorithms`, and an
    /// encryption tag must name a parameter set in `encryptions`.
    ///
    /// # Errors
    ///
    /// - `PasschainError::InvalidFormat` if fewer than two tokens remain after
    ///   the tags, or a segment is malformed
    /// - `PasschainError::UnsupportedNormalization` for an unknown `!` version
    /// - `PasschainError::UnknownEncryptionId` if the `#` id is not registered
    /// - `PasschainError::UnknownAlgorithm` if a segment names an unregistered algorithm
    /// - `PasschainError::InvalidInteger` for a bad iteration count or encryption id
    /// - `PasschainError::Base64Decode` / `PasschainError::EmptyHash` for a bad hash token
    pub fn parse(
        hash: &str,
        algorithms: &AlgorithmRegistry,
        encryptions: &EncryptionRegistry,
    ) -> PasschainResult<Self> {
        let tokens = split_tokens(hash);
        let mut rest = tokens.as_slice();

        let normalization = match rest.first() {
            Some(token) => parse_normalization_tag(token)?,
            None => None,
        };
        if normalization.is_some() {
            rest = &rest[1..];
        }

        let encryption_id = match rest.first() {
            Some(token) => parse_encryption_tag(token)?,
            None => None,
        };
        if let Some(id) = encryption_id {
            if !encryptions.contains(id) {
                return Err(PasschainError::UnknownEncryptionId(id));
            }
            rest = &rest[1..];
        }

        let Some((hash_token, segment_tokens)) = rest.split_last() else {
            return Err(PasschainError::InvalidFormat);
        };
        if segment_tokens.is_empty() {
            return Err(PasschainError::InvalidFormat);
        }

        let chain = segment_tokens
            .iter()
            .map(|token| ChainSegment::parse(token, algorithms))
            .collect::<PasschainResult<Vec<_>>>()?;

        let hash = BASE64_STANDARD.decode(hash_token)?;
        if hash.is_empty() {
            return Err(PasschainError::EmptyHash);
        }

        trace!(
            "Parsed hash record: {} segment(s), normalized={}, encryption={:?}",
            chain.len(),
            normalization.is_some(),
            encryption_id
        );

        Ok(Self::new(normalization, encryption_id, chain, hash))
    }

    /// Whether the password was normalized before hashing.
    #[must_use]
    pub const fn is_normalized(&self) -> bool {
        self.normalization.is_some()
    }

    /// The normalization version the password went through, if any.
    #[must_use]
    pub const fn normalization(&self) -> Option<NormalizationVersion> {
        self.normalization
    }

    /// Identifier of the parameter set the hash bytes are encrypted under.
    #[must_use]
    pub const fn encryption_id(&self) -> Option<u32> {
        self.encryption_id
    }

    /// Hashing steps, in application order. Never empty.
    #[must_use]
    pub fn chain(&self) -> &[ChainSegment] {
        &self.chain
    }

    /// Final hash bytes, encrypted if [`Self::encryption_id`] is set.
    #[must_use]
    pub fn hash_bytes(&self) -> &[u8] {
        &self.hash
    }

    /// Sum of iterations over all segments using `algorithm_id`.
    #[must_use]
    pub fn total_iterations(&self, algorithm_id: &str) -> u64 {
        self.chain
            .iter()
            .filter(|segment| segment.algorithm_id() == algorithm_id)
            .map(|segment| u64::from(segment.iterations()))
            .sum()
    }
}

impl Display for HashRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(version) = self.normalization {
            write!(f, "{}{TOKEN_SEPARATOR}", make_normalization_tag(version))?;
        }
        if let Some(id) = self.encryption_id {
            write!(f, "{}{TOKEN_SEPARATOR}", make_encryption_tag(id))?;
        }
        for segment in &self.chain {
            write!(f, "{segment}{TOKEN_SEPARATOR}")?;
        }
        write!(f, "{}", BASE64_STANDARD.encode(&self.hash))
    }
}

impl Debug for HashRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRecord")
            .field("normalization", &self.normalization)
            .field("encryption_id", &self.encryption_id)
            .field("chain", &self.chain)
            .field("hash", &format_args!("[{} bytes]", self.hash.len()))
            .finish()
    }
}
