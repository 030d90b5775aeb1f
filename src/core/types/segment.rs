//! `ChainSegment` - one hashing step of a record.
//!
//! Format: `{algorithm-id}:{iterations}:{base64(salt)}`

use core::fmt::{self, Display};

use base64::prelude::*;

use crate::core::error::{PasschainError, PasschainResult};
use crate::core::header::{parse_decimal, FIELD_SEPARATOR};
use crate::core::registry::AlgorithmRegistry;

/// One `(algorithm, iterations, salt)` step in a hash chain.
///
/// The output of segment *i* is the password input of segment *i + 1*.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainSegment {
    algorithm_id: String,
    iterations: u32,
    salt: Vec<u8>,
}

impl ChainSegment {
    pub(crate) fn new(algorithm_id: impl Into<String>, iterations: u32, salt: Vec<u8>) -> Self {
        Self {
            algorithm_id: algorithm_id.into(),
            iterations,
            salt,
        }
    }

    /// Identifier of the algorithm that produced this step.
    #[must_use]
    pub fn algorithm_id(&self) -> &str {
        &self.algorithm_id
    }

    /// Iteration count of this step.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Raw salt bytes.
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Parses a segment token, resolving its algorithm against `algorithms`.
    ///
    /// # Errors
    ///
    /// - `PasschainError::InvalidFormat` if the token does not have three fields
    ///   or the salt is empty
    /// - `PasschainError::UnknownAlgorithm` if the algorithm is not registered
    /// - `PasschainError::InvalidInteger` if the iteration count is not a positive integer
    /// - `PasschainError::Base64Decode` if the salt is not valid base64
    pub(crate) fn parse(token: &str, algorithms: &AlgorithmRegistry) -> PasschainResult<Self> {
        let mut fields = token.split(FIELD_SEPARATOR);
        let (Some(algorithm_id), Some(iterations), Some(salt), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(PasschainError::InvalidFormat);
        };

        if !algorithms.contains(algorithm_id) {
            return Err(PasschainError::UnknownAlgorithm(algorithm_id.to_string()));
        }

        let iterations = parse_decimal(iterations)?;
        if iterations == 0 {
            return Err(PasschainError::InvalidInteger);
        }

        let salt = BASE64_STANDARD.decode(salt)?;
        if salt.is_empty() {
            return Err(PasschainError::InvalidFormat);
        }

        Ok(Self::new(algorithm_id, iterations, salt))
    }
}

impl Display for ChainSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            self.algorithm_id,
            self.iterations,
            BASE64_STANDARD.encode(&self.salt)
        )
    }
}
