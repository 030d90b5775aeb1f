//! Argon2id hash algorithm.
//!
//! The chain iteration count maps onto the Argon2 time cost. Memory and
//! lane count are fixed per instance, so changing them requires a new
//! identifier if existing hashes must stay verifiable.

use argon2::{Algorithm, Argon2, Params, Version};

use super::HashAlgorithm;
use crate::core::error::{PasschainError, PasschainResult};

/// Default memory cost: 19 MiB.
pub const ARGON2_DEFAULT_MEMORY_KIB: u32 = 19 * 1024;

/// Default output size (32 bytes).
pub const ARGON2_OUTPUT_SIZE: usize = 32;

/// Argon2id (version 0x13) with fixed memory and parallelism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argon2id {
    memory_kib: u32,
    lanes: u32,
    output_len: usize,
}

impl Default for Argon2id {
    fn default() -> Self {
        Self::new(ARGON2_DEFAULT_MEMORY_KIB, 1)
    }
}

impl Argon2id {
    /// Creates an Argon2id algorithm with the given memory cost and lane count.
    #[must_use]
    pub const fn new(memory_kib: u32, lanes: u32) -> Self {
        Self {
            memory_kib,
            lanes,
            output_len: ARGON2_OUTPUT_SIZE,
        }
    }

    /// Overrides the output length in bytes.
    #[must_use]
    pub const fn with_output_len(mut self, output_len: usize) -> Self {
        self.output_len = output_len;
        self
    }

    /// Memory cost in KiB.
    #[must_use]
    pub const fn memory_kib(&self) -> u32 {
        self.memory_kib
    }

    /// Degree of parallelism.
    #[must_use]
    pub const fn lanes(&self) -> u32 {
        self.lanes
    }
}

impl HashAlgorithm for Argon2id {
    fn id(&self) -> &str {
        "argon2id"
    }

    fn hash(&self, password: &[u8], salt: &[u8], iterations: u32) -> PasschainResult<Vec<u8>> {
        if iterations == 0 {
            return Err(PasschainError::InvalidIterations);
        }

        let params = Params::new(
            self.memory_kib,
            iterations,
            self.lanes,
            Some(self.output_len),
        )
        .map_err(|_| PasschainError::CryptoError)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut output = vec![0u8; self.output_len];
        argon2
            .hash_password_into(password, salt, &mut output)
            .map_err(|_| PasschainError::CryptoError)?;

        Ok(output)
    }

    fn default_iterations(&self) -> u32 {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Small memory cost for fast tests
    fn test_algorithm() -> Argon2id {
        Argon2id::new(64, 1)
    }

    #[test]
    fn test_known_output() -> PasschainResult<()> {
        let out = test_algorithm().hash(b"password", b"saltsalt", 2)?;
        assert_eq!(
            hex::encode(&out),
            "e74503f7bcb438e4d537b71ad25022224c4015b2683bc218324a48dcea3a6a46"
        );
        Ok(())
    }

    #[test]
    fn test_iterations_change_output() -> PasschainResult<()> {
        let a = test_algorithm().hash(b"password", b"saltsalt", 1)?;
        let b = test_algorithm().hash(b"password", b"saltsalt", 2)?;
        assert_ne!(a, b);
        Ok(())
    }

    #[test]
    fn test_output_len_override() -> PasschainResult<()> {
        let out = test_algorithm()
            .with_output_len(48)
            .hash(b"password", b"saltsalt", 1)?;
        assert_eq!(out.len(), 48);
        Ok(())
    }

    #[test]
    fn test_short_salt_rejected() {
        let result = test_algorithm().hash(b"password", b"salt", 1);
        assert!(matches!(result, Err(PasschainError::CryptoError)));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let result = test_algorithm().hash(b"password", b"saltsalt", 0);
        assert!(matches!(result, Err(PasschainError::InvalidIterations)));
    }

    #[test]
    fn test_defaults() {
        let algorithm = Argon2id::default();
        assert_eq!(algorithm.id(), "argon2id");
        assert_eq!(algorithm.memory_kib(), ARGON2_DEFAULT_MEMORY_KIB);
        assert_eq!(algorithm.lanes(), 1);
        assert_eq!(algorithm.default_iterations(), 2);
    }
}
