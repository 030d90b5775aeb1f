//! Random byte sources for salts and nonces.
//!
//! Every component that needs randomness receives a [`RandomSource`] from the
//! hasher instead of reaching for a global generator. The default source,
//! [`OsRandom`], reads from the operating system CSPRNG and is safe to share
//! across threads.

use core::fmt::Debug;

use crate::core::error::{PasschainError, PasschainResult};

/// A cryptographically secure source of random bytes.
///
/// Implementations must be usable concurrently from multiple threads.
pub trait RandomSource: Debug + Send + Sync {
    /// Fills `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns `PasschainError::CryptoError` if the source is unavailable.
    fn fill_bytes(&self, dest: &mut [u8]) -> PasschainResult<()>;
}

/// Operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> PasschainResult<()> {
        use rand_core::{OsRng, TryRngCore};

        OsRng
            .try_fill_bytes(dest)
            .map_err(|_| PasschainError::CryptoError)
    }
}

/// Returns `len` fresh random bytes from `source`.
pub(crate) fn random_bytes(source: &dyn RandomSource, len: usize) -> PasschainResult<Vec<u8>> {
    let mut bytes = vec![0u8; len];
    source.fill_bytes(&mut bytes)?;
    Ok(bytes)
}

/// Deterministic source for tests: every call writes `0, 1, 2, ...`.
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CountingRandom;

#[cfg(test)]
impl RandomSource for CountingRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> PasschainResult<()> {
        for (i, byte) in dest.iter_mut().enumerate() {
            *byte = i as u8;
        }
        Ok(())
    }
}
