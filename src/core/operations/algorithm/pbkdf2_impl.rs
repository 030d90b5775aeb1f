//! PBKDF2-HMAC hash algorithms.

use hmac::Hmac;
use sha2::{Sha256, Sha384, Sha512};

use super::HashAlgorithm;
use crate::core::error::{PasschainError, PasschainResult};

/// Default PBKDF2 iteration profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2Params {
    /// Number of iterations.
    pub iterations: u32,
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self::moderate()
    }
}

impl Pbkdf2Params {
    /// Interactive profile: Fast, suitable for interactive logins.
    /// - Iterations: 100,000
    #[must_use]
    pub const fn interactive() -> Self {
        Self {
            iterations: 100_000,
        }
    }

    /// Moderate profile: Balanced security and performance.
    /// - Iterations: 310,000 (OWASP 2023 recommendation)
    #[must_use]
    pub const fn moderate() -> Self {
        Self {
            iterations: 310_000,
        }
    }

    /// Sensitive profile: High security, slower computation.
    /// - Iterations: 600,000
    #[must_use]
    pub const fn sensitive() -> Self {
        Self {
            iterations: 600_000,
        }
    }
}

/// Pseudo-random function used inside PBKDF2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pbkdf2Prf {
    /// HMAC-SHA256.
    Sha256,
    /// HMAC-SHA384.
    Sha384,
    /// HMAC-SHA512.
    Sha512,
}

/// PBKDF2 with an HMAC-SHA2 PRF. Output length equals the digest length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pbkdf2 {
    prf: Pbkdf2Prf,
}

impl Pbkdf2 {
    /// PBKDF2-HMAC-SHA256 (`pbkdf2-sha256`).
    #[must_use]
    pub const fn sha256() -> Self {
        Self {
            prf: Pbkdf2Prf::Sha256,
        }
    }

    /// PBKDF2-HMAC-SHA384 (`pbkdf2-sha384`).
    #[must_use]
    pub const fn sha384() -> Self {
        Self {
            prf: Pbkdf2Prf::Sha384,
        }
    }

    /// PBKDF2-HMAC-SHA512 (`pbkdf2-sha512`).
    #[must_use]
    pub const fn sha512() -> Self {
        Self {
            prf: Pbkdf2Prf::Sha512,
        }
    }

    /// Returns the PRF in use.
    #[must_use]
    pub const fn prf(&self) -> Pbkdf2Prf {
        self.prf
    }

    /// Returns the output length in bytes.
    #[must_use]
    pub const fn output_len(&self) -> usize {
        match self.prf {
            Pbkdf2Prf::Sha256 => 32,
            Pbkdf2Prf::Sha384 => 48,
            Pbkdf2Prf::Sha512 => 64,
        }
    }
}

impl HashAlgorithm for Pbkdf2 {
    fn id(&self) -> &str {
        match self.prf {
            Pbkdf2Prf::Sha256 => "pbkdf2-sha256",
            Pbkdf2Prf::Sha384 => "pbkdf2-sha384",
            Pbkdf2Prf::Sha512 => "pbkdf2-sha512",
        }
    }

    fn hash(&self, password: &[u8], salt: &[u8], iterations: u32) -> PasschainResult<Vec<u8>> {
        if iterations == 0 {
            return Err(PasschainError::InvalidIterations);
        }

        let mut output = vec![0u8; self.output_len()];
        match self.prf {
            Pbkdf2Prf::Sha256 => {
                pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, iterations, &mut output)
            }
            Pbkdf2Prf::Sha384 => {
                pbkdf2::pbkdf2::<Hmac<Sha384>>(password, salt, iterations, &mut output)
            }
            Pbkdf2Prf::Sha512 => {
                pbkdf2::pbkdf2::<Hmac<Sha512>>(password, salt, iterations, &mut output)
            }
        }
        .map_err(|_| PasschainError::CryptoError)?;

        Ok(output)
    }

    fn default_iterations(&self) -> u32 {
        Pbkdf2Params::default().iterations
    }
}
