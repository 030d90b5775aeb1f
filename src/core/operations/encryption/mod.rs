//! Encryption at rest for final hash bytes.
//!
//! An [`EncryptionAlgorithm`] is a pluggable cipher; [`EncryptionParams`]
//! binds a cipher to a key and to the integer identifier that is written
//! into hash strings as `#{id}`. Rotating keys means registering a new
//! parameter set as the main one and keeping the old one as legacy so
//! existing ciphertexts stay decryptable.
//!
//! Built-in ciphers:
//!
//! | Type | Key sizes | Output |
//! |------|-----------|--------|
//! | [`XChaCha20Blake2b`] | 32 | `nonce(32) ‖ ciphertext ‖ tag(32)` |
//! | [`AesCtrHmac`] | 16, 24, 32 | `nonce(16) ‖ ciphertext ‖ tag(48)` |
//!
//! Encryption draws a fresh nonce on every call, so encrypting the same
//! bytes twice never yields the same ciphertext.

mod aes_ctr;
mod xchacha;

use core::fmt::{self, Debug};
use std::sync::Arc;

use zeroize::Zeroizing;

use crate::core::error::{PasschainError, PasschainResult};
use crate::core::operations::random::RandomSource;

pub use aes_ctr::{AesCtrHmac, AES_CTR_NONCE_SIZE, AES_CTR_TAG_SIZE};
pub use xchacha::{XChaCha20Blake2b, XCHACHA_NONCE_SIZE, XCHACHA_TAG_SIZE};

/// A symmetric cipher used to encrypt hash bytes.
pub trait EncryptionAlgorithm: Debug + Send + Sync {
    /// Human-readable cipher name, used in errors.
    fn name(&self) -> &'static str;

    /// Whether `size` is an acceptable key length in bytes.
    fn is_valid_key_size(&self, size: usize) -> bool;

    /// Encrypts `data` under `key` using a nonce drawn from `random`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is rejected or the random source fails.
    fn encrypt(
        &self,
        key: &[u8],
        data: &[u8],
        random: &dyn RandomSource,
    ) -> PasschainResult<Vec<u8>>;

    /// Decrypts data produced by [`EncryptionAlgorithm::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns `PasschainError::AuthenticationFailed` if the data was not
    /// produced under this key or has been altered.
    fn decrypt(&self, key: &[u8], data: &[u8]) -> PasschainResult<Vec<u8>>;
}

/// A cipher, a key and the identifier they are recorded under.
///
/// # Security
///
/// - Key material is zeroized on drop
/// - Debug output redacts the key
#[derive(Clone)]
pub struct EncryptionParams {
    id: u32,
    algorithm: Arc<dyn EncryptionAlgorithm>,
    key: Zeroizing<Vec<u8>>,
}

impl EncryptionParams {
    /// Creates a parameter set, copying `key`.
    ///
    /// # Errors
    ///
    /// Returns `PasschainError::InvalidKeySize` if the cipher does not
    /// accept a key of this length.
    pub fn new<A>(id: u32, algorithm: A, key: &[u8]) -> PasschainResult<Self>
    where
        A: EncryptionAlgorithm + 'static,
    {
        Self::from_shared(id, Arc::new(algorithm), key)
    }

    /// Creates a parameter set around an already shared cipher.
    ///
    /// # Errors
    ///
    /// Returns `PasschainError::InvalidKeySize` if the cipher does not
    /// accept a key of this length.
    pub fn from_shared(
        id: u32,
        algorithm: Arc<dyn EncryptionAlgorithm>,
        key: &[u8],
    ) -> PasschainResult<Self> {
        if !algorithm.is_valid_key_size(key.len()) {
            return Err(PasschainError::InvalidKeySize {
                algorithm: algorithm.name(),
                size: key.len(),
            });
        }

        Ok(Self {
            id,
            algorithm,
            key: Zeroizing::new(key.to_vec()),
        })
    }

    /// The identifier written into hash strings.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// The cipher name.
    #[must_use]
    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.name()
    }

    /// Encrypts `data` with a fresh nonce.
    ///
    /// # Errors
    ///
    /// Propagates cipher and random source failures.
    pub fn encrypt(&self, data: &[u8], random: &dyn RandomSource) -> PasschainResult<Vec<u8>> {
        self.algorithm.encrypt(&self.key, data, random)
    }

    /// Decrypts `data`.
    ///
    /// # Errors
    ///
    /// Returns `PasschainError::AuthenticationFailed` on tampered data or a
    /// wrong key.
    pub fn decrypt(&self, data: &[u8]) -> PasschainResult<Vec<u8>> {
        self.algorithm.decrypt(&self.key, data)
    }
}

impl Debug for EncryptionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionParams")
            .field("id", &self.id)
            .field("algorithm", &self.algorithm.name())
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::operations::random::OsRandom;

    #[test]
    fn test_new_validates_key_size() {
        let result = EncryptionParams::new(1, XChaCha20Blake2b, &[0u8; 16]);
        assert!(matches!(
            result,
            Err(PasschainError::InvalidKeySize { size: 16, .. })
        ));

        let result = EncryptionParams::new(1, AesCtrHmac, &[0u8; 20]);
        assert!(matches!(
            result,
            Err(PasschainError::InvalidKeySize { size: 20, .. })
        ));
    }

    #[test]
    fn test_roundtrip_through_params() -> PasschainResult<()> {
        let params = EncryptionParams::new(9, XChaCha20Blake2b, &[0x42u8; 32])?;
        assert_eq!(params.id(), 9);
        assert_eq!(params.algorithm_name(), "xchacha20-blake2b");

        let ciphertext = params.encrypt(b"hash bytes", &OsRandom)?;
        assert_eq!(params.decrypt(&ciphertext)?, b"hash bytes");
        Ok(())
    }

    #[test]
    fn test_wrong_key_fails_authentication() -> PasschainResult<()> {
        let params = EncryptionParams::new(1, AesCtrHmac, &[0x01u8; 32])?;
        let other = EncryptionParams::new(2, AesCtrHmac, &[0x02u8; 32])?;

        let ciphertext = params.encrypt(b"hash bytes", &OsRandom)?;
        let result = other.decrypt(&ciphertext);
        assert!(matches!(result, Err(PasschainError::AuthenticationFailed)));
        Ok(())
    }

    #[test]
    fn test_debug_redacts_key() -> PasschainResult<()> {
        let params = EncryptionParams::new(3, XChaCha20Blake2b, &[0xABu8; 32])?;
        let debug_str = format!("{params:?}");
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("171")); // 0xAB
        Ok(())
    }
}
