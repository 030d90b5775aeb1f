//! `PasswordHasher` - the hash chain policy.
//!
//! A stored hash is a chain of `(algorithm, iterations, salt)` segments where
//! each segment hashes the previous segment's output. That makes it possible
//! to strengthen a stored hash without the password: [`PasswordHasher::update`]
//! feeds the current final bytes through one more segment of the main
//! algorithm until the total iteration count reaches the configured target,
//! and re-encrypts the result under the current encryption key.
//!
//! Changes that do need the password (switching to a different main
//! algorithm, collapsing a long chain, toggling normalization) are reported
//! by [`PasswordHasher::requires_rehash`] and performed with
//! [`PasswordHasher::rehash`] at the next successful login.
//!
//! # Example
//!
//! ```rust
//! use passchain::core::hasher::PasswordHasher;
//! use passchain::core::operations::algorithm::Pbkdf2;
//!
//! let old = PasswordHasher::builder(Pbkdf2::sha256()).iterations(1_000).build().unwrap();
//! let stored = old.hash("hunter2").unwrap();
//!
//! // Later the target is raised; stored hashes are strengthened offline.
//! let new = PasswordHasher::builder(Pbkdf2::sha256()).iterations(3_000).build().unwrap();
//! assert!(new.requires_update(&stored).unwrap());
//!
//! let strengthened = new.update(&stored).unwrap().unwrap();
//! assert!(new.verify(&strengthened, "hunter2").unwrap());
//! assert!(new.update(&strengthened).unwrap().is_none());
//! ```

use std::sync::Arc;

use log::{debug, trace, warn};
use zeroize::Zeroizing;

use crate::core::config::{HasherBuilder, HasherConfig};
use crate::core::error::{PasschainError, PasschainResult};
use crate::core::operations::algorithm::HashAlgorithm;
use crate::core::operations::compare::constant_time_eq;
use crate::core::operations::normalize::normalize;
use crate::core::operations::random::random_bytes;
use crate::core::types::{ChainSegment, HashRecord};
use crate::core::version::NormalizationVersion;

/// Result of [`PasswordHasher::verify_and_update`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum VerifyOutcome {
    /// The password does not match.
    Mismatch,
    /// The password matches.
    Match {
        /// Replacement hash to store, if the stored one is outdated.
        upgraded: Option<String>,
    },
}

impl VerifyOutcome {
    /// Whether the password matched.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }

    /// The replacement hash, if one was produced.
    #[must_use]
    pub fn upgraded(&self) -> Option<&str> {
        match self {
            Self::Match {
                upgraded: Some(hash),
            } => Some(hash.as_str()),
            _ => None,
        }
    }
}

/// Hashes, verifies and migrates password hashes.
///
/// Cheap to clone and safe to share across threads; the configuration is
/// immutable after construction.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    config: Arc<HasherConfig>,
}

impl PasswordHasher {
    /// Starts a [`HasherBuilder`] with `main_algorithm`.
    #[must_use]
    pub fn builder<A: HashAlgorithm + 'static>(main_algorithm: A) -> HasherBuilder {
        HasherBuilder::new(main_algorithm)
    }

    /// Wraps an already validated configuration.
    #[must_use]
    pub fn from_config(config: HasherConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    /// Parses a hash string against this hasher's registries.
    ///
    /// # Errors
    ///
    /// See [`HashRecord::parse`].
    pub fn parse(&self, hash: &str) -> PasschainResult<HashRecord> {
        HashRecord::parse(hash, self.config.algorithms(), self.config.encryptions())
    }

    /// Hashes a password with the main algorithm.
    ///
    /// The result has a single segment and carries the normalization and
    /// encryption tags the configuration asks for.
    ///
    /// # Errors
    ///
    /// - `PasschainError::EmptyPassword` if `password` is empty
    /// - `PasschainError::Normalization` if normalization is enabled and the
    ///   password contains a disallowed code point
    pub fn hash(&self, password: &str) -> PasschainResult<String> {
        ensure_not_empty(password)?;

        if self.config.normalize() {
            let normalized = Zeroizing::new(normalize(password)?);
            self.hash_prepared(Some(NormalizationVersion::CURRENT), normalized.as_bytes())
        } else {
            self.hash_prepared(None, password.as_bytes())
        }
    }

    /// Like [`PasswordHasher::hash`], but never fails on normalization.
    ///
    /// If normalization is enabled and the password cannot be normalized, the
    /// raw password is hashed and the record carries no normalization tag.
    ///
    /// # Errors
    ///
    /// Returns `PasschainError::EmptyPassword` if `password` is empty.
    pub fn rehash(&self, password: &str) -> PasschainResult<String> {
        ensure_not_empty(password)?;

        if self.config.normalize() {
            match normalize(password) {
                Ok(normalized) => {
                    let normalized = Zeroizing::new(normalized);
                    return self
                        .hash_prepared(Some(NormalizationVersion::CURRENT), normalized.as_bytes());
                }
                Err(e) => {
                    warn!("Password cannot be normalized ({e}); rehashing without normalization");
                }
            }
        }

        self.hash_prepared(None, password.as_bytes())
    }

    /// Checks a password against a stored hash.
    ///
    /// A password that cannot be normalized never matches a normalized record;
    /// that is reported as `Ok(false)`, not as an error.
    ///
    /// # Errors
    ///
    /// - `PasschainError::EmptyPassword` if `password` is empty
    /// - Any parse error from [`PasswordHasher::parse`]
    /// - `PasschainError::AuthenticationFailed` if the encrypted hash bytes do
    ///   not decrypt under the registered key
    pub fn verify(&self, hash: &str, password: &str) -> PasschainResult<bool> {
        ensure_not_empty(password)?;

        let record = self.parse(hash)?;
        let expected = self.open(&record)?;

        let input = if record.is_normalized() {
            match normalize(password) {
                Ok(normalized) => Zeroizing::new(normalized.into_bytes()),
                Err(_) => {
                    debug!("Password cannot be normalized; it cannot match a normalized record");
                    return Ok(false);
                }
            }
        } else {
            Zeroizing::new(password.as_bytes().to_vec())
        };

        let computed = self.apply_chain(&record, &input)?;
        Ok(constant_time_eq(&computed, &expected))
    }

    /// Whether the hash should be replaced by [`PasswordHasher::rehash`]
    /// the next time the password is known.
    ///
    /// True when normalization should be added or dropped, the encryption
    /// parameter set differs from the main one, the chain has more than one
    /// segment, or its single segment does not use the main algorithm at the
    /// main iteration count. A record without normalization is not flagged
    /// if the password itself cannot be normalized.
    ///
    /// # Errors
    ///
    /// - `PasschainError::EmptyPassword` if `password` is empty
    /// - Any parse error from [`PasswordHasher::parse`]
    pub fn requires_rehash(&self, hash: &str, password: &str) -> PasschainResult<bool> {
        ensure_not_empty(password)?;

        let record = self.parse(hash)?;
        let config = &self.config;

        if !record.is_normalized() && config.normalize() && normalize(password).is_ok() {
            debug!("Rehash required: record is not normalized");
            return Ok(true);
        }

        if record.is_normalized() && !config.normalize() {
            debug!("Rehash required: normalization is disabled");
            return Ok(true);
        }

        if record.encryption_id() != config.main_encryption_id() {
            debug!(
                "Rehash required: encryption {:?} differs from {:?}",
                record.encryption_id(),
                config.main_encryption_id()
            );
            return Ok(true);
        }

        let [segment] = record.chain() else {
            debug!("Rehash required: chain has {} segments", record.chain().len());
            return Ok(true);
        };

        if segment.algorithm_id() != config.main_algorithm().id()
            || segment.iterations() != config.main_iterations()
        {
            debug!(
                "Rehash required: segment {}:{} differs from main configuration",
                segment.algorithm_id(),
                segment.iterations()
            );
            return Ok(true);
        }

        Ok(false)
    }

    /// Whether [`PasswordHasher::update`] would change the hash.
    ///
    /// # Errors
    ///
    /// Any parse error from [`PasswordHasher::parse`].
    pub fn requires_update(&self, hash: &str) -> PasschainResult<bool> {
        let record = self.parse(hash)?;
        Ok(self.missing_iterations(&record) > 0 || !self.encryption_current(&record))
    }

    /// Strengthens a hash without the password.
    ///
    /// Appends one segment of the main algorithm covering the iterations the
    /// chain is missing, and re-encrypts the final bytes under the main
    /// encryption parameter set. The normalization tag is kept as is.
    /// Returns `Ok(None)` when nothing needs to change.
    ///
    /// # Errors
    ///
    /// - Any parse error from [`PasswordHasher::parse`]
    /// - `PasschainError::AuthenticationFailed` if the stored ciphertext does
    ///   not decrypt
    pub fn update(&self, hash: &str) -> PasschainResult<Option<String>> {
        let record = self.parse(hash)?;
        let missing = self.missing_iterations(&record);
        let encryption_current = self.encryption_current(&record);

        if missing == 0 && encryption_current {
            trace!("Hash is current; no update");
            return Ok(None);
        }

        let mut current = self.open(&record)?;
        let mut chain = record.chain().to_vec();

        if missing > 0 {
            let algorithm = self.config.main_algorithm();
            let salt = random_bytes(self.config.random(), self.config.salt_size())?;
            current = Zeroizing::new(algorithm.hash(&current, &salt, missing)?);
            chain.push(ChainSegment::new(algorithm.id(), missing, salt));
            debug!(
                "Appended {} segment with {missing} iterations (chain length {})",
                algorithm.id(),
                chain.len()
            );
        }

        if !encryption_current {
            debug!(
                "Re-encrypting hash from {:?} to {:?}",
                record.encryption_id(),
                self.config.main_encryption_id()
            );
        }

        let (encryption_id, sealed) = self.seal(&current)?;
        let updated = HashRecord::new(record.normalization(), encryption_id, chain, sealed);
        Ok(Some(updated.to_string()))
    }

    /// Verifies a password and, on a match, produces a replacement hash when
    /// the stored one is outdated.
    ///
    /// A full [`PasswordHasher::rehash`] is preferred when
    /// [`PasswordHasher::requires_rehash`] holds; otherwise the result of
    /// [`PasswordHasher::update`] is used.
    ///
    /// # Errors
    ///
    /// Same as [`PasswordHasher::verify`].
    pub fn verify_and_update(&self, hash: &str, password: &str) -> PasschainResult<VerifyOutcome> {
        if !self.verify(hash, password)? {
            return Ok(VerifyOutcome::Mismatch);
        }

        let upgraded = if self.requires_rehash(hash, password)? {
            Some(self.rehash(password)?)
        } else {
            self.update(hash)?
        };

        Ok(VerifyOutcome::Match { upgraded })
    }

    fn hash_prepared(
        &self,
        normalization: Option<NormalizationVersion>,
        password: &[u8],
    ) -> PasschainResult<String> {
        let algorithm = self.config.main_algorithm();
        let iterations = self.config.main_iterations();
        let salt = random_bytes(self.config.random(), self.config.salt_size())?;

        let output = Zeroizing::new(algorithm.hash(password, &salt, iterations)?);
        let (encryption_id, sealed) = self.seal(&output)?;

        let record = HashRecord::new(
            normalization,
            encryption_id,
            vec![ChainSegment::new(algorithm.id(), iterations, salt)],
            sealed,
        );
        Ok(record.to_string())
    }

    /// Runs every segment of the chain over `input`.
    fn apply_chain(&self, record: &HashRecord, input: &[u8]) -> PasschainResult<Zeroizing<Vec<u8>>> {
        let algorithms = self.config.algorithms();
        let mut current = Zeroizing::new(input.to_vec());
        for segment in record.chain() {
            let algorithm = algorithms.resolve(segment.algorithm_id())?;
            current = Zeroizing::new(algorithm.hash(&current, segment.salt(), segment.iterations())?);
        }
        Ok(current)
    }

    /// Plain final hash bytes of a record.
    fn open(&self, record: &HashRecord) -> PasschainResult<Zeroizing<Vec<u8>>> {
        let bytes = match record.encryption_id() {
            Some(id) => {
                let params = self.config.encryptions().resolve(id)?;
                Zeroizing::new(params.decrypt(record.hash_bytes())?)
            }
            None => Zeroizing::new(record.hash_bytes().to_vec()),
        };
        if bytes.is_empty() {
            return Err(PasschainError::EmptyHash);
        }
        Ok(bytes)
    }

    /// Encrypts final hash bytes under the main parameter set, if any.
    fn seal(&self, bytes: &[u8]) -> PasschainResult<(Option<u32>, Vec<u8>)> {
        match self.config.main_encryption() {
            Some(params) => Ok((
                Some(params.id()),
                params.encrypt(bytes, self.config.random())?,
            )),
            None => Ok((None, bytes.to_vec())),
        }
    }

    /// Main-algorithm iterations still needed to reach the target.
    fn missing_iterations(&self, record: &HashRecord) -> u32 {
        let done = record.total_iterations(self.config.main_algorithm().id());
        let done = u32::try_from(done).unwrap_or(u32::MAX);
        self.config.main_iterations().saturating_sub(done)
    }

    fn encryption_current(&self, record: &HashRecord) -> bool {
        record.encryption_id() == self.config.main_encryption_id()
    }
}

fn ensure_not_empty(password: &str) -> PasschainResult<()> {
    if password.is_empty() {
        return Err(PasschainError::EmptyPassword);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::header::split_tokens;
    use crate::core::operations::algorithm::Pbkdf2;
    use crate::core::operations::encryption::{AesCtrHmac, EncryptionParams, XChaCha20Blake2b};
    use crate::core::operations::random::CountingRandom;

    const PASSWORD: &str = "wi4efunes4vq324rf";

    fn hasher(iterations: u32) -> PasschainResult<PasswordHasher> {
        PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(iterations)
            .build()
    }

    fn xchacha(id: u32, fill: u8) -> PasschainResult<EncryptionParams> {
        EncryptionParams::new(id, XChaCha20Blake2b, &[fill; 32])
    }

    #[test]
    fn test_thread_safety() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PasswordHasher>();
        assert_send_sync::<HasherConfig>();
        assert_send_sync::<HashRecord>();
    }

    #[test]
    fn test_hash_and_verify() -> PasschainResult<()> {
        let hasher = hasher(1000)?;
        let hash = hasher.hash(PASSWORD)?;
        assert_eq!(split_tokens(&hash).len(), 2);
        assert!(hash.starts_with("pbkdf2-sha256:1000:"));
        assert!(hasher.verify(&hash, PASSWORD)?);
        assert!(!hasher.verify(&hash, "12345")?);
        Ok(())
    }

    #[test]
    fn test_hash_is_salted() -> PasschainResult<()> {
        let hasher = hasher(10)?;
        assert_ne!(hasher.hash(PASSWORD)?, hasher.hash(PASSWORD)?);
        Ok(())
    }

    #[test]
    fn test_deterministic_with_fixed_random() -> PasschainResult<()> {
        let hasher = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(2)
            .salt_size(8)
            .random_source(CountingRandom)
            .build()?;
        let hash = hasher.hash("password")?;
        // salt = 00 01 02 .. 07
        assert!(hash.starts_with("pbkdf2-sha256:2:AAECAwQFBgc= "));
        assert_eq!(hash, hasher.hash("password")?);
        Ok(())
    }

    #[test]
    fn test_empty_password() -> PasschainResult<()> {
        let hasher = hasher(10)?;
        let hash = hasher.hash(PASSWORD)?;
        assert!(matches!(hasher.hash(""), Err(PasschainError::EmptyPassword)));
        assert!(matches!(hasher.rehash(""), Err(PasschainError::EmptyPassword)));
        assert!(matches!(hasher.verify(&hash, ""), Err(PasschainError::EmptyPassword)));
        assert!(matches!(
            hasher.requires_rehash(&hash, ""),
            Err(PasschainError::EmptyPassword)
        ));
        Ok(())
    }

    #[test]
    fn test_token_counts() -> PasschainResult<()> {
        let plain = hasher(10)?;
        let normalized = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .normalize(true)
            .build()?;
        let encrypted = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .encryption(xchacha(1, 7)?)
            .build()?;
        let both = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .normalize(true)
            .encryption(xchacha(1, 7)?)
            .build()?;

        assert_eq!(split_tokens(&plain.hash(PASSWORD)?).len(), 2);
        assert_eq!(split_tokens(&normalized.hash(PASSWORD)?).len(), 3);
        assert_eq!(split_tokens(&encrypted.hash(PASSWORD)?).len(), 3);

        let hash = both.hash(PASSWORD)?;
        let tokens = split_tokens(&hash);
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0], "!1");
        assert_eq!(tokens[1], "#1");
        assert!(both.verify(&hash, PASSWORD)?);
        Ok(())
    }

    #[test]
    fn test_normalized_spellings_match() -> PasschainResult<()> {
        let hasher = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .normalize(true)
            .build()?;
        let hash = hasher.hash("correct\u{00A0}horse")?;
        assert!(hasher.verify(&hash, "correct horse")?);
        assert!(hasher.verify(&hash, "correct\u{3000}horse")?);

        let hash = hasher.hash("cafe\u{0301}")?;
        assert!(hasher.verify(&hash, "caf\u{00E9}")?);
        Ok(())
    }

    #[test]
    fn test_hash_rejects_unnormalizable_password() -> PasschainResult<()> {
        let hasher = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .normalize(true)
            .build()?;
        let result = hasher.hash("pass\u{200B}word");
        assert!(matches!(result, Err(PasschainError::Normalization(_))));
        Ok(())
    }

    #[test]
    fn test_rehash_falls_back_without_normalization() -> PasschainResult<()> {
        let hasher = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .normalize(true)
            .build()?;
        let password = "pass\u{200B}word";
        let hash = hasher.rehash(password)?;
        assert!(!hasher.parse(&hash)?.is_normalized());
        assert!(hasher.verify(&hash, password)?);
        // Still no way to normalize, so nothing more to do
        assert!(!hasher.requires_rehash(&hash, password)?);
        Ok(())
    }

    #[test]
    fn test_unnormalizable_password_never_matches_normalized_record() -> PasschainResult<()> {
        let hasher = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .normalize(true)
            .build()?;
        let hash = hasher.hash("password")?;
        assert!(!hasher.verify(&hash, "pass\u{200B}word")?);
        Ok(())
    }

    #[test]
    fn test_update_appends_segment() -> PasschainResult<()> {
        let old = hasher(1000)?;
        let new = hasher(3000)?;

        let hash = old.hash(PASSWORD)?;
        assert!(!old.requires_update(&hash)?);
        assert!(new.requires_update(&hash)?);

        let updated = new.update(&hash)?.ok_or(PasschainError::InvalidFormat)?;
        let record = new.parse(&updated)?;
        assert_eq!(split_tokens(&updated).len(), 3);
        assert_eq!(record.chain()[1].iterations(), 2000);
        assert_eq!(record.total_iterations("pbkdf2-sha256"), 3000);

        assert!(new.verify(&updated, PASSWORD)?);
        assert!(!new.verify(&updated, "12345")?);
        assert!(!new.requires_update(&updated)?);
        assert_eq!(new.update(&updated)?, None);
        Ok(())
    }

    #[test]
    fn test_update_ignores_lower_target() -> PasschainResult<()> {
        let hash = hasher(2000)?.hash(PASSWORD)?;
        let lower = hasher(1000)?;
        assert!(!lower.requires_update(&hash)?);
        assert_eq!(lower.update(&hash)?, None);
        // A single segment above target still warrants a full rehash
        assert!(lower.requires_rehash(&hash, PASSWORD)?);
        Ok(())
    }

    #[test]
    fn test_update_switches_main_algorithm() -> PasschainResult<()> {
        let old = hasher(1000)?;
        let new = PasswordHasher::builder(Pbkdf2::sha512())
            .iterations(500)
            .legacy_algorithm(Pbkdf2::sha256())
            .build()?;

        let hash = old.hash(PASSWORD)?;
        let updated = new.update(&hash)?.ok_or(PasschainError::InvalidFormat)?;
        let record = new.parse(&updated)?;
        assert_eq!(record.chain().len(), 2);
        assert_eq!(record.chain()[1].algorithm_id(), "pbkdf2-sha512");
        assert_eq!(record.chain()[1].iterations(), 500);
        assert!(new.verify(&updated, PASSWORD)?);
        assert!(new.requires_rehash(&updated, PASSWORD)?);
        Ok(())
    }

    #[test]
    fn test_update_preserves_normalization_tag() -> PasschainResult<()> {
        let old = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .normalize(true)
            .build()?;
        let new = hasher(20)?;

        let hash = old.hash("a\u{00A0}b")?;
        let updated = new.update(&hash)?.ok_or(PasschainError::InvalidFormat)?;
        assert!(updated.starts_with("!1 "));
        assert!(new.verify(&updated, "a b")?);
        Ok(())
    }

    #[test]
    fn test_update_rotates_encryption() -> PasschainResult<()> {
        let old = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .encryption(xchacha(1, 7)?)
            .build()?;
        let new = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .encryption(EncryptionParams::new(2, AesCtrHmac, &[9u8; 32])?)
            .legacy_encryption(xchacha(1, 7)?)
            .build()?;

        let hash = old.hash(PASSWORD)?;
        assert!(new.verify(&hash, PASSWORD)?);
        assert!(new.requires_update(&hash)?);

        let updated = new.update(&hash)?.ok_or(PasschainError::InvalidFormat)?;
        let record = new.parse(&updated)?;
        assert_eq!(record.encryption_id(), Some(2));
        assert_eq!(record.chain().len(), 1);
        assert!(new.verify(&updated, PASSWORD)?);
        assert_eq!(new.update(&updated)?, None);
        Ok(())
    }

    #[test]
    fn test_update_removes_encryption() -> PasschainResult<()> {
        let old = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .encryption(xchacha(1, 7)?)
            .build()?;
        let new = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .legacy_encryption(xchacha(1, 7)?)
            .build()?;

        let hash = old.hash(PASSWORD)?;
        let updated = new.update(&hash)?.ok_or(PasschainError::InvalidFormat)?;
        assert_eq!(split_tokens(&updated).len(), 2);
        assert!(new.verify(&updated, PASSWORD)?);
        Ok(())
    }

    #[test]
    fn test_wrong_key_is_an_error() -> PasschainResult<()> {
        let old = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .encryption(xchacha(1, 7)?)
            .build()?;
        let other = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .encryption(xchacha(1, 8)?)
            .build()?;

        let hash = old.hash(PASSWORD)?;
        assert!(matches!(
            other.verify(&hash, PASSWORD),
            Err(PasschainError::AuthenticationFailed)
        ));
        Ok(())
    }

    #[test]
    fn test_empty_plaintext_is_rejected() -> PasschainResult<()> {
        use base64::{engine::general_purpose::STANDARD, Engine};

        let params = xchacha(1, 7)?;
        let ciphertext = params.encrypt(&[], &CountingRandom)?;
        let hash = format!("#1 pbkdf2-sha256:10:c2FsdA== {}", STANDARD.encode(ciphertext));
        let hasher = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(20)
            .encryption(params)
            .build()?;

        assert!(matches!(
            hasher.verify(&hash, PASSWORD),
            Err(PasschainError::EmptyHash)
        ));
        assert!(matches!(hasher.update(&hash), Err(PasschainError::EmptyHash)));
        Ok(())
    }

    #[test]
    fn test_unknown_encryption_id_is_a_format_error() -> PasschainResult<()> {
        let old = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .encryption(xchacha(4, 7)?)
            .build()?;
        let hash = old.hash(PASSWORD)?;
        let result = hasher(10)?.verify(&hash, PASSWORD);
        assert!(matches!(result, Err(PasschainError::UnknownEncryptionId(4))));
        Ok(())
    }

    #[test]
    fn test_unknown_algorithm_is_a_format_error() -> PasschainResult<()> {
        let hash = PasswordHasher::builder(Pbkdf2::sha384())
            .iterations(10)
            .build()?
            .hash(PASSWORD)?;
        let result = hasher(10)?.verify(&hash, PASSWORD);
        assert!(matches!(result, Err(PasschainError::UnknownAlgorithm(_))));
        Ok(())
    }

    #[test]
    fn test_requires_rehash_current_hash() -> PasschainResult<()> {
        let hasher = hasher(10)?;
        let hash = hasher.hash(PASSWORD)?;
        assert!(!hasher.requires_rehash(&hash, PASSWORD)?);
        Ok(())
    }

    #[test]
    fn test_requires_rehash_normalization_changes() -> PasschainResult<()> {
        let plain = hasher(10)?;
        let normalizing = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .normalize(true)
            .build()?;

        let unnormalized = plain.hash(PASSWORD)?;
        assert!(normalizing.requires_rehash(&unnormalized, PASSWORD)?);

        let normalized = normalizing.hash(PASSWORD)?;
        assert!(plain.requires_rehash(&normalized, PASSWORD)?);
        assert!(!normalizing.requires_rehash(&normalized, PASSWORD)?);
        Ok(())
    }

    #[test]
    fn test_requires_rehash_encryption_differs() -> PasschainResult<()> {
        let plain = hasher(10)?;
        let encrypted = PasswordHasher::builder(Pbkdf2::sha256())
            .iterations(10)
            .encryption(xchacha(1, 7)?)
            .build()?;

        assert!(encrypted.requires_rehash(&plain.hash(PASSWORD)?, PASSWORD)?);
        Ok(())
    }

    #[test]
    fn test_requires_rehash_chained() -> PasschainResult<()> {
        let new = hasher(20)?;
        let updated = new
            .update(&hasher(10)?.hash(PASSWORD)?)?
            .ok_or(PasschainError::InvalidFormat)?;
        assert!(!new.requires_update(&updated)?);
        assert!(new.requires_rehash(&updated, PASSWORD)?);
        Ok(())
    }

    #[test]
    fn test_verify_and_update() -> PasschainResult<()> {
        let old = hasher(10)?;
        let new = hasher(30)?;
        let hash = old.hash(PASSWORD)?;

        assert_eq!(new.verify_and_update(&hash, "12345")?, VerifyOutcome::Mismatch);

        let outcome = new.verify_and_update(&hash, PASSWORD)?;
        assert!(outcome.is_match());
        let upgraded = outcome.upgraded().ok_or(PasschainError::InvalidFormat)?;
        let record = new.parse(upgraded)?;
        // A single-segment replacement: the password was available
        assert_eq!(record.chain().len(), 1);
        assert_eq!(record.chain()[0].iterations(), 30);

        let outcome = new.verify_and_update(upgraded, PASSWORD)?;
        assert_eq!(outcome, VerifyOutcome::Match { upgraded: None });
        Ok(())
    }

    #[test]
    fn test_rehash_produces_fresh_record() -> PasschainResult<()> {
        let new = PasswordHasher::builder(Pbkdf2::sha512())
            .iterations(15)
            .normalize(true)
            .encryption(xchacha(3, 1)?)
            .legacy_algorithm(Pbkdf2::sha256())
            .build()?;
        let hash = hasher(10)?.hash(PASSWORD)?;
        assert!(new.requires_rehash(&hash, PASSWORD)?);

        let rehashed = new.rehash(PASSWORD)?;
        let record = new.parse(&rehashed)?;
        assert!(record.is_normalized());
        assert_eq!(record.encryption_id(), Some(3));
        assert_eq!(record.chain().len(), 1);
        assert_eq!(record.chain()[0].algorithm_id(), "pbkdf2-sha512");
        assert!(!new.requires_rehash(&rehashed, PASSWORD)?);
        assert!(!new.requires_update(&rehashed)?);
        Ok(())
    }
}
