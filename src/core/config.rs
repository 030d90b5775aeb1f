//! Hasher configuration and its builder.
//!
//! A [`HasherConfig`] is immutable once built. Every algorithm and
//! encryption parameter set it references is copied into frozen registries
//! at build time, so later changes on the caller's side cannot affect it.
//!
//! # Example
//!
//! ```rust
//! use passchain::core::config::HasherBuilder;
//! use passchain::core::operations::algorithm::{Pbkdf2, Pbkdf2Params};
//! use passchain::core::operations::encryption::{EncryptionParams, XChaCha20Blake2b};
//!
//! let key = [0x42u8; 32];
//! let config = HasherBuilder::new(Pbkdf2::sha512())
//!     .iterations(Pbkdf2Params::interactive().iterations)
//!     .salt_size(24)
//!     .normalize(true)
//!     .encryption(EncryptionParams::new(2, XChaCha20Blake2b, &key).unwrap())
//!     .legacy_algorithm(Pbkdf2::sha256())
//!     .build_config()
//!     .unwrap();
//!
//! assert_eq!(config.main_algorithm().id(), "pbkdf2-sha512");
//! assert_eq!(config.main_encryption_id(), Some(2));
//! assert!(config.algorithms().contains("pbkdf2-sha256"));
//! ```

use std::sync::Arc;

use crate::core::error::{PasschainError, PasschainResult};
use crate::core::hasher::PasswordHasher;
use crate::core::operations::algorithm::HashAlgorithm;
use crate::core::operations::encryption::EncryptionParams;
use crate::core::operations::random::{OsRandom, RandomSource};
use crate::core::registry::{AlgorithmRegistry, EncryptionRegistry};

/// Smallest accepted salt size in bytes.
pub const MIN_SALT_SIZE: usize = 8;

/// Largest accepted salt size in bytes.
pub const MAX_SALT_SIZE: usize = 32;

/// Salt size used when none is configured.
pub const DEFAULT_SALT_SIZE: usize = 16;

/// Validated, immutable hasher configuration.
#[derive(Debug, Clone)]
pub struct HasherConfig {
    main_algorithm: Arc<dyn HashAlgorithm>,
    main_iterations: u32,
    main_encryption: Option<EncryptionParams>,
    salt_size: usize,
    normalize: bool,
    algorithms: AlgorithmRegistry,
    encryptions: EncryptionRegistry,
    random: Arc<dyn RandomSource>,
}

impl HasherConfig {
    /// Algorithm used for new hashes and update segments.
    #[must_use]
    pub fn main_algorithm(&self) -> &Arc<dyn HashAlgorithm> {
        &self.main_algorithm
    }

    /// Target iteration count for the main algorithm.
    #[must_use]
    pub const fn main_iterations(&self) -> u32 {
        self.main_iterations
    }

    /// Parameter set new hashes are encrypted under, if any.
    #[must_use]
    pub fn main_encryption(&self) -> Option<&EncryptionParams> {
        self.main_encryption.as_ref()
    }

    /// Identifier of the main encryption parameter set, if any.
    #[must_use]
    pub fn main_encryption_id(&self) -> Option<u32> {
        self.main_encryption.as_ref().map(EncryptionParams::id)
    }

    /// Salt size in bytes for new segments.
    #[must_use]
    pub const fn salt_size(&self) -> usize {
        self.salt_size
    }

    /// Whether new hashes normalize the password first.
    #[must_use]
    pub const fn normalize(&self) -> bool {
        self.normalize
    }

    /// Main and legacy algorithms.
    #[must_use]
    pub const fn algorithms(&self) -> &AlgorithmRegistry {
        &self.algorithms
    }

    /// Main and legacy encryption parameter sets.
    #[must_use]
    pub const fn encryptions(&self) -> &EncryptionRegistry {
        &self.encryptions
    }

    /// Source of salts and nonces.
    #[must_use]
    pub fn random(&self) -> &dyn RandomSource {
        self.random.as_ref()
    }
}

/// Builder for [`HasherConfig`] and [`PasswordHasher`].
///
/// Defaults: the algorithm's own default iteration count, a 16-byte salt,
/// normalization disabled, no encryption and [`OsRandom`].
#[derive(Debug, Clone)]
pub struct HasherBuilder {
    main_algorithm: Arc<dyn HashAlgorithm>,
    iterations: Option<u32>,
    salt_size: usize,
    normalize: bool,
    encryption: Option<EncryptionParams>,
    legacy_algorithms: Vec<Arc<dyn HashAlgorithm>>,
    legacy_encryptions: Vec<EncryptionParams>,
    random: Arc<dyn RandomSource>,
}

impl HasherBuilder {
    /// Starts a builder around the main algorithm.
    #[must_use]
    pub fn new<A: HashAlgorithm + 'static>(main_algorithm: A) -> Self {
        Self::from_shared(Arc::new(main_algorithm))
    }

    /// Starts a builder around an already shared main algorithm.
    #[must_use]
    pub fn from_shared(main_algorithm: Arc<dyn HashAlgorithm>) -> Self {
        Self {
            main_algorithm,
            iterations: None,
            salt_size: DEFAULT_SALT_SIZE,
            normalize: false,
            encryption: None,
            legacy_algorithms: Vec::new(),
            legacy_encryptions: Vec::new(),
            random: Arc::new(OsRandom),
        }
    }

    /// Sets the main iteration count.
    #[must_use]
    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Sets the salt size in bytes (8 to 32).
    #[must_use]
    pub fn salt_size(mut self, salt_size: usize) -> Self {
        self.salt_size = salt_size;
        self
    }

    /// Enables or disables password normalization for new hashes.
    #[must_use]
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Encrypts new hashes under `params`.
    #[must_use]
    pub fn encryption(mut self, params: EncryptionParams) -> Self {
        self.encryption = Some(params);
        self
    }

    /// Registers an algorithm that existing hashes may still reference.
    #[must_use]
    pub fn legacy_algorithm<A: HashAlgorithm + 'static>(self, algorithm: A) -> Self {
        self.legacy_algorithm_shared(Arc::new(algorithm))
    }

    /// Registers an already shared legacy algorithm.
    #[must_use]
    pub fn legacy_algorithm_shared(mut self, algorithm: Arc<dyn HashAlgorithm>) -> Self {
        self.legacy_algorithms.push(algorithm);
        self
    }

    /// Registers a parameter set that existing hashes may still be encrypted under.
    #[must_use]
    pub fn legacy_encryption(mut self, params: EncryptionParams) -> Self {
        self.legacy_encryptions.push(params);
        self
    }

    /// Replaces the random source.
    #[must_use]
    pub fn random_source<R: RandomSource + 'static>(mut self, random: R) -> Self {
        self.random = Arc::new(random);
        self
    }

    /// Validates the settings and freezes them into a [`HasherConfig`].
    ///
    /// # Errors
    ///
    /// - `PasschainError::InvalidIterations` if the iteration count is zero
    /// - `PasschainError::InvalidSaltSize` if the salt size is outside 8 to 32
    /// - `PasschainError::InvalidAlgorithmId` for an empty or reserved identifier
    /// - `PasschainError::DuplicateAlgorithmId` / `PasschainError::DuplicateEncryptionId`
    ///   if main and legacy entries collide
    pub fn build_config(self) -> PasschainResult<HasherConfig> {
        let main_iterations = self
            .iterations
            .unwrap_or_else(|| self.main_algorithm.default_iterations());
        if main_iterations == 0 {
            return Err(PasschainError::InvalidIterations);
        }

        if !(MIN_SALT_SIZE..=MAX_SALT_SIZE).contains(&self.salt_size) {
            return Err(PasschainError::InvalidSaltSize(self.salt_size));
        }

        let algorithms = AlgorithmRegistry::new(
            core::iter::once(Arc::clone(&self.main_algorithm)).chain(self.legacy_algorithms),
        )?;
        let encryptions =
            EncryptionRegistry::new(self.encryption.iter().cloned().chain(self.legacy_encryptions))?;

        Ok(HasherConfig {
            main_algorithm: self.main_algorithm,
            main_iterations,
            main_encryption: self.encryption,
            salt_size: self.salt_size,
            normalize: self.normalize,
            algorithms,
            encryptions,
            random: self.random,
        })
    }

    /// Builds a [`PasswordHasher`].
    ///
    /// # Errors
    ///
    /// Same as [`HasherBuilder::build_config`].
    pub fn build(self) -> PasschainResult<PasswordHasher> {
        self.build_config().map(PasswordHasher::from_config)
    }
}
