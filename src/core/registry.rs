//! Algorithm and encryption registries.
//!
//! Both registries are built once from a hasher's configuration and never
//! change afterwards, so they can be shared across threads without locking.
//! Cloning a registry is cheap.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::core::error::{PasschainError, PasschainResult};
use crate::core::header::validate_algorithm_id;
use crate::core::operations::algorithm::HashAlgorithm;
use crate::core::operations::encryption::EncryptionParams;

/// Hash algorithms by identifier.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmRegistry {
    algorithms: Arc<HashMap<String, Arc<dyn HashAlgorithm>>>,
}

impl AlgorithmRegistry {
    /// Builds a registry from shared algorithm instances.
    ///
    /// # Errors
    ///
    /// - `PasschainError::InvalidAlgorithmId` if an identifier is empty or
    ///   contains a reserved character
    /// - `PasschainError::DuplicateAlgorithmId` if two algorithms share an identifier
    pub fn new<I>(algorithms: I) -> PasschainResult<Self>
    where
        I: IntoIterator<Item = Arc<dyn HashAlgorithm>>,
    {
        let mut map: HashMap<String, Arc<dyn HashAlgorithm>> = HashMap::new();
        for algorithm in algorithms {
            let id = algorithm.id().to_string();
            validate_algorithm_id(&id)?;
            if map.contains_key(&id) {
                return Err(PasschainError::DuplicateAlgorithmId(id));
            }
            map.insert(id, algorithm);
        }

        debug!("Registered {} hash algorithm(s)", map.len());
        Ok(Self {
            algorithms: Arc::new(map),
        })
    }

    /// Builds a registry from owned algorithm values of one type.
    ///
    /// # Errors
    ///
    /// Same as [`AlgorithmRegistry::new`].
    pub fn from_algorithms<A, I>(algorithms: I) -> PasschainResult<Self>
    where
        A: HashAlgorithm + 'static,
        I: IntoIterator<Item = A>,
    {
        Self::new(
            algorithms
                .into_iter()
                .map(|algorithm| Arc::new(algorithm) as Arc<dyn HashAlgorithm>),
        )
    }

    /// Looks up an algorithm by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<dyn HashAlgorithm>> {
        self.algorithms.get(id)
    }

    /// Looks up an algorithm, failing if it is not registered.
    ///
    /// # Errors
    ///
    /// Returns `PasschainError::UnknownAlgorithm` if `id` is not registered.
    pub fn resolve(&self, id: &str) -> PasschainResult<&Arc<dyn HashAlgorithm>> {
        self.get(id)
            .ok_or_else(|| PasschainError::UnknownAlgorithm(id.to_string()))
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.algorithms.contains_key(id)
    }

    /// All registered identifiers, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.algorithms.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered algorithms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

/// Encryption parameter sets by identifier.
#[derive(Debug, Clone, Default)]
pub struct EncryptionRegistry {
    params: Arc<HashMap<u32, EncryptionParams>>,
}

impl EncryptionRegistry {
    /// Builds a registry from parameter sets.
    ///
    /// # Errors
    ///
    /// Returns `PasschainError::DuplicateEncryptionId` if two sets share an identifier.
    pub fn new<I>(params: I) -> PasschainResult<Self>
    where
        I: IntoIterator<Item = EncryptionParams>,
    {
        let mut map = HashMap::new();
        for entry in params {
            let id = entry.id();
            if map.insert(id, entry).is_some() {
                return Err(PasschainError::DuplicateEncryptionId(id));
            }
        }

        debug!("Registered {} encryption parameter set(s)", map.len());
        Ok(Self {
            params: Arc::new(map),
        })
    }

    /// A registry with no parameter sets.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up a parameter set by identifier.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&EncryptionParams> {
        self.params.get(&id)
    }

    /// Looks up a parameter set, failing if it is not registered.
    ///
    /// # Errors
    ///
    /// Returns `PasschainError::UnknownEncryptionId` if `id` is not registered.
    pub fn resolve(&self, id: u32) -> PasschainResult<&EncryptionParams> {
        self.get(id).ok_or(PasschainError::UnknownEncryptionId(id))
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.params.contains_key(&id)
    }

    /// All registered identifiers, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<_> = self.params.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered parameter sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
