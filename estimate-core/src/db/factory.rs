use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use super::repository::{LeadRepository, RepositoryError};

/// Where leads are stored.
///
/// `backend` names a registered [`RepositoryFactory`]; `connection` is handed
/// to it untouched.
///
/// | backend    | connection examples          |
/// |------------|------------------------------|
/// | `sqlite`   | `estimator.db`, `:memory:`   |
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub backend: String,
    pub connection: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection: "estimator.db".to_string(),
        }
    }
}

impl DbConfig {
    pub fn in_memory() -> Self {
        Self {
            connection: ":memory:".to_string(),
            ..Self::default()
        }
    }
}

/// Implemented once per storage backend and registered at startup.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Opens the store, preparing its schema if needed.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn LeadRepository>, RepositoryError>;
}

/// Backend factories keyed by name.
pub struct RepositoryRegistry {
    factories: HashMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Adds a factory, replacing any earlier one with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names, sorted.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Opens a repository through the factory named by `config.backend`.
    ///
    /// # Errors
    /// * [`RepositoryError::Configuration`] when no such backend is registered.
    /// * Whatever the factory itself returns.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn LeadRepository>, RepositoryError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                RepositoryError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for RepositoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}
