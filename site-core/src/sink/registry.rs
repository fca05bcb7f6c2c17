use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::estimate_sink::{EstimateSink, InMemoryEstimateSink, SinkError};

/// Backend-agnostic sink configuration.
///
/// `backend` must match the [`SinkFactory::backend_name`] of a registered
/// factory.
///
/// | backend  | behaviour                                   |
/// |----------|---------------------------------------------|
/// | `memory` | keeps saved estimates for the process life  |
/// | `log`    | writes each saved estimate to the log (UI)  |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"memory"`).
    pub backend: String,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
        }
    }
}

/// One implementation per sink backend, registered with a [`SinkRegistry`]
/// at startup.
#[async_trait]
pub trait SinkFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &SinkConfig,
    ) -> Result<Box<dyn EstimateSink>, SinkError>;
}

/// Factory for [`InMemoryEstimateSink`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemorySinkFactory;

#[async_trait]
impl SinkFactory for InMemorySinkFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &SinkConfig,
    ) -> Result<Box<dyn EstimateSink>, SinkError> {
        Ok(Box::new(InMemoryEstimateSink::new()))
    }
}

/// Registry of [`SinkFactory`] instances, keyed by backend name.
pub struct SinkRegistry {
    factories: HashMap<&'static str, Box<dyn SinkFactory>>,
}

impl SinkRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with the in-memory backend already registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(InMemorySinkFactory));
        registry
    }

    /// Register a backend factory. A factory with the same name is replaced.
    pub fn register(
        &mut self,
        factory: Box<dyn SinkFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`SinkError::Configuration`] when no factory is registered for the
    ///   requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &SinkConfig,
    ) -> Result<Box<dyn EstimateSink>, SinkError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                SinkError::Configuration(format!(
                    "unknown sink backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}
