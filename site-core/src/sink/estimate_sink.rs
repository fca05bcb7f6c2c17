use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::SavedEstimate;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SinkError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Estimate rejected: {0}")]
    Rejected(String),
}

/// Receives finished estimates on save.
#[async_trait]
pub trait EstimateSink: Send + Sync {
    async fn save(
        &self,
        estimate: SavedEstimate,
    ) -> Result<(), SinkError>;

    /// Every estimate this sink has accepted, oldest first.
    async fn list(&self) -> Result<Vec<SavedEstimate>, SinkError>;
}

/// Keeps saved estimates for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryEstimateSink {
    saved: Mutex<Vec<SavedEstimate>>,
}

impl InMemoryEstimateSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EstimateSink for InMemoryEstimateSink {
    async fn save(
        &self,
        estimate: SavedEstimate,
    ) -> Result<(), SinkError> {
        self.saved
            .lock()
            .map_err(|_| SinkError::Rejected("in-memory sink lock poisoned".to_string()))?
            .push(estimate);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SavedEstimate>, SinkError> {
        let saved = self
            .saved
            .lock()
            .map_err(|_| SinkError::Rejected("in-memory sink lock poisoned".to_string()))?;
        Ok(saved.clone())
    }
}
