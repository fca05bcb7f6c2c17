//! The `log` estimate sink backend.

use std::sync::Mutex;

use async_trait::async_trait;
use site_core::SavedEstimate;
use site_core::sink::{EstimateSink, SinkConfig, SinkError, SinkFactory};
use tracing::info;

/// Writes every saved estimate to the log, one event per line plus a total,
/// and remembers it so it can be listed later in the same run.
#[derive(Debug, Default)]
pub struct LogEstimateSink {
    saved: Mutex<Vec<SavedEstimate>>,
}

impl LogEstimateSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EstimateSink for LogEstimateSink {
    async fn save(
        &self,
        estimate: SavedEstimate,
    ) -> Result<(), SinkError> {
        for line in &estimate.lines {
            info!(
                project = %estimate.project_name,
                line = %line.id,
                category = %line.category,
                item = %line.item,
                quantity = %line.quantity,
                unit = %line.unit,
                rate = %line.rate,
                amount = %line.amount,
                "estimate line"
            );
        }
        info!(
            project = %estimate.project_name,
            lines = estimate.lines.len(),
            total = %estimate.total,
            "estimate saved"
        );

        self.saved
            .lock()
            .map_err(|_| SinkError::Rejected("log sink lock poisoned".to_string()))?
            .push(estimate);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SavedEstimate>, SinkError> {
        let saved = self
            .saved
            .lock()
            .map_err(|_| SinkError::Rejected("log sink lock poisoned".to_string()))?;
        Ok(saved.clone())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogSinkFactory;

#[async_trait]
impl SinkFactory for LogSinkFactory {
    fn backend_name(&self) -> &'static str {
        "log"
    }

    async fn create(
        &self,
        _config: &SinkConfig,
    ) -> Result<Box<dyn EstimateSink>, SinkError> {
        Ok(Box::new(LogEstimateSink::new()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[tokio::test]
    async fn log_sink_keeps_what_it_logged() {
        let sink = LogEstimateSink::new();
        let estimate = SavedEstimate {
            project_name: "Villa Renovation Project".to_string(),
            lines: vec![],
            total: dec!(0),
        };

        sink.save(estimate.clone()).await.unwrap();

        assert_eq!(sink.list().await.unwrap(), vec![estimate]);
    }

    #[tokio::test]
    async fn factory_answers_to_log() {
        let factory = LogSinkFactory;

        assert_eq!(factory.backend_name(), "log");
        let sink = factory.create(&SinkConfig::default()).await.unwrap();
        assert!(sink.list().await.unwrap().is_empty());
    }
}
