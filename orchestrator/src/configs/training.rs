use std::time::Duration;

use comms::BatchRing;
use machine_learning::dataset::Batch;
use serde::Deserialize;

use crate::{OrchestratorError, Result};

/// The schedule the coordinator drives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Amount of training commands.
    pub train_iterations: usize,
    /// Items per training command.
    pub batch_size: usize,
    /// Capacity of every batch slot.
    pub max_batch: usize,
    /// Amount of inference commands after training, `None` runs forever.
    pub infer_limit: Option<usize>,
    /// Pause after every inference result, in milliseconds.
    pub infer_delay_ms: u64,
    /// Amount of batch slots the coordinator cycles through.
    pub slots: usize,
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            train_iterations: 128,
            batch_size: 100,
            max_batch: 1024,
            infer_limit: None,
            infer_delay_ms: 0,
            slots: 2,
            seed: 1618034,
        }
    }
}

impl TrainingConfig {
    /// Checks the config for values the coordinator can't work with.
    ///
    /// # Errors
    /// `OrchestratorError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 || self.batch_size > self.max_batch {
            return Err(OrchestratorError::InvalidConfig(format!(
                "batch_size must be in 1..={}, got {}",
                self.max_batch, self.batch_size
            )));
        }

        if self.slots == 0 {
            return Err(OrchestratorError::InvalidConfig(
                "at least one batch slot is needed".into(),
            ));
        }

        Ok(())
    }

    pub fn infer_delay(&self) -> Duration {
        Duration::from_millis(self.infer_delay_ms)
    }

    /// Creates the batch slots the coordinator and the worker exchange.
    pub fn ring(&self) -> BatchRing<Batch> {
        BatchRing::new(self.slots, || Batch::with_capacity(self.max_batch))
    }
}
