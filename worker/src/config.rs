use std::path::PathBuf;

use machine_learning::{arch::Dims, initialization::Pretrained};
use serde::Deserialize;

/// Where the worker gets its dataset from at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetSource {
    /// A file in the semeion format.
    Semeion { path: PathBuf },
    /// Generated binary images, drawn from the worker's seeded generator.
    Synthetic { items: usize },
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self::Synthetic { items: 1593 }
    }
}

/// Where the initial parameters of the model come from.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamSource {
    /// Uniform over `[-0.5, 0.5)`, drawn from the worker's seeded generator.
    #[default]
    Random,
    /// Weights and biases given in full.
    Pretrained(Pretrained),
}

/// What the worker does with a command it does not understand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCommandPolicy {
    /// Log it and publish nothing, the coordinator waits forever.
    #[default]
    Ignore,
    /// Log it and publish an error report.
    Report,
}

/// Everything needed to bring up a worker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    pub dims: Dims,
    pub rate: f32,
    pub anneal: f32,
    pub seed: u64,
    pub params: ParamSource,
    pub dataset: DatasetSource,
    pub unknown_commands: UnknownCommandPolicy,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            dims: Dims::new(256, 28, 10),
            rate: 1.,
            anneal: 0.99,
            seed: 3141593,
            params: ParamSource::default(),
            dataset: DatasetSource::default(),
            unknown_commands: UnknownCommandPolicy::default(),
        }
    }
}
