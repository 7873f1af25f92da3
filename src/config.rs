use std::{fs, path::Path, time::Duration};

use comms::Poller;
use orchestrator::TrainingConfig;
use serde::Deserialize;
use worker::{DatasetSource, WorkerConfig};

use crate::{Result, SessionError};

/// How the two roles are run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Coordinator and worker on their own threads, talking over the mailbox.
    #[default]
    Mailbox,
    /// Training and inference in a single thread, without the mailbox.
    Local,
}

/// The whole configuration of a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: Mode,
    /// Delay between two reads of a shared word, zero spins.
    pub poll_interval_us: u64,
    /// Inferences of a local run when the training config sets no limit.
    pub local_inferences: usize,
    pub worker: WorkerConfig,
    pub training: TrainingConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            poll_interval_us: Poller::DEFAULT_INTERVAL.as_micros() as u64,
            local_inferences: 20,
            worker: WorkerConfig::default(),
            training: TrainingConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Reads a JSON config, every missing field takes its default.
    ///
    /// # Arguments
    /// * `path` - The file to read, `None` gives the default config.
    ///
    /// # Errors
    /// If the file can't be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_json(&fs::read_to_string(path)?),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks both role configs.
    ///
    /// # Errors
    /// `SessionError::InvalidConfig` naming the first offending value.
    pub fn validate(&self) -> Result<()> {
        self.training.validate()?;

        if let DatasetSource::Synthetic { items: 0 } = self.worker.dataset {
            return Err(SessionError::InvalidConfig(
                "a synthetic dataset needs at least one item".into(),
            ));
        }

        let dims = self.worker.dims;
        if dims.inputs == 0 || dims.hidden == 0 || dims.outputs == 0 {
            return Err(SessionError::InvalidConfig(format!(
                "every network dimension must be positive, got {dims:?}"
            )));
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_micros(self.poll_interval_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_the_default() {
        assert_eq!(SessionConfig::from_json("{}").unwrap(), SessionConfig::default());
    }

    #[test]
    fn nested_overrides() {
        let config = SessionConfig::from_json(
            r#"{
                "mode": "local",
                "poll_interval_us": 0,
                "worker": { "seed": 1 },
                "training": { "infer_limit": 5 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.mode, Mode::Local);
        assert_eq!(config.poll_interval(), Duration::ZERO);
        assert_eq!(config.worker.seed, 1);
        assert_eq!(config.worker.anneal, 0.99);
        assert_eq!(config.training.infer_limit, Some(5));
        assert_eq!(config.training.train_iterations, 128);
    }

    #[test]
    fn unknown_mode() {
        assert!(matches!(
            SessionConfig::from_json(r#"{ "mode": "cluster" }"#),
            Err(SessionError::Json(_))
        ));
    }

    #[test]
    fn empty_synthetic_dataset() {
        let mut config = SessionConfig::default();
        config.worker.dataset = DatasetSource::Synthetic { items: 0 };

        assert!(matches!(
            config.validate(),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn defaults_are_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }
}
