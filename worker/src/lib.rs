//! The role that owns the model and the dataset and computes on demand.

pub mod builder;
pub mod config;
pub mod error;
pub mod worker;

pub use builder::WorkerBuilder;
pub use config::{DatasetSource, ParamSource, UnknownCommandPolicy, WorkerConfig};
pub use error::{Result, WorkerErr};
pub use worker::{Worker, WorkerStats};
