//! A single hidden layer feed-forward network, the dataset it learns from and
//! the routines that train and query it.

pub mod arch;
pub mod dataset;
pub mod error;
pub mod initialization;
pub mod training;

pub use error::{MlErr, Result};
