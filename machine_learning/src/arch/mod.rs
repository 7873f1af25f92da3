pub mod activations;
pub mod loss;
mod network;

pub use network::{Dims, Network};
