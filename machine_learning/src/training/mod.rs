mod anneal;
mod driver;

pub use anneal::Anneal;
pub use driver::{Inference, TrainOutcome, argmax, infer_one, train_batch};
