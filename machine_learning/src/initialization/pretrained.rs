use serde::Deserialize;

use super::ParamGen;
use crate::{MlErr, Result};

/// Parameters of a network trained elsewhere.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pretrained {
    pub weights: Vec<f32>,
    pub biases: [f32; 2],
}

impl ParamGen for Pretrained {
    fn fill_weights(&mut self, weights: &mut [f32]) -> Result<()> {
        if self.weights.len() != weights.len() {
            return Err(MlErr::SizeMismatch {
                a: "pretrained weights",
                b: "network",
                got: self.weights.len(),
                expected: weights.len(),
            });
        }

        weights.copy_from_slice(&self.weights);
        Ok(())
    }

    fn biases(&mut self) -> Result<[f32; 2]> {
        Ok(self.biases)
    }
}
