use std::fmt::{self, Display};

use crate::{arch::Network, dataset::LabeledItem};

/// The result of training on a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainOutcome {
    pub n_items: usize,
    pub rate: f32,
    pub error: f32,
}

impl Display for TrainOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "train(): n_items={} rate={:.6} error={:.6}",
            self.n_items, self.rate, self.error
        )
    }
}

/// The network's answer for a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub predicted: usize,
    pub target: usize,
    pub probs: Vec<f32>,
    pub labels: Vec<f32>,
}

impl Inference {
    /// Builds an inference from the network output and the expected output.
    ///
    /// Both classes are the first maximum of their vector, so an all zero
    /// target counts as class 0.
    pub fn from_outputs(probs: &[f32], labels: &[f32]) -> Self {
        Self {
            predicted: argmax(probs),
            target: argmax(labels),
            probs: probs.to_vec(),
            labels: labels.to_vec(),
        }
    }

    pub fn is_correct(&self) -> bool {
        self.predicted == self.target
    }
}

impl Display for Inference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_correct() { "PASS" } else { "FAIL" };
        write!(f, "infer(): {verdict} :")?;

        for p in &self.probs {
            write!(f, " {p:.2}")?;
        }

        write!(f, " :")?;

        for &label in &self.labels {
            write!(f, " {}", label as i32)?;
        }

        Ok(())
    }
}

/// The index of the first maximum of `values`, zero if empty.
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0;

    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }

    best
}

/// Trains `model` on every item in order with the same rate.
///
/// # Returns
/// The sum of the per item errors.
pub fn train_batch(model: &mut Network, items: &[LabeledItem], rate: f32) -> f32 {
    items
        .iter()
        .map(|item| model.train(item.input(), item.target(), rate))
        .sum()
}

/// Runs the model on the first item only.
///
/// # Panics
/// If `items` is empty.
pub fn infer_one(model: &mut Network, items: &[LabeledItem]) -> Inference {
    let Some(item) = items.first() else {
        panic!("inference needs at least one item");
    };

    let probs = model.predict(item.input());
    Inference::from_outputs(probs, item.target())
}
