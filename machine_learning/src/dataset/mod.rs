//! Labeled examples, the dataset holding them and the batches sampled from it.

mod batch;
pub mod semeion;
pub mod synthetic;

pub use batch::{Batch, sample_batch, sample_into};

/// A single example: an input vector and the expected output.
#[derive(Debug, PartialEq)]
pub struct LabeledItem {
    input: Vec<f32>,
    target: Vec<f32>,
}

impl Clone for LabeledItem {
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
            target: self.target.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.input.clone_from(&source.input);
        self.target.clone_from(&source.target);
    }
}

impl LabeledItem {
    pub fn new(input: Vec<f32>, target: Vec<f32>) -> Self {
        Self { input, target }
    }

    pub fn input(&self) -> &[f32] {
        &self.input
    }

    pub fn target(&self) -> &[f32] {
        &self.target
    }
}

/// An immutable, non empty collection of items of uniform dimensions.
#[derive(Debug, Clone)]
pub struct Dataset {
    items: Vec<LabeledItem>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `items` - The examples, in order.
    ///
    /// # Returns
    /// A new `Dataset` instance.
    ///
    /// # Panics
    /// If `items` is empty or the items have different dimensions.
    pub fn new(items: Vec<LabeledItem>) -> Self {
        let Some(first) = items.first() else {
            panic!("a dataset needs at least one item");
        };

        let (inputs, outputs) = (first.input.len(), first.target.len());
        assert!(
            items
                .iter()
                .all(|item| item.input.len() == inputs && item.target.len() == outputs),
            "dataset items have different dimensions"
        );

        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The length of every input vector.
    pub fn input_len(&self) -> usize {
        self.items[0].input.len()
    }

    /// The length of every target vector.
    pub fn target_len(&self) -> usize {
        self.items[0].target.len()
    }

    /// # Panics
    /// If `idx` is out of range.
    pub fn get(&self, idx: usize) -> &LabeledItem {
        &self.items[idx]
    }

    pub fn items(&self) -> &[LabeledItem] {
        &self.items
    }
}
