/// A learning rate that decays geometrically after every training batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anneal {
    rate: f32,
    decay: f32,
}

impl Default for Anneal {
    fn default() -> Self {
        Self::new(1., 0.99)
    }
}

impl Anneal {
    /// Creates a new `Anneal` schedule.
    ///
    /// # Arguments
    /// * `rate` - The rate of the first batch.
    /// * `decay` - The factor applied to the rate after every batch.
    pub fn new(rate: f32, decay: f32) -> Self {
        Self { rate, decay }
    }

    /// The rate for the next batch.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Moves on to the next batch.
    pub fn step(&mut self) {
        self.rate *= self.decay;
    }
}
