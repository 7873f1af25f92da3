use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::ParamGen;
use crate::Result;

/// Draws every parameter from a distribution over an owned generator.
#[derive(Debug, Clone)]
pub struct RandParamGen<R: Rng, D: Distribution<f32>> {
    rng: R,
    distribution: D,
}

impl<R: Rng, D: Distribution<f32>> RandParamGen<R, D> {
    pub fn new(rng: R, distribution: D) -> Self {
        Self { rng, distribution }
    }

    /// Gives back the random number generator, advanced by every draw.
    pub fn into_rng(self) -> R {
        self.rng
    }
}

impl<R: Rng> RandParamGen<R, Uniform<f32>> {
    /// Creates a new `RandParamGen` with a uniform distribution.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The exclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high).
    pub fn uniform(rng: R, low: f32, high: f32) -> Result<Self> {
        Ok(Self::new(rng, Uniform::new(low, high)?))
    }

    /// Creates a new `RandParamGen` uniform over `[-0.5, 0.5)`, the default
    /// initialization of the network.
    pub fn centered(rng: R) -> Result<Self> {
        Self::uniform(rng, -0.5, 0.5)
    }
}

impl<R: Rng, D: Distribution<f32>> ParamGen for RandParamGen<R, D> {
    fn fill_weights(&mut self, weights: &mut [f32]) -> Result<()> {
        for w in weights {
            *w = self.distribution.sample(&mut self.rng);
        }

        Ok(())
    }

    fn biases(&mut self) -> Result<[f32; 2]> {
        let mut draw = || self.distribution.sample(&mut self.rng);
        Ok([draw(), draw()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn centered_range() {
        let mut param_gen = RandParamGen::centered(seeded_rng()).unwrap();
        let mut weights = [1.; 64];
        param_gen.fill_weights(&mut weights).unwrap();

        assert!(weights.iter().all(|w| (-0.5..0.5).contains(w)));
        assert!(param_gen.biases().unwrap().iter().all(|b| (-0.5..0.5).contains(b)));
    }

    #[test]
    fn biases_continue_the_weight_stream() {
        let mut param_gen = RandParamGen::centered(seeded_rng()).unwrap();
        let mut weights = [0.; 5];
        param_gen.fill_weights(&mut weights).unwrap();
        let biases = param_gen.biases().unwrap();

        let mut rng = seeded_rng();
        let uniform = Uniform::new(-0.5, 0.5).unwrap();
        let stream: Vec<f32> = (0..7).map(|_| uniform.sample(&mut rng)).collect();

        assert_eq!(&stream[..5], &weights);
        assert_eq!(&stream[5..], &biases);
    }

    #[test]
    fn invalid_range() {
        assert!(RandParamGen::uniform(seeded_rng(), 1., -1.).is_err());
    }
}
