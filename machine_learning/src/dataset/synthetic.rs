//! Generated binary images for running without a dataset file.

use rand::Rng;

use super::{Dataset, LabeledItem};

/// Probability of flipping a pixel of the clean pattern.
const NOISE: f64 = 0.05;

/// Generates `count` labeled binary images.
///
/// Item `k` belongs to class `k % outputs`. Its image lights the band of
/// pixels owned by that class, the input split evenly between classes, and
/// then flips every pixel with a small probability.
///
/// # Arguments
/// * `count` - The amount of items.
/// * `inputs` - The amount of pixels per image.
/// * `outputs` - The amount of classes.
/// * `rng` - The source of the noise.
///
/// # Returns
/// A new dataset.
///
/// # Panics
/// If `count` is zero or there are fewer pixels than classes.
pub fn generate<R: Rng>(count: usize, inputs: usize, outputs: usize, rng: &mut R) -> Dataset {
    assert!(outputs > 0 && inputs >= outputs, "need at least one pixel per class");

    let items = (0..count)
        .map(|k| {
            let class = k % outputs;

            let input = (0..inputs)
                .map(|p| {
                    let lit = p * outputs / inputs == class;
                    (lit != rng.random_bool(NOISE)) as u8 as f32
                })
                .collect();

            let mut target = vec![0.; outputs];
            target[class] = 1.;

            LabeledItem::new(input, target)
        })
        .collect();

    Dataset::new(items)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn one_hot_cycling_classes() {
        let dataset = generate(25, 256, 10, &mut StdRng::seed_from_u64(0));

        assert_eq!(dataset.len(), 25);
        assert_eq!(dataset.input_len(), 256);

        for (k, item) in dataset.items().iter().enumerate() {
            assert_eq!(item.target().iter().sum::<f32>(), 1.);
            assert_eq!(item.target()[k % 10], 1.);
            assert!(item.input().iter().all(|&x| x == 0. || x == 1.));
        }
    }
}
