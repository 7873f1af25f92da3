use std::ops::Deref;

use rand::Rng;

use super::{Dataset, LabeledItem};

/// Copies of dataset items, bounded by a fixed capacity.
#[derive(Debug, Clone)]
pub struct Batch {
    items: Vec<LabeledItem>,
    capacity: usize,
}

impl Batch {
    /// Creates a new empty `Batch` that holds at most `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn items(&self) -> &[LabeledItem] {
        &self.items
    }
}

impl Deref for Batch {
    type Target = [LabeledItem];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

/// Draws `n` items uniformly with replacement into a new batch.
///
/// # Arguments
/// * `n` - The amount of items to draw.
/// * `dataset` - The dataset to draw from.
/// * `rng` - The source of the indices.
///
/// # Returns
/// A batch of capacity `n`.
pub fn sample_batch<R: Rng>(n: usize, dataset: &Dataset, rng: &mut R) -> Batch {
    let mut batch = Batch::with_capacity(n);
    sample_into(&mut batch, n, dataset, rng);
    batch
}

/// Refills `batch` in place with `n` items drawn uniformly with replacement,
/// reusing the allocations of the items it already holds.
///
/// # Panics
/// If `n` exceeds the capacity of the batch.
pub fn sample_into<R: Rng>(batch: &mut Batch, n: usize, dataset: &Dataset, rng: &mut R) {
    assert!(
        n <= batch.capacity,
        "requested {n} items from a batch of capacity {}",
        batch.capacity
    );

    batch.items.truncate(n);

    for k in 0..n {
        let item = dataset.get(rng.random_range(0..dataset.len()));

        match batch.items.get_mut(k) {
            Some(slot) => slot.clone_from(item),
            None => batch.items.push(item.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn indexed(len: usize) -> Dataset {
        let items = (0..len)
            .map(|i| LabeledItem::new(vec![i as f32], vec![1.]))
            .collect();

        Dataset::new(items)
    }

    #[test]
    fn sampled_items_come_from_the_dataset() {
        let dataset = indexed(7);
        let mut rng = StdRng::seed_from_u64(0);

        let batch = sample_batch(100, &dataset, &mut rng);

        assert_eq!(batch.len(), 100);
        assert!(batch.iter().all(|item| (0..7).contains(&(item.input()[0] as usize))));
    }

    #[test]
    fn sampling_is_with_replacement() {
        let dataset = indexed(3);
        let mut rng = StdRng::seed_from_u64(1);

        let batch = sample_batch(10, &dataset, &mut rng);

        let mut seen = [0; 3];
        batch.iter().for_each(|item| seen[item.input()[0] as usize] += 1);
        assert!(seen.iter().any(|&count| count > 1));
    }

    #[test]
    fn refill_shrinks_and_grows() {
        let dataset = indexed(5);
        let mut rng = StdRng::seed_from_u64(2);
        let mut batch = Batch::with_capacity(8);

        sample_into(&mut batch, 8, &dataset, &mut rng);
        assert_eq!(batch.len(), 8);

        sample_into(&mut batch, 1, &dataset, &mut rng);
        assert_eq!(batch.len(), 1);

        sample_into(&mut batch, 4, &dataset, &mut rng);
        assert_eq!(batch.len(), 4);
    }

    #[test]
    #[should_panic(expected = "capacity 2")]
    fn over_capacity() {
        let dataset = indexed(5);
        let mut batch = Batch::with_capacity(2);
        sample_into(&mut batch, 3, &dataset, &mut StdRng::seed_from_u64(3));
    }
}
