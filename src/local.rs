//! Training and inference in a single thread, without the mailbox.

use log::info;
use machine_learning::{
    dataset::{Batch, sample_into},
    training::{TrainOutcome, infer_one, train_batch},
};
use orchestrator::Summary;
use rand::{SeedableRng, rngs::StdRng};
use worker::WorkerBuilder;

use crate::{Result, SessionConfig};

/// Trains for the configured iterations, then runs the configured amount of
/// inferences, logging every status line.
///
/// Without an inference limit in the training config, `local_inferences`
/// inferences are run.
///
/// # Errors
/// If the config is invalid or the worker parts can't be built.
pub fn run(config: &SessionConfig) -> Result<Summary> {
    config.validate()?;

    let training = &config.training;
    let (mut model, dataset, mut anneal) = WorkerBuilder::build(&config.worker)?.into_parts();
    let mut rng = StdRng::seed_from_u64(training.seed);
    let mut batch = Batch::with_capacity(training.max_batch);
    let mut summary = Summary::default();

    for _ in 0..training.train_iterations {
        sample_into(&mut batch, training.batch_size, &dataset, &mut rng);

        let rate = anneal.rate();
        let error = train_batch(&mut model, &batch, rate);
        anneal.step();

        let outcome = TrainOutcome {
            n_items: batch.len(),
            rate,
            error,
        };

        info!("{outcome}");
        summary.train_reports.push(outcome.to_string());
    }

    let inferences = training.infer_limit.unwrap_or(config.local_inferences);

    for _ in 0..inferences {
        sample_into(&mut batch, 1, &dataset, &mut rng);

        let inference = infer_one(&mut model, &batch);
        info!("{inference}");

        summary.inferences += 1;
        summary.passed += inference.is_correct() as usize;
        summary.last_inference = Some(inference.to_string());
    }

    Ok(summary)
}
