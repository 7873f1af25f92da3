use std::{
    fmt::{self, Display, Write},
    sync::Arc,
};

use comms::{Command, CommsErr, Report, WorkerEnd};
use display::{Canvas, LogCanvas, network};
use log::{debug, info, warn};
use machine_learning::{
    arch::Network,
    dataset::{Batch, Dataset},
    training::{Anneal, Inference, TrainOutcome, infer_one, train_batch},
};

use crate::{Result, UnknownCommandPolicy, WorkerErr};

/// Counters of the work done by a worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub batches: usize,
    pub items: usize,
    pub inferences: usize,
    pub unknown: usize,
}

enum Outcome {
    Train(TrainOutcome),
    Infer(Inference),
    Unknown { opcode: u8, arg: u64 },
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Train(outcome) => write!(f, "{outcome}"),
            Outcome::Infer(inference) => write!(f, "{inference}"),
            Outcome::Unknown { opcode, arg } => {
                write!(f, "error(): unknown command opcode={opcode} arg={arg}")
            }
        }
    }
}

impl Outcome {
    fn write_to(&self, report: &mut Report) {
        // A `MsgBuf` truncates instead of failing.
        write!(report.msg_mut(), "{self}").ok();

        if let Outcome::Infer(inference) = self {
            report.set_values(&inference.probs);
        }
    }
}

/// The role that owns the model and the dataset.
///
/// The network is drawn on the canvas once before the worker announces
/// itself and again after every training batch, along with a status bar.
pub struct Worker<C = LogCanvas> {
    model: Network,
    dataset: Arc<Dataset>,
    anneal: Anneal,
    policy: UnknownCommandPolicy,
    stats: WorkerStats,
    canvas: C,
}

impl Worker {
    /// Creates a new worker.
    ///
    /// # Args
    /// * `model` - The network to train and query.
    /// * `dataset` - The dataset shared with the coordinator once ready.
    /// * `anneal` - The learning rate schedule.
    /// * `policy` - What to do with unknown commands.
    ///
    /// # Returns
    /// A new worker instance.
    pub fn new(
        model: Network,
        dataset: Dataset,
        anneal: Anneal,
        policy: UnknownCommandPolicy,
    ) -> Self {
        Self {
            model,
            dataset: Arc::new(dataset),
            anneal,
            policy,
            stats: WorkerStats::default(),
            canvas: LogCanvas,
        }
    }
}

impl<C: Canvas> Worker<C> {
    /// Replaces the canvas the worker draws on.
    pub fn with_canvas<D: Canvas>(self, canvas: D) -> Worker<D> {
        Worker {
            model: self.model,
            dataset: self.dataset,
            anneal: self.anneal,
            policy: self.policy,
            stats: self.stats,
            canvas,
        }
    }

    pub fn model(&self) -> &Network {
        &self.model
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// The learning rate of the next training batch.
    pub fn rate(&self) -> f32 {
        self.anneal.rate()
    }

    /// Takes the model, the dataset and the rate schedule out of the worker,
    /// for driving them without a mailbox.
    pub fn into_parts(self) -> (Network, Arc<Dataset>, Anneal) {
        (self.model, self.dataset, self.anneal)
    }

    /// Announces readiness and then serves commands until cancelled.
    ///
    /// # Args
    /// * `end` - The worker end of the mailbox.
    ///
    /// # Returns
    /// The work done once the poller is cancelled.
    ///
    /// # Errors
    /// Returns `WorkerErr` on any protocol failure other than cancellation.
    ///
    /// # Panics
    /// If a training command asks for more items than its batch holds.
    pub fn run(&mut self, mut end: WorkerEnd<Batch, Dataset>) -> Result<WorkerStats> {
        match self.serve(&mut end) {
            Err(WorkerErr::Comms(CommsErr::Cancelled)) => {
                info!(
                    batches = self.stats.batches,
                    inferences = self.stats.inferences;
                    "worker cancelled"
                );
                Ok(self.stats)
            }
            Err(e) => Err(e),
            Ok(never) => match never {},
        }
    }

    fn serve(&mut self, end: &mut WorkerEnd<Batch, Dataset>) -> Result<std::convert::Infallible> {
        network::draw_weights(&mut self.canvas, &self.model);
        end.announce_ready(Arc::clone(&self.dataset))?;
        info!(items = self.dataset.len(); "worker ready");

        loop {
            let delivery = end.wait_command()?;
            let outcome = self.dispatch(delivery.command(), delivery.batch());
            drop(delivery);

            if let Some(outcome) = outcome {
                end.publish(|report| outcome.write_to(report))?;
            }
        }
    }

    fn dispatch(&mut self, command: Command, batch: &Batch) -> Option<Outcome> {
        match command {
            Command::Train { n_items } => {
                let n_items = n_items as usize;
                let rate = self.anneal.rate();
                let error = train_batch(&mut self.model, &batch[..n_items], rate);
                self.anneal.step();

                self.stats.batches += 1;
                self.stats.items += n_items;
                debug!(n_items = n_items, error = error; "trained");

                network::draw_train_status(&mut self.canvas, rate, error, self.stats.items);
                network::draw_weights(&mut self.canvas, &self.model);

                Some(Outcome::Train(TrainOutcome {
                    n_items,
                    rate,
                    error,
                }))
            }
            Command::Infer => {
                let inference = infer_one(&mut self.model, batch);
                self.stats.inferences += 1;
                debug!(correct = inference.is_correct(); "inferred");

                Some(Outcome::Infer(inference))
            }
            Command::Unknown { opcode, arg } => {
                self.stats.unknown += 1;
                warn!(opcode = opcode, arg = arg; "unknown command");

                match self.policy {
                    UnknownCommandPolicy::Ignore => None,
                    UnknownCommandPolicy::Report => Some(Outcome::Unknown { opcode, arg }),
                }
            }
            Command::Idle => None,
        }
    }
}
