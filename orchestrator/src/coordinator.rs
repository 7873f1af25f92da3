use std::{iter, thread};

use comms::{Command, CommsErr, CoordinatorEnd};
use display::{Canvas, panels};
use log::{debug, info};
use machine_learning::{
    dataset::{Batch, Dataset, LabeledItem, sample_into},
    training::argmax,
};
use rand::{SeedableRng, rngs::StdRng};
use tokio::sync::mpsc::UnboundedSender;

use crate::{OrchestratorError, Result, Summary, TrainingConfig, TrainingEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Train,
    Infer,
}

/// A submitted command whose report hasn't been collected yet.
struct InFlight {
    kind: Kind,
    index: usize,
    /// The first item of the submitted batch.
    item: LabeledItem,
}

/// The role that samples batches, submits commands and presents results.
///
/// Results lag one command behind: the next batch is prepared and submitted
/// while the worker is still busy with the previous one.
pub struct Coordinator<C: Canvas> {
    config: TrainingConfig,
    end: CoordinatorEnd<Batch, Dataset>,
    canvas: C,
    events: Option<UnboundedSender<TrainingEvent>>,
    rng: StdRng,
    summary: Summary,
}

impl<C: Canvas> Coordinator<C> {
    /// Creates a new `Coordinator`.
    ///
    /// # Arguments
    /// * `config` - The schedule to drive.
    /// * `end` - The coordinator end of the mailbox.
    /// * `canvas` - Where results are drawn.
    ///
    /// # Returns
    /// A new `Coordinator` or an error if `config` is invalid.
    pub fn new(
        config: TrainingConfig,
        end: CoordinatorEnd<Batch, Dataset>,
        canvas: C,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            end,
            canvas,
            events: None,
            summary: Summary::default(),
        })
    }

    /// Publishes every result as a `TrainingEvent` on `events`.
    pub fn with_events(mut self, events: UnboundedSender<TrainingEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Drives the whole schedule.
    ///
    /// Waits for the worker to be ready, trains, then infers until the limit
    /// is reached or forever if there is none.
    ///
    /// # Returns
    /// The collected results once the schedule completes or the mailbox is
    /// cancelled.
    ///
    /// # Errors
    /// Any mailbox failure other than cancellation.
    pub fn run(mut self) -> Result<Summary> {
        match self.drive() {
            Ok(()) => info!("schedule completed"),
            Err(OrchestratorError::Comms(CommsErr::Cancelled)) => info!("coordinator cancelled"),
            Err(e) => return Err(e),
        }

        info!(
            trained = self.summary.train_reports.len(),
            inferences = self.summary.inferences,
            passed = self.summary.passed;
            "coordinator finished"
        );

        self.emit(TrainingEvent::Done(self.summary.clone()));
        Ok(self.summary)
    }

    fn drive(&mut self) -> Result<()> {
        let dataset = self.end.await_ready()?;
        info!(items = dataset.len(); "worker ready");
        self.emit(TrainingEvent::Ready {
            items: dataset.len(),
        });

        panels::clear(&mut self.canvas);

        let infers = self.config.infer_limit.unwrap_or(usize::MAX);
        let schedule = iter::repeat_n(Kind::Train, self.config.train_iterations)
            .chain(iter::repeat_n(Kind::Infer, infers));

        let mut in_flight = None;

        for (index, kind) in schedule.enumerate() {
            let next = self.submit(kind, index, &dataset)?;

            if let Some(prev) = in_flight.replace(next) {
                self.collect(prev)?;
            }
        }

        if let Some(last) = in_flight {
            self.collect(last)?;
        }

        Ok(())
    }

    fn submit(&mut self, kind: Kind, index: usize, dataset: &Dataset) -> Result<InFlight> {
        let (n_items, command) = match kind {
            Kind::Train => (
                self.config.batch_size,
                Command::Train {
                    n_items: self.config.batch_size as u64,
                },
            ),
            Kind::Infer => (1, Command::Infer),
        };

        let rng = &mut self.rng;
        let item = self.end.fill(|batch| {
            sample_into(batch, n_items, dataset, rng);
            batch[0].clone()
        })?;

        self.end.submit(command)?;

        match kind {
            Kind::Train => {
                let batches = index;
                panels::draw_training_banner(&mut self.canvas, batches, batches * n_items);
                panels::draw_digit(&mut self.canvas, index, &item);
            }
            Kind::Infer => {
                let count = index - self.config.train_iterations;
                if count == 0 {
                    panels::draw_predict_banner(&mut self.canvas);
                }
                panels::draw_predict_count(&mut self.canvas, count);
                panels::draw_digit(&mut self.canvas, count, &item);
            }
        }

        Ok(InFlight { kind, index, item })
    }

    fn collect(&mut self, flight: InFlight) -> Result<()> {
        let report = self.end.wait_report()?;
        let msg = report.msg().to_string();
        let probs = report.values().map(<[f32]>::to_vec);

        info!("REPORT ({}) <<<{msg}>>>", flight.index);

        let event = match flight.kind {
            Kind::Train => {
                self.summary.train_reports.push(msg.clone());
                TrainingEvent::Trained {
                    index: flight.index,
                    report: msg,
                }
            }
            Kind::Infer => {
                let probs = probs.unwrap_or_default();
                let correct = !probs.is_empty() && argmax(&probs) == argmax(flight.item.target());

                let count = flight.index - self.config.train_iterations;
                panels::draw_inference(&mut self.canvas, count, &probs);

                self.summary.inferences += 1;
                self.summary.passed += correct as usize;
                self.summary.last_inference = Some(msg.clone());

                TrainingEvent::Inferred {
                    index: flight.index,
                    report: msg,
                    correct,
                }
            }
        };

        self.end.publish_progress(flight.index as u64 + 1);
        self.emit(event);

        if flight.kind == Kind::Infer && self.config.infer_delay_ms > 0 {
            thread::sleep(self.config.infer_delay());
        }

        Ok(())
    }

    fn emit(&self, event: TrainingEvent) {
        let Some(events) = &self.events else {
            return;
        };

        if events.send(event).is_err() {
            debug!("event receiver dropped");
        }
    }
}
