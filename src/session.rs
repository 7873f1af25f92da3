//! Both roles on their own blocking threads, talking over one mailbox.

use comms::Poller;
use log::info;
use display::LogCanvas;
use orchestrator::{Coordinator, Summary, TrainingEvent};
use tokio::{sync::mpsc::UnboundedSender, task};
use tokio_util::sync::CancellationToken;
use worker::{WorkerBuilder, WorkerStats};

use crate::{Result, SessionConfig};

/// What both roles report once a session ends.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub summary: Summary,
    pub stats: WorkerStats,
}

/// Runs a coordinator and a worker against each other.
///
/// The session ends when the coordinator completes a bounded schedule or when
/// `cancel` fires. Either role stopping, for any reason, cancels the other.
///
/// # Arguments
/// * `config` - The configuration of both roles.
/// * `cancel` - Stops the session from outside.
/// * `events` - Receives the coordinator's events, if any.
///
/// # Errors
/// If the config is invalid, the worker can't be built or either role fails.
pub async fn run(
    config: SessionConfig,
    cancel: CancellationToken,
    events: Option<UnboundedSender<TrainingEvent>>,
) -> Result<SessionOutcome> {
    config.validate()?;

    let poller = Poller::with_cancellation(config.poll_interval(), cancel.clone());
    let (coord_end, worker_end) = comms::mailbox(config.training.ring(), poller);

    let mut coordinator = Coordinator::new(config.training.clone(), coord_end, LogCanvas)?;
    if let Some(events) = events {
        coordinator = coordinator.with_events(events);
    }

    let worker_config = config.worker;
    let stop = cancel.clone();
    let worker = task::spawn_blocking(move || {
        let _stop = stop.drop_guard();
        let mut worker = WorkerBuilder::build(&worker_config)?;
        worker.run(worker_end)
    });

    let coordinator = task::spawn_blocking(move || {
        let _stop = cancel.drop_guard();
        coordinator.run()
    });

    let summary = coordinator.await??;
    let stats = worker.await??;

    info!(
        batches = stats.batches,
        inferences = stats.inferences;
        "session finished"
    );

    Ok(SessionOutcome { summary, stats })
}
