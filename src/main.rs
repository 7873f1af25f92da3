use std::{env, path::PathBuf};

use anyhow::Context;
use log::{debug, info};
use orchestrator::TrainingEvent;
use tinn_orchestra::{Mode, SessionConfig, local, session};
use tokio::{signal, sync::mpsc, task};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .or_else(|| env::var("TINN_CONFIG").ok())
        .map(PathBuf::from);

    let mut config = SessionConfig::load(path.as_deref())
        .with_context(|| format!("failed to load the config from {path:?}"))?;

    if env::var("TINN_MODE").is_ok_and(|mode| mode == "local") {
        config.mode = Mode::Local;
    }

    match config.mode {
        Mode::Local => {
            let summary = task::spawn_blocking(move || local::run(&config))
                .await
                .context("local run panicked")??;

            info!(
                passed = summary.passed,
                failed = summary.failed();
                "local run finished"
            );
        }
        Mode::Mailbox => {
            let cancel = CancellationToken::new();
            let (tx, mut rx) = mpsc::unbounded_channel();

            let logger = tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    log_event(event);
                }
            });

            let mut session = tokio::spawn(session::run(config, cancel.clone(), Some(tx)));

            let outcome = tokio::select! {
                ret = &mut session => ret,
                _ = signal::ctrl_c() => {
                    info!("received ctrl-c, stopping");
                    cancel.cancel();
                    session.await
                }
            };

            let outcome = outcome.context("session panicked")??;
            logger.await?;

            info!(
                trained = outcome.summary.train_reports.len(),
                inferences = outcome.summary.inferences,
                passed = outcome.summary.passed;
                "done"
            );
        }
    }

    Ok(())
}

fn log_event(event: TrainingEvent) {
    match event {
        TrainingEvent::Ready { items } => info!("worker shared {items} items"),
        TrainingEvent::Trained { index, .. } => debug!("batch {index} trained"),
        TrainingEvent::Inferred { index, correct, .. } => {
            debug!(correct = correct; "inference {index} received")
        }
        TrainingEvent::Done(summary) => match summary.accuracy() {
            Some(accuracy) => info!("accuracy {:.1}%", accuracy * 100.),
            None => info!("no inference was run"),
        },
    }
}
