use machine_learning::arch::Dims;
use orchestrator::{TrainingConfig, TrainingEvent};
use tinn_orchestra::{SessionConfig, SessionError, local, session};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use worker::{DatasetSource, WorkerConfig, WorkerErr, WorkerStats};

fn small_config() -> SessionConfig {
    SessionConfig {
        poll_interval_us: 0,
        worker: WorkerConfig {
            dims: Dims::new(64, 12, 4),
            dataset: DatasetSource::Synthetic { items: 120 },
            ..Default::default()
        },
        training: TrainingConfig {
            train_iterations: 40,
            batch_size: 30,
            max_batch: 64,
            infer_limit: Some(50),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn bounded_session_over_the_mailbox() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let outcome = session::run(small_config(), CancellationToken::new(), Some(tx))
        .await
        .unwrap();

    assert_eq!(
        outcome.stats,
        WorkerStats {
            batches: 40,
            items: 1200,
            inferences: 50,
            unknown: 0,
        }
    );

    let summary = &outcome.summary;
    assert_eq!(summary.train_reports.len(), 40);
    assert!(summary.train_reports[0].starts_with("train(): n_items=30 rate=1.000000 error="));
    assert!(summary.train_reports[1].starts_with("train(): n_items=30 rate=0.990000 error="));
    assert_eq!(summary.inferences, 50);
    assert!(summary.passed > 40, "only {} of 50 passed", summary.passed);

    let mut last = None;
    while let Some(event) = rx.recv().await {
        last = Some(event);
    }
    assert_eq!(last, Some(TrainingEvent::Done(outcome.summary.clone())));
}

#[tokio::test(flavor = "multi_thread")]
async fn cancelling_an_unbounded_session() {
    let mut config = small_config();
    config.training.infer_limit = None;

    let cancel = CancellationToken::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = tokio::spawn(session::run(config, cancel.clone(), Some(tx)));

    // Wait until inference is running.
    while let Some(event) = rx.recv().await {
        if matches!(event, TrainingEvent::Inferred { .. }) {
            break;
        }
    }
    cancel.cancel();

    let outcome = session.await.unwrap().unwrap();
    assert_eq!(outcome.summary.train_reports.len(), 40);
    assert!(outcome.summary.inferences >= 1);
    assert!(outcome.stats.inferences >= outcome.summary.inferences);
}

#[tokio::test(flavor = "multi_thread")]
async fn worker_failure_stops_the_coordinator() {
    let mut config = small_config();
    config.worker.dataset = DatasetSource::Semeion {
        path: "/nonexistent/semeion.data".into(),
    };

    let err = session::run(config, CancellationToken::new(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Worker(WorkerErr::Ml(_))));
}

#[tokio::test]
async fn invalid_config_fails_before_starting() {
    let mut config = small_config();
    config.training.batch_size = 100;

    assert!(matches!(
        session::run(config, CancellationToken::new(), None).await,
        Err(SessionError::Orchestrator(_))
    ));
}

#[test]
fn local_run_trains_then_infers() {
    let summary = local::run(&small_config()).unwrap();

    assert_eq!(summary.train_reports.len(), 40);
    assert_eq!(summary.inferences, 50);
    assert!(summary.passed > 40);
    assert!(
        summary
            .last_inference
            .as_deref()
            .is_some_and(|msg| msg.starts_with("infer(): "))
    );
}

#[test]
fn local_run_defaults_to_twenty_inferences() {
    let mut config = small_config();
    config.training.infer_limit = None;

    assert_eq!(local::run(&config).unwrap().inferences, 20);
}
