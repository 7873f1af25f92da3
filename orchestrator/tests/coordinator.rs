use std::{
    fmt::Write,
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

use comms::{Command, Poller, WorkerEnd};
use display::{Canvas, Color, Rect};
use machine_learning::dataset::{Batch, Dataset, synthetic};
use orchestrator::{Coordinator, OrchestratorError, TrainingConfig, TrainingEvent};
use rand::{SeedableRng, rngs::StdRng};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Clone, Default)]
struct SharedCanvas(Arc<Mutex<Vec<String>>>);

impl Canvas for SharedCanvas {
    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}

    fn draw_text(&mut self, _x: u32, _y: u32, text: &str, _color: Color) {
        self.0.lock().unwrap().push(text.to_string());
    }
}

fn config() -> TrainingConfig {
    TrainingConfig {
        train_iterations: 3,
        batch_size: 4,
        max_batch: 8,
        infer_limit: Some(2),
        ..Default::default()
    }
}

fn dataset() -> Arc<Dataset> {
    Arc::new(synthetic::generate(10, 16, 2, &mut StdRng::seed_from_u64(0)))
}

/// Fails the test instead of hanging if the schedule deadlocks.
fn watchdog(cancel: CancellationToken) {
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(10));
        cancel.cancel();
    });
}

fn answer(command: Command, batch: &Batch) -> (String, Option<Vec<f32>>) {
    match command {
        Command::Train { n_items } => {
            assert_eq!(batch.len() as u64, n_items);
            (format!("train(): n_items={n_items}"), None)
        }
        Command::Infer => {
            assert_eq!(batch.len(), 1);
            ("infer(): PASS".to_string(), Some(batch[0].target().to_vec()))
        }
        other => panic!("unexpected {other}"),
    }
}

/// A worker that only answers a command once the next one has been submitted,
/// which only works if the coordinator keeps one command in flight.
fn lagging_worker(mut end: WorkerEnd<Batch, Dataset>, total: usize) -> Vec<Command> {
    end.announce_ready(dataset()).unwrap();

    let mut seen = Vec::new();
    let mut pending = None;

    for _ in 0..total {
        let delivery = end.wait_command().unwrap();
        seen.push(delivery.command());
        let answer = answer(delivery.command(), delivery.batch());
        drop(delivery);

        if let Some((msg, values)) = pending.replace(answer) {
            publish(&mut end, msg, values);
        }
    }

    let (msg, values) = pending.unwrap();
    publish(&mut end, msg, values);
    seen
}

fn publish(end: &mut WorkerEnd<Batch, Dataset>, msg: String, values: Option<Vec<f32>>) {
    end.publish(|report| {
        report.msg_mut().write_str(&msg).unwrap();
        if let Some(values) = values {
            report.set_values(&values);
        }
    })
    .unwrap();
}

#[test]
fn next_command_is_submitted_before_the_previous_result_is_taken() {
    let cancel = CancellationToken::new();
    watchdog(cancel.clone());

    let config = config();
    let poller = Poller::with_cancellation(Duration::ZERO, cancel);
    let (coord, end) = comms::mailbox(config.ring(), poller);

    let worker = thread::spawn(move || lagging_worker(end, 5));
    let canvas = SharedCanvas::default();
    let summary = Coordinator::new(config, coord, canvas.clone())
        .unwrap()
        .run()
        .unwrap();

    let seen = worker.join().unwrap();
    assert_eq!(
        seen,
        [
            Command::Train { n_items: 4 },
            Command::Train { n_items: 4 },
            Command::Train { n_items: 4 },
            Command::Infer,
            Command::Infer,
        ]
    );

    assert_eq!(summary.train_reports, ["train(): n_items=4"; 3]);
    assert_eq!((summary.inferences, summary.passed), (2, 2));
    assert_eq!(summary.accuracy(), Some(1.));

    let texts = canvas.0.lock().unwrap();
    assert!(texts.iter().any(|t| t == "TRAINING"));
    assert!(texts.iter().any(|t| t == "PREDICT"));
}

#[test]
fn results_are_published_as_events() {
    let config = config();
    let (coord, end) = comms::mailbox(config.ring(), Poller::new(Duration::ZERO));
    let (tx, mut rx) = mpsc::unbounded_channel();

    let worker = thread::spawn(move || lagging_worker(end, 5));
    let summary = Coordinator::new(config, coord, SharedCanvas::default())
        .unwrap()
        .with_events(tx)
        .run()
        .unwrap();
    worker.join().unwrap();

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    assert_eq!(events.len(), 7);
    assert_eq!(events[0], TrainingEvent::Ready { items: 10 });
    assert!(matches!(&events[1], TrainingEvent::Trained { index: 0, .. }));
    assert!(matches!(
        &events[5],
        TrainingEvent::Inferred {
            index: 4,
            correct: true,
            ..
        }
    ));
    assert_eq!(events[6], TrainingEvent::Done(summary));
}

#[test]
fn cancellation_ends_an_unbounded_schedule() {
    let cancel = CancellationToken::new();
    let config = TrainingConfig {
        infer_limit: None,
        ..config()
    };

    let poller = Poller::with_cancellation(Duration::ZERO, cancel.clone());
    let (coord, mut end) = comms::mailbox::<Batch, Dataset>(config.ring(), poller);

    // Answers everything until the coordinator gives up.
    let worker = thread::spawn(move || {
        end.announce_ready(dataset()).unwrap();
        let mut answered = 0;

        loop {
            let Ok(delivery) = end.wait_command() else {
                break;
            };
            let (msg, values) = answer(delivery.command(), delivery.batch());
            drop(delivery);

            if end.publish(|report| {
                report.msg_mut().write_str(&msg).unwrap();
                if let Some(values) = values {
                    report.set_values(&values);
                }
            })
            .is_err()
            {
                break;
            }

            answered += 1;
            if answered == 20 {
                cancel.cancel();
            }
        }
    });

    let summary = Coordinator::new(config, coord, SharedCanvas::default())
        .unwrap()
        .run()
        .unwrap();
    worker.join().unwrap();

    assert_eq!(summary.train_reports.len(), 3);
    assert!(summary.inferences >= 16);
}

#[test]
fn invalid_config_is_rejected() {
    let config = TrainingConfig {
        batch_size: 0,
        ..config()
    };
    let (coord, _end) = comms::mailbox::<Batch, Dataset>(config.ring(), Poller::default());

    assert!(matches!(
        Coordinator::new(config, coord, SharedCanvas::default()),
        Err(OrchestratorError::InvalidConfig(_))
    ));
}
