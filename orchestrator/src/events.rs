/// What the coordinator reports while it runs.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingEvent {
    /// The worker finished its startup and shared a dataset of `items` items.
    Ready { items: usize },
    Trained { index: usize, report: String },
    Inferred {
        index: usize,
        report: String,
        correct: bool,
    },
    Done(Summary),
}

/// The results collected by a coordinator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Every training status line, in order.
    pub train_reports: Vec<String>,
    pub inferences: usize,
    pub passed: usize,
    pub last_inference: Option<String>,
}

impl Summary {
    pub fn failed(&self) -> usize {
        self.inferences - self.passed
    }

    /// The share of correct inferences, `None` before the first one.
    pub fn accuracy(&self) -> Option<f32> {
        (self.inferences > 0).then(|| self.passed as f32 / self.inferences as f32)
    }
}
