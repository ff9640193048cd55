/// One recorded tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub prey: f64,
    pub predator: f64,
}

/// Every `(prey, predator)` pair produced since the last reset, oldest first.
///
/// Grows for the whole run; the chart redraws all of it each frame.
#[derive(Debug, Default, Clone)]
pub struct TimeSeriesRecorder {
    samples: Vec<Sample>,
    max_prey: f64,
    max_predator: f64,
}

impl TimeSeriesRecorder {
    pub fn new() -> Self {
        Self {
            samples: Vec::with_capacity(1000),
            ..Default::default()
        }
    }

    pub fn append(&mut self, prey: f64, predator: f64) {
        self.samples.push(Sample { prey, predator });
        self.max_prey = self.max_prey.max(prey);
        self.max_predator = self.max_predator.max(predator);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.max_prey = 0.0;
        self.max_predator = 0.0;
    }

    pub fn snapshot(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<Sample> {
        self.samples.last().copied()
    }

    /// Largest value of either species seen since the last reset.
    pub fn peak(&self) -> f64 {
        self.max_prey.max(self.max_predator)
    }

    pub fn max_prey(&self) -> f64 {
        self.max_prey
    }

    pub fn max_predator(&self) -> f64 {
        self.max_predator
    }
}
