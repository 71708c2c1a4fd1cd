use std::time::Duration;

use crate::diagnostics::{Diagnostics, FrameReport};

/// Ring buffer of recent frame durations.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    history: Vec<Duration>,
    index: usize,
    filled: bool,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(120)
    }
}

impl FrameTimer {
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            history: vec![Duration::ZERO; capacity.max(1)],
            index: 0,
            filled: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.history.len()
    }

    pub fn record(&mut self, dt: Duration) {
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.history.len();
        if self.index == 0 {
            self.filled = true;
        }
    }

    pub fn count(&self) -> usize {
        if self.filled {
            self.history.len()
        } else {
            self.index
        }
    }

    fn samples(&self) -> &[Duration] {
        &self.history[..self.count()]
    }

    pub fn average(&self) -> Duration {
        let samples = self.samples();
        if samples.is_empty() {
            return Duration::ZERO;
        }
        samples.iter().sum::<Duration>() / samples.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.samples().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.samples().iter().copied().min().unwrap_or(Duration::ZERO)
    }
}

impl Diagnostics for FrameTimer {
    fn report(&mut self, report: &FrameReport) {
        self.record(report.duration);
    }
}
