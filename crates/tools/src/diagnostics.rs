use std::fmt;
use std::time::Duration;

/// Duration of one composed and submitted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub duration: Duration,
}

impl FrameReport {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn millis(&self) -> f64 {
        self.duration.as_nanos() as f64 / 1_000_000.0
    }

    /// Frames per second truncated to one decimal. `None` for a zero duration.
    pub fn fps(&self) -> Option<f64> {
        let ms = self.millis();
        (ms > 0.0).then(|| (10_000.0 / ms).floor() / 10.0)
    }
}

/// `ms: <whole ms> fps: <fps to one decimal>`
impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ms: {}", self.millis().floor())?;
        match self.fps() {
            Some(fps) => write!(f, " fps: {fps:.1}"),
            None => write!(f, " fps: --"),
        }
    }
}

/// Receives one report per tick.
pub trait Diagnostics {
    fn report(&mut self, report: &FrameReport);
}

/// Emits every report as a `trace` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&mut self, report: &FrameReport) {
        tracing::trace!(ms = report.millis(), "{report}");
    }
}

/// Keeps the most recent report text, for display in a UI panel.
#[derive(Debug, Default, Clone)]
pub struct LatestReport {
    text: String,
}

impl LatestReport {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Diagnostics for LatestReport {
    fn report(&mut self, report: &FrameReport) {
        use std::fmt::Write;
        self.text.clear();
        let _ = write!(self.text, "{report}");
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn report(&mut self, report: &FrameReport) {
        (**self).report(report);
    }
}

impl<A: Diagnostics, B: Diagnostics> Diagnostics for (A, B) {
    fn report(&mut self, report: &FrameReport) {
        self.0.report(report);
        self.1.report(report);
    }
}
