//! Developer tooling: per-frame diagnostics, frame timing and a read-only
//! scene inspector.
//!
//! # Invariants
//! - Tools only read scene state.

pub mod diagnostics;
pub mod inspector;
pub mod timer;

pub use diagnostics::{Diagnostics, FrameReport, LatestReport, TracingDiagnostics};
pub use inspector::{SceneInspector, SceneSummary};
pub use timer::FrameTimer;
