//! Input surface: keyboard keys, pointer drags and control-panel events mapped
//! onto scene mutations.
//!
//! # Invariants
//! - Every event is applied synchronously and completely before the next one,
//!   so a tick never observes a half-applied edit.
//! - Drag orientation is applied per pointer-move event, not per frame.

pub mod action;
pub mod handler;

pub use action::{Action, PAN_STEP_DEGREES, action_for_key};
pub use handler::{InputEvent, InputHandler, Slider, Toggle};
