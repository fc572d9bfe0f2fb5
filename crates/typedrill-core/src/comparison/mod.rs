//! Character-stream comparison.
//!
//! A "model" stream of printable characters is compared, character by
//! character, against a typist's "attempt" stream, which may also carry
//! backspaces. The result is a third stream of [`Comparison`] events
//! describing the run's state, the latest change, and running statistics.
//!
//! This module provides:
//! - Output event types ([`Comparison`], [`State`], [`Modification`],
//!   [`Statistics`])
//! - The pure transition state machine ([`DiffEngine`])
//! - Lazy indexed buffering of the model stream ([`ModelBuffer`])
//! - The async pipeline ([`compare`]) with deadline-driven shutdown

mod buffer;
mod engine;
mod event;
mod pipeline;

pub use buffer::ModelBuffer;
pub use engine::DiffEngine;
pub use event::{Comparison, Modification, State, Statistics};
pub use pipeline::{CloseReason, CompareOptions, compare};
