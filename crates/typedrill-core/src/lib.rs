//! typedrill-core: streaming comparison engine for typing practice.
//!
//! This crate provides:
//! - Character input types and the backspace sentinel
//! - A lazy, position-indexed model buffer that supports rewinding
//! - The streaming diff engine with correctness state and statistics
//! - An async comparison pipeline with deadline-driven shutdown
//! - Logging setup
//!
//! The engine consumes two independently paced character streams and emits
//! one event per accepted attempt input. It does not fetch, render, retry,
//! or persist anything; producers and consumers connect through plain tokio
//! channels.

pub mod character;
pub mod comparison;
pub mod constants;
pub mod error;
pub mod logging;

pub use character::Character;
pub use comparison::{CloseReason, CompareOptions, Comparison, compare};
pub use error::{Error, Result};
pub use logging::{LogFormat, init_logging};
