//! The async comparison pipeline.
//!
//! Wires an attempt receiver through the diff engine and the model buffer,
//! emitting one comparison event per accepted input. The pipeline owns all
//! engine state and the output sender; the optional deadline is raced
//! against every await, so neither producer has to cooperate for the run to
//! close on time.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::character::{Character, is_printable};
use crate::comparison::buffer::ModelBuffer;
use crate::comparison::engine::DiffEngine;
use crate::comparison::event::Comparison;
use crate::constants::{DEFAULT_MODEL_BUFFER_CAPACITY, MODEL_CHARS_PER_SEC_HINT};
use crate::error::{Error, Result};

/// Why a comparison run stopped.
///
/// Every variant is a normal termination. The one fatal outcome, untypeable
/// model content, is reported as an error instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The configured deadline elapsed.
    Deadline,
    /// The attempt stream was closed by its producer.
    AttemptExhausted,
    /// The model stream ended while the attempt tried to advance past it.
    ModelExhausted,
    /// The event receiver was dropped by the consumer.
    Abandoned,
}

/// Options for a comparison run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareOptions {
    deadline: Option<Duration>,
    buffer_capacity: Option<usize>,
}

impl CompareOptions {
    /// Options with no deadline and the default buffer capacity hint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the run once `deadline` has elapsed, measured from the start
    /// of the run.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Override the model buffer capacity hint.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = Some(capacity);
        self
    }

    /// The configured deadline, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Capacity hint for the model buffer.
    ///
    /// An explicit override wins; otherwise the hint is derived from the
    /// deadline (a typing-speed estimate per second), falling back to the
    /// default for unbounded runs.
    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity.unwrap_or(match self.deadline {
            Some(deadline) => deadline.as_secs() as usize * MODEL_CHARS_PER_SEC_HINT,
            None => DEFAULT_MODEL_BUFFER_CAPACITY,
        })
    }
}

/// Compare the model and attempt streams, emitting one [`Comparison`] per
/// accepted attempt input to `output`, in attempt-arrival order.
///
/// The run ends when either input stream is exhausted, when the optional
/// deadline elapses, or when the output receiver is dropped; all of these
/// close the output cleanly and report a [`CloseReason`]. Untypeable model
/// content aborts the run with [`Error::IllegalModelCharacter`] instead.
/// An event still in flight when the deadline fires is discarded, never
/// delivered.
///
/// # Example
///
/// ```ignore
/// use tokio::sync::mpsc;
/// use typedrill_core::comparison::{CompareOptions, compare};
///
/// let (event_tx, mut event_rx) = mpsc::channel(64);
/// tokio::spawn(compare(model_rx, attempt_rx, event_tx, CompareOptions::new()));
/// while let Some(event) = event_rx.recv().await {
///     println!("correct: {}", event.state.correct);
/// }
/// ```
pub async fn compare<M, A>(
    model: mpsc::Receiver<M>,
    mut attempt: mpsc::Receiver<A>,
    output: mpsc::Sender<Comparison>,
    options: CompareOptions,
) -> Result<CloseReason>
where
    M: Character,
    A: Character,
{
    let mut buffer = ModelBuffer::new(model, options.buffer_capacity());
    let mut engine = DiffEngine::new();

    debug!(deadline = ?options.deadline, "Comparison run started");

    // Single deadline future, raced against every await below. Each select
    // that sees it complete terminates the run, so it is never polled again
    // after firing.
    let closer = close_signal(options.deadline);
    tokio::pin!(closer);

    let reason = loop {
        let input = tokio::select! {
            _ = &mut closer => break CloseReason::Deadline,
            input = attempt.recv() => match input {
                Some(input) => input,
                None => break CloseReason::AttemptExhausted,
            },
        };

        let ch = input.rune();
        let event = if input.is_backspace() {
            match engine.backspace(ch) {
                Some(event) => event,
                // Backspace into an empty attempt: ignored, no event.
                None => continue,
            }
        } else {
            let model_ch = tokio::select! {
                _ = &mut closer => break CloseReason::Deadline,
                model_ch = buffer.get(engine.length()) => match model_ch {
                    Some(model_ch) => model_ch,
                    None => break CloseReason::ModelExhausted,
                },
            };
            if !is_printable(model_ch) {
                warn!(
                    codepoint = %model_ch.escape_unicode(),
                    position = engine.length(),
                    "Model stream contained an untypeable character"
                );
                return Err(Error::illegal_model_character(model_ch));
            }
            engine.advance(ch, model_ch)
        };

        // The deadline arm comes first: an event computed while the run was
        // closing is dropped rather than delivered after the close.
        tokio::select! {
            biased;
            _ = &mut closer => break CloseReason::Deadline,
            sent = output.send(event) => {
                if sent.is_err() {
                    break CloseReason::Abandoned;
                }
            }
        }
    };

    debug!(
        ?reason,
        typed = engine.statistics().total_characters,
        misses = engine.statistics().total_misses,
        "Comparison run closed"
    );
    Ok(reason)
}

/// Completes when the deadline elapses; pends forever without one.
async fn close_signal(deadline: Option<Duration>) {
    match deadline {
        Some(deadline) => sleep(deadline).await,
        None => std::future::pending().await,
    }
}
