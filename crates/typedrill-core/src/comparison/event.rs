//! Comparison output event types.
//!
//! One [`Comparison`] is emitted per accepted attempt input. It carries the
//! run-wide state, the single change caused by the input, and a statistics
//! snapshot. All types serialize, so downstream consumers can forward events
//! over any boundary without re-encoding.

use serde::{Deserialize, Serialize};

/// Run-wide correctness after processing one attempt input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Whether the attempt, considered as a whole, currently equals the
    /// model prefix it has produced.
    pub correct: bool,
    /// Whether `correct` differs from the immediately preceding event.
    pub status_changed: bool,
}

/// The change of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    /// The code point that was typed or deleted.
    pub ch: char,
    /// Index of the character that is added or deleted.
    pub position: usize,
    /// True if this modification is a backspace.
    pub deletion: bool,
    /// True if the considered character equals its model counterpart.
    ///
    /// Always true for deletions. Also true for a matching character typed
    /// while the run as a whole is still incorrect; run-wide correctness
    /// lives in [`State::correct`].
    pub correct: bool,
}

/// Running statistics over a comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    /// Characters currently present in the attempt (deletions subtracted).
    pub total_characters: usize,
    /// Total amount of correctly typed characters currently present.
    pub correct_characters: usize,
    /// Total amount of correctly typed word separators.
    pub correct_words: usize,
    /// Total amount of characters that did not match their model
    /// counterpart, including ones removed again by backspaces.
    pub total_misses: usize,
    /// `total_misses / total_characters`; 0.0 while `total_characters` is 0.
    pub failure_rate: f64,
}

/// One emitted record describing state, the latest change, and updated
/// statistics after processing one accepted attempt input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Run-wide correctness state.
    pub state: State,
    /// The changes caused by the input. The engine always emits a single
    /// entry; the type allows more for future batched updates.
    pub changes: Vec<Modification>,
    /// Statistics snapshot after applying the change.
    pub statistics: Statistics,
}

impl Comparison {
    /// The modification carried by this event.
    pub fn change(&self) -> Option<&Modification> {
        self.changes.first()
    }
}
