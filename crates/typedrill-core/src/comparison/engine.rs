//! The comparison state machine.
//!
//! Pure transition logic, one call per attempt character, no I/O. The async
//! pipeline feeds it inputs and model lookups and emits the returned events;
//! everything here is synchronous and deterministic, so replaying the same
//! input sequence reproduces identical output.

use crate::comparison::event::{Comparison, Modification, State, Statistics};

/// Streaming diff state for one comparison run.
///
/// Tracks how much of the attempt is currently present, how far the attempt
/// has ever been continuously correct, and the running statistics. State is
/// created fresh per run and discarded with it.
#[derive(Debug)]
pub struct DiffEngine {
    /// Characters currently present in the attempt.
    length: usize,
    /// Highest length reached with an unbroken correct prefix; -1 if the
    /// attempt has never been correct beyond the empty prefix.
    frontier: isize,
    /// Run-wide correctness after the previous event. The empty attempt
    /// counts as correct.
    was_correct: bool,
    /// Statistics snapshot after the previous event.
    stats: Statistics,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffEngine {
    /// Create an engine in the initial (empty, correct) state.
    pub fn new() -> Self {
        Self {
            length: 0,
            frontier: -1,
            was_correct: true,
            stats: Statistics::default(),
        }
    }

    /// Characters currently present in the attempt.
    ///
    /// This is also the position the next non-backspace input is compared
    /// at.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Statistics snapshot after the last accepted input.
    pub fn statistics(&self) -> Statistics {
        self.stats
    }

    /// Apply a backspace.
    ///
    /// Returns `None` when the attempt is empty: the input is ignored, no
    /// event is produced, and nothing changes. Otherwise removes the last
    /// attempt character, exactly reversing the forward update that created
    /// it.
    pub fn backspace(&mut self, ch: char) -> Option<Comparison> {
        if self.length == 0 {
            return None;
        }
        let new_length = self.length - 1;

        // Correct again iff everything left of the removed character lies
        // within the correct frontier.
        let correct = new_length as isize - 1 <= self.frontier;
        let status_changed = new_length as isize - 1 == self.frontier;

        let mut correct_characters = self.stats.correct_characters;
        if self.was_correct {
            correct_characters -= 1;
        }
        let statistics = Statistics {
            total_characters: new_length,
            correct_characters,
            correct_words: self.stats.correct_words,
            total_misses: self.stats.total_misses,
            failure_rate: failure_rate(self.stats.total_misses, new_length),
        };

        if self.frontier == new_length as isize {
            self.frontier -= 1;
        }
        self.length = new_length;
        self.was_correct = correct;
        self.stats = statistics;

        Some(Comparison {
            state: State {
                correct,
                status_changed,
            },
            changes: vec![Modification {
                ch,
                position: new_length,
                deletion: true,
                correct: true,
            }],
            statistics,
        })
    }

    /// Apply a normal character against its model counterpart.
    ///
    /// The caller resolves `model` from the model buffer at
    /// [`length`](Self::length) and rejects untypeable model content before
    /// calling this.
    pub fn advance(&mut self, ch: char, model: char) -> Comparison {
        let correct;
        let status_changed;
        let modification_correct;

        let mut statistics = self.stats;
        statistics.total_characters = self.length + 1;

        if ch == model {
            // Per-character match. Run-wide correctness only recovers
            // through deletions, so an earlier mismatch keeps the run
            // incorrect even though this character is right.
            modification_correct = true;
            status_changed = false;
            if self.was_correct {
                self.frontier = self.length as isize;
                correct = true;
                statistics.correct_characters += 1;
                if ch.is_whitespace() {
                    statistics.correct_words += 1;
                }
            } else {
                correct = false;
            }
        } else {
            correct = false;
            status_changed = self.was_correct;
            modification_correct = false;
            statistics.total_misses += 1;
        }
        statistics.failure_rate =
            failure_rate(statistics.total_misses, statistics.total_characters);

        let event = Comparison {
            state: State {
                correct,
                status_changed,
            },
            changes: vec![Modification {
                ch,
                position: self.length,
                deletion: false,
                correct: modification_correct,
            }],
            statistics,
        };

        self.length += 1;
        self.was_correct = correct;
        self.stats = statistics;
        event
    }
}

/// Misses per present character; 0.0 for the empty attempt.
fn failure_rate(misses: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        misses as f64 / total as f64
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_empty_and_correct() {
        let engine = DiffEngine::new();
        assert_eq!(engine.length, 0);
        assert_eq!(engine.frontier, -1);
        assert!(engine.was_correct);
        assert_eq!(engine.statistics(), Statistics::default());
    }

    #[test]
    fn matching_characters_advance_the_frontier() {
        let mut engine = DiffEngine::new();

        let event = engine.advance('a', 'a');
        assert!(event.state.correct);
        assert!(!event.state.status_changed);
        assert_eq!(event.statistics.total_characters, 1);
        assert_eq!(event.statistics.correct_characters, 1);

        let event = engine.advance('b', 'b');
        assert!(event.state.correct);
        assert_eq!(event.statistics.total_characters, 2);
        assert_eq!(event.statistics.correct_characters, 2);
        assert_eq!(engine.frontier, 1);
    }

    #[test]
    fn first_mismatch_flips_the_status() {
        let mut engine = DiffEngine::new();
        engine.advance('a', 'a');

        let event = engine.advance('x', 'b');
        assert!(!event.state.correct);
        assert!(event.state.status_changed);
        assert_eq!(event.statistics.total_misses, 1);
        assert!(!event.change().unwrap().correct);

        // A second mismatch is no longer a transition.
        let event = engine.advance('y', 'c');
        assert!(!event.state.correct);
        assert!(!event.state.status_changed);
        assert_eq!(event.statistics.total_misses, 2);
    }

    #[test]
    fn match_while_incorrect_is_correct_per_character_only() {
        let mut engine = DiffEngine::new();
        engine.advance('x', 'a');

        let event = engine.advance('b', 'b');
        assert!(!event.state.correct);
        assert!(!event.state.status_changed);
        assert!(event.change().unwrap().correct);
        // No statistics credit while the run is incorrect.
        assert_eq!(event.statistics.correct_characters, 0);
        assert_eq!(event.statistics.total_misses, 1);
    }

    #[test]
    fn whitespace_matches_count_words() {
        let mut engine = DiffEngine::new();
        engine.advance('a', 'a');
        let event = engine.advance(' ', ' ');
        assert_eq!(event.statistics.correct_words, 1);

        // A space typed while incorrect earns no word.
        engine.advance('x', 'b');
        let event = engine.advance(' ', ' ');
        assert_eq!(event.statistics.correct_words, 1);
    }

    #[test]
    fn backspace_on_empty_attempt_is_ignored() {
        let mut engine = DiffEngine::new();
        assert!(engine.backspace('\u{8}').is_none());
        assert_eq!(engine.length, 0);
        assert_eq!(engine.statistics(), Statistics::default());
    }

    #[test]
    fn backspace_reverses_a_correct_character() {
        let mut engine = DiffEngine::new();
        engine.advance('a', 'a');

        let event = engine.backspace('\u{8}').unwrap();
        assert!(event.state.correct);
        assert!(event.state.status_changed);
        let change = event.change().unwrap();
        assert!(change.deletion);
        assert!(change.correct);
        assert_eq!(change.position, 0);
        assert_eq!(event.statistics.total_characters, 0);
        assert_eq!(event.statistics.correct_characters, 0);
    }

    #[test]
    fn backspace_past_a_mismatch_recovers_correctness() {
        let mut engine = DiffEngine::new();
        engine.advance('a', 'a');
        let event = engine.advance('x', 'b');
        assert!(!event.state.correct);

        let event = engine.backspace('\u{8}').unwrap();
        assert!(event.state.correct);
        assert!(event.state.status_changed);
        assert_eq!(event.statistics.total_characters, 1);
        // The miss remains on record even though the run is correct again.
        assert_eq!(event.statistics.total_misses, 1);
    }

    #[test]
    fn rewinding_everything_restores_the_initial_engine_state() {
        let mut engine = DiffEngine::new();
        engine.advance('a', 'a');
        engine.advance('b', 'b');
        engine.advance('c', 'c');
        for _ in 0..3 {
            assert!(engine.backspace('\u{8}').is_some());
        }

        assert_eq!(engine.length, 0);
        assert_eq!(engine.frontier, -1);
        assert!(engine.was_correct);
        assert_eq!(engine.statistics(), Statistics::default());
    }

    #[test]
    fn failure_rate_is_zero_after_rewinding_a_miss_to_the_start() {
        let mut engine = DiffEngine::new();
        engine.advance('x', 'a');

        let event = engine.backspace('\u{8}').unwrap();
        assert_eq!(event.statistics.total_characters, 0);
        assert_eq!(event.statistics.total_misses, 1);
        assert_eq!(event.statistics.failure_rate, 0.0);
        assert!(engine.was_correct);
    }

    #[test]
    fn total_characters_always_equals_the_current_length() {
        let mut engine = DiffEngine::new();
        let script: &[(char, Option<char>)] = &[
            ('a', Some('a')),
            ('x', Some('b')),
            ('\u{8}', None),
            ('b', Some('b')),
            ('\u{8}', None),
            ('\u{8}', None),
            ('\u{8}', None),
        ];
        for &(ch, model) in script {
            let event = match model {
                Some(m) => Some(engine.advance(ch, m)),
                None => engine.backspace(ch),
            };
            if let Some(event) = event {
                assert_eq!(event.statistics.total_characters, engine.length());
            }
        }
    }

    #[test]
    fn failure_rate_matches_the_miss_quotient_on_every_event() {
        let mut engine = DiffEngine::new();
        let events = [
            engine.advance('a', 'a'),
            engine.advance('x', 'b'),
            engine.advance('b', 'c'),
            engine.backspace('\u{8}').unwrap(),
            engine.advance('c', 'c'),
        ];
        for event in events {
            let stats = event.statistics;
            let expected = if stats.total_characters == 0 {
                0.0
            } else {
                stats.total_misses as f64 / stats.total_characters as f64
            };
            assert_eq!(stats.failure_rate, expected);
        }
    }
}
