//! Lazy position-indexed buffering of the model stream.

use tokio::sync::mpsc;

use crate::character::Character;

/// Pull-through cache over the model receiver.
///
/// Retains every character seen so far, indexed by position, so the
/// comparator can re-read a position after the attempt rewinds without
/// another pull from the source. Pulling is strictly sequential; positions
/// are never skipped or reordered.
#[derive(Debug)]
pub struct ModelBuffer<C> {
    chars: Vec<char>,
    source: mpsc::Receiver<C>,
}

impl<C: Character> ModelBuffer<C> {
    /// Create a buffer over `source` with the given capacity hint.
    ///
    /// The hint is an allocation optimization only; the buffer grows without
    /// bound as further positions are requested.
    pub fn new(source: mpsc::Receiver<C>, capacity: usize) -> Self {
        Self {
            chars: Vec::with_capacity(capacity),
            source,
        }
    }

    /// The model character at position `i`.
    ///
    /// Materialized positions return immediately without touching the
    /// source. Positions beyond the materialized prefix pull sequentially,
    /// appending every pulled character, until `i` exists. Returns `None`
    /// if the source is exhausted first.
    pub async fn get(&mut self, i: usize) -> Option<char> {
        while i >= self.chars.len() {
            let ch = self.source.recv().await?;
            self.chars.push(ch.rune());
        }
        Some(self.chars[i])
    }

    /// Number of positions materialized so far.
    pub fn materialized(&self) -> usize {
        self.chars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_of(chars: &str) -> mpsc::Receiver<char> {
        let (tx, rx) = mpsc::channel(chars.len().max(1));
        for ch in chars.chars() {
            tx.try_send(ch).unwrap();
        }
        rx
    }

    #[tokio::test]
    async fn pulls_sequentially_up_to_the_requested_position() {
        let mut buffer = ModelBuffer::new(source_of("abc"), 4);
        assert_eq!(buffer.get(1).await, Some('b'));
        assert_eq!(buffer.materialized(), 2);
    }

    #[tokio::test]
    async fn materialized_positions_are_served_from_the_cache() {
        let mut buffer = ModelBuffer::new(source_of("ab"), 4);
        assert_eq!(buffer.get(1).await, Some('b'));
        // Source is now drained and closed; earlier positions still resolve.
        assert_eq!(buffer.get(0).await, Some('a'));
        assert_eq!(buffer.get(1).await, Some('b'));
    }

    #[tokio::test]
    async fn exhausted_source_yields_none() {
        let mut buffer = ModelBuffer::new(source_of("ab"), 4);
        assert_eq!(buffer.get(2).await, None);
        // The retained prefix survives exhaustion.
        assert_eq!(buffer.get(0).await, Some('a'));
    }

    #[tokio::test]
    async fn empty_source_yields_none_immediately() {
        let mut buffer = ModelBuffer::new(source_of(""), 4);
        assert_eq!(buffer.get(0).await, None);
        assert_eq!(buffer.materialized(), 0);
    }
}
