//! Test helpers for driving comparison runs without real input devices.
//!
//! Provides channel-backed character streams in the shape the engine
//! consumes, plus an event collector. All builders spawn their producer
//! task immediately, so they must be called from within a tokio runtime.

use std::time::Duration;

use tokio::sync::mpsc;

use typedrill_core::comparison::Comparison;

/// Backspace sentinel, re-exported for test scripts.
pub use typedrill_core::constants::BACKSPACE;

/// A stream delivering the given characters in order, then closing.
pub fn char_stream<I>(chars: I) -> mpsc::Receiver<char>
where
    I: IntoIterator<Item = char> + Send + 'static,
    I::IntoIter: Send,
{
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        for ch in chars {
            if tx.send(ch).await.is_err() {
                return;
            }
        }
    });
    rx
}

/// A stream delivering the given characters in order, then staying open
/// forever.
///
/// Models a producer that stops sending without closing, e.g. a typist who
/// walks away; only a deadline or a dropped receiver ends a run fed by it.
pub fn char_stream_unclosed<I>(chars: I) -> mpsc::Receiver<char>
where
    I: IntoIterator<Item = char> + Send + 'static,
    I::IntoIter: Send,
{
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        for ch in chars {
            if tx.send(ch).await.is_err() {
                return;
            }
        }
        // Hold the sender open so the channel never reports exhaustion.
        std::future::pending::<()>().await;
    });
    rx
}

/// A stream pausing for `delay` before each delivered character.
pub fn char_stream_delayed<I>(chars: I, delay: Duration) -> mpsc::Receiver<char>
where
    I: IntoIterator<Item = char> + Send + 'static,
    I::IntoIter: Send,
{
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        for ch in chars {
            tokio::time::sleep(delay).await;
            if tx.send(ch).await.is_err() {
                return;
            }
        }
    });
    rx
}

/// Drain a comparison run's output until it closes.
pub async fn collect_events(mut events: mpsc::Receiver<Comparison>) -> Vec<Comparison> {
    let mut collected = Vec::new();
    while let Some(event) = events.recv().await {
        collected.push(event);
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn char_stream_delivers_in_order_and_closes() {
        let mut rx = char_stream("abc".chars());
        assert_eq!(rx.recv().await, Some('a'));
        assert_eq!(rx.recv().await, Some('b'));
        assert_eq!(rx.recv().await, Some('c'));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn unclosed_stream_never_reports_exhaustion() {
        let mut rx = char_stream_unclosed("a".chars());
        assert_eq!(rx.recv().await, Some('a'));
        let pending =
            tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(pending.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_stream_waits_between_characters() {
        let start = tokio::time::Instant::now();
        let mut rx = char_stream_delayed("ab".chars(), Duration::from_millis(10));
        assert_eq!(rx.recv().await, Some('a'));
        assert_eq!(rx.recv().await, Some('b'));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
