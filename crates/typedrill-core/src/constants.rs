//! Engine constants for typedrill.

// =============================================================================
// Character Constants
// =============================================================================

/// Sentinel code point meaning "remove the previous attempt character".
///
/// Only attempt streams may carry it; in a model stream it is illegal input.
pub const BACKSPACE: char = '\u{0008}';

/// Visible placeholder used when the backspace sentinel must be rendered.
pub const BACKSPACE_DISPLAY: char = '\u{2190}';

// =============================================================================
// Buffering Constants
// =============================================================================

/// Model buffer capacity hint when no deadline is configured.
pub const DEFAULT_MODEL_BUFFER_CAPACITY: usize = 1000;

/// Expected model throughput used to derive a capacity hint from a deadline.
pub const MODEL_CHARS_PER_SEC_HINT: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backspace_is_a_control_character() {
        assert!(BACKSPACE.is_control());
    }

    #[test]
    fn backspace_placeholder_is_visible() {
        assert!(!BACKSPACE_DISPLAY.is_control());
        assert!(!BACKSPACE_DISPLAY.is_whitespace());
    }
}
