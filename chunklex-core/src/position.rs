//! Line and column bookkeeping for emitted units

use serde::{Deserialize, Serialize};

/// A location in the original text
///
/// `line` is 1-based; `column` is zero-based and counted in Unicode scalar
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number, starting at 1
    pub line: usize,
    /// Column within the line, starting at 0
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 0 }
    }
}

/// Cursor advanced over consumed text, in stream order
///
/// The cursor only ever moves forward.
#[derive(Debug, Clone, Default)]
pub struct PositionTracker {
    cursor: Position,
}

impl PositionTracker {
    /// Create a tracker positioned at the start of the stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor
    pub fn position(&self) -> Position {
        self.cursor
    }

    /// Move the cursor past `text`
    pub fn advance(&mut self, text: &str) {
        match text.rfind('\n') {
            Some(last) => {
                self.cursor.line += text.bytes().filter(|&b| b == b'\n').count();
                self.cursor.column = text[last + 1..].chars().count();
            }
            None => self.cursor.column += text.chars().count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_first_line() {
        let tracker = PositionTracker::new();
        assert_eq!(tracker.position(), Position { line: 1, column: 0 });
    }

    #[test]
    fn test_advance_within_line() {
        let mut tracker = PositionTracker::new();
        tracker.advance("The");
        tracker.advance(" ");
        assert_eq!(tracker.position(), Position { line: 1, column: 4 });
    }

    #[test]
    fn test_advance_across_lines() {
        let mut tracker = PositionTracker::new();
        tracker.advance("abc");
        tracker.advance("# Title\n:");
        assert_eq!(tracker.position(), Position { line: 2, column: 1 });

        tracker.advance("x\n\nyz");
        assert_eq!(tracker.position(), Position { line: 4, column: 2 });
    }

    #[test]
    fn test_trailing_newline_resets_column() {
        let mut tracker = PositionTracker::new();
        tracker.advance("content...");
        tracker.advance("\n");
        assert_eq!(tracker.position(), Position { line: 2, column: 0 });
    }

    #[test]
    fn test_columns_count_chars_not_bytes() {
        let mut tracker = PositionTracker::new();
        tracker.advance("こんにちは");
        assert_eq!(tracker.position().column, 5);
    }

    #[test]
    fn test_empty_text_is_noop() {
        let mut tracker = PositionTracker::new();
        tracker.advance("ab");
        tracker.advance("");
        assert_eq!(tracker.position(), Position { line: 1, column: 2 });
    }
}
