//! Document access for extraction.
//!
//! Positions are logical `(line, column)` pairs with columns counted in characters (Unicode
//! scalar values). Line terminators (`\n`, `\r\n`, ...) are never part of a line.

use ropey::Rope;
use std::cmp::Ordering;

/// Position coordinates (line and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A selection, from where it was started (`anchor`) to where the caret is (`active`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection was started.
    pub anchor: Position,
    /// Where the caret is.
    pub active: Position,
}

impl Selection {
    /// Create a selection.
    pub fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// An empty selection (a caret) at `pos`.
    pub fn caret(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// Returns `true` if the caret is before the anchor.
    pub fn is_reversed(&self) -> bool {
        self.active < self.anchor
    }

    /// The earlier of anchor and caret.
    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    /// The later of anchor and caret.
    pub fn end(&self) -> Position {
        self.anchor.max(self.active)
    }
}

// Line breaks recognized by ropey's default (`unicode_lines`) line splitting.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Read-only document text backed by a rope.
#[derive(Debug, Clone, Default)]
pub struct Document {
    rope: Rope,
}

impl Document {
    /// Build a document from text.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Wrap an existing rope.
    pub fn from_rope(rope: Rope) -> Self {
        Self { rope }
    }

    /// The underlying rope.
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Number of logical lines (a trailing newline starts an empty last line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Character count of `line` without its terminator, or `None` if out of range.
    pub fn line_len(&self, line: usize) -> Option<usize> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && is_line_break(slice.char(len - 1)) {
            let last = slice.char(len - 1);
            len -= 1;
            if last == '\n' && len > 0 && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        Some(len)
    }

    /// Text of `line` without its terminator.
    pub fn line_text(&self, line: usize) -> Option<String> {
        let len = self.line_len(line)?;
        Some(self.rope.line(line).slice(..len).to_string())
    }

    /// Position just past the last character of `line` (clamped to the last line).
    pub fn line_end(&self, line: usize) -> Position {
        let line = line.min(self.line_count().saturating_sub(1));
        Position::new(line, self.line_len(line).unwrap_or(0))
    }

    /// Character offset of `pos`, clamped to the document and to the line's length.
    pub fn position_to_char(&self, pos: Position) -> usize {
        let end = self.line_end(pos.line);
        if pos.line > end.line {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(end.line) + pos.column.min(end.column)
    }

    /// Text between two positions (in either order).
    pub fn text_between(&self, a: Position, b: Position) -> String {
        let start = self.position_to_char(a.min(b));
        let end = self.position_to_char(a.max(b));
        self.rope.slice(start..end).to_string()
    }
}
