//! Line normalization and tokenization.
//!
//! Raw editor text (a line or a multi-line selection) is first collapsed into a single
//! [`NormalizedText`] line, which is then split into whitespace-delimited tokens.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Minimum number of characters a normalized line must have to be worth evaluating.
pub const MIN_TEXT_CHARS: usize = 3;

// Line breaks or double spaces, optionally followed by a `// ` comment marker.
static COLLAPSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[\r\n]|  )+(?://\s)?").expect("static regex"));

/// A line of text after [`normalize`].
///
/// Immutable once produced and cheap to clone; it is the key of the whole-text cache tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedText(Arc<str>);

impl NormalizedText {
    /// Returns the normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (Unicode scalar values).
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Collapse line breaks, double spaces and continuation comment markers into single spaces.
///
/// Returns `None` when the result is shorter than [`MIN_TEXT_CHARS`] characters.
pub fn normalize(raw: &str) -> Option<NormalizedText> {
    let collapsed = COLLAPSE_RE.replace_all(raw, " ");
    if collapsed.chars().count() < MIN_TEXT_CHARS {
        return None;
    }
    Some(NormalizedText(Arc::from(collapsed.as_ref())))
}

/// Split normalized text into tokens on single spaces.
///
/// Empty pieces (left behind by odd runs of spaces or leading/trailing spaces) are dropped,
/// so every token is a maximal run of non-space characters.
pub fn tokenize(text: &NormalizedText) -> Vec<&str> {
    text.as_str().split(' ').filter(|t| !t.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(raw: &str) -> String {
        normalize(raw).map(|t| t.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_normalize_collapses_line_breaks() {
        assert_eq!(norm("3\n* 5"), "3 * 5");
        assert_eq!(norm("3\r\n\r\n* 5"), "3 * 5");
        assert_eq!(norm("1  +  2"), "1 + 2");
    }

    #[test]
    fn test_normalize_strips_comment_continuation() {
        assert_eq!(norm("// 10 +\n// 5"), "// 10 + 5");
        assert_eq!(norm("a\n//  b"), "a  b");
    }

    #[test]
    fn test_normalize_rejects_short_input() {
        assert!(normalize("").is_none());
        assert!(normalize("42").is_none());
        assert!(normalize("\n\n\n").is_none());
        assert!(normalize("abc").is_some());
        // Character count, not byte count.
        assert!(normalize("π2").is_none());
        assert!(normalize("π*2").is_some());
    }

    #[test]
    fn test_tokenize_drops_empty_pieces() {
        let text = normalize(" 1   + 2 ").unwrap();
        assert_eq!(tokenize(&text), vec!["1", "+", "2"]);

        let text = normalize("2 + 2 is four").unwrap();
        assert_eq!(tokenize(&text), vec!["2", "+", "2", "is", "four"]);
    }
}
