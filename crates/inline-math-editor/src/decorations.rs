//! Inline result decorations.
//!
//! Decorations are virtual text anchored to document character offsets; they never modify
//! the document. The host renders [`Decoration::text`] after the anchor range and may show
//! [`Decoration::tooltip`] on hover.

use crate::config::InlineMathConfig;
use crate::document::Document;
use crate::evaluations::Evaluation;
use std::borrow::Cow;

/// Template placeholder for the evaluated value.
pub const TEMPLATE_RESULT: &str = "$result";
/// Template placeholder for the evaluated expression.
pub const TEMPLATE_SOURCE: &str = "$source";

const ELLIPSIS: &str = "...";

/// A half-open character-offset range (`start..end`) in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationRange {
    /// Range start offset (inclusive), in Unicode scalar values (`char`) from the start of the document.
    pub start: usize,
    /// Range end offset (exclusive), in Unicode scalar values (`char`) from the start of the document.
    pub end: usize,
}

impl DecorationRange {
    /// Create a new decoration range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Where to render a decoration relative to its anchor range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationPlacement {
    /// Render before the anchor (in logical order).
    Before,
    /// Render after the anchor (in logical order).
    After,
}

/// A coarse decoration kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DecorationKind {
    /// The value of an expression found on the line.
    InlineResult,
}

/// A single inline result, rendered after its anchor range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    /// Anchor range in character offsets.
    pub range: DecorationRange,
    /// Relative placement; inline results always go [`After`](DecorationPlacement::After).
    pub placement: DecorationPlacement,
    /// A coarse decoration kind.
    pub kind: DecorationKind,
    /// Virtual text to render; `None` when messages are disabled (`messageMaxChars == 0`).
    pub text: Option<String>,
    /// Optional tooltip payload (plain text).
    pub tooltip: Option<String>,
}

impl Decoration {
    /// Build the decoration for `evaluation` in `doc`.
    pub fn from_evaluation(
        doc: &Document,
        evaluation: &Evaluation,
        config: &InlineMathConfig,
    ) -> Self {
        let range = DecorationRange::new(
            doc.position_to_char(evaluation.range.start),
            doc.position_to_char(evaluation.range.end),
        );
        Self {
            range,
            placement: DecorationPlacement::After,
            kind: DecorationKind::InlineResult,
            text: render_message(
                &config.message_template,
                config.message_max_chars,
                evaluation,
            ),
            tooltip: config.hover_message.then(|| hover_text(evaluation)),
        }
    }
}

/// Shorten `source` to at most `max_chars` characters, ending in `...` when cut.
///
/// Below three characters only part of the ellipsis fits.
pub fn truncate_source(source: &str, max_chars: usize) -> Cow<'_, str> {
    if source.chars().count() <= max_chars {
        return Cow::Borrowed(source);
    }
    if max_chars < ELLIPSIS.len() {
        return Cow::Borrowed(&ELLIPSIS[..max_chars]);
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = source.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

/// Render the inline message for `evaluation` from `template`.
///
/// - `max_chars == 0` disables messages (`None`)
/// - `$result` is replaced by the value
/// - `$source` is replaced by the expression, truncated to `max_chars` characters
pub fn render_message(template: &str, max_chars: usize, evaluation: &Evaluation) -> Option<String> {
    if max_chars == 0 {
        return None;
    }
    if template == TEMPLATE_RESULT {
        return Some(evaluation.result.clone());
    }

    let mut message = template.replace(TEMPLATE_RESULT, &evaluation.result);
    if template.contains(TEMPLATE_SOURCE) {
        let source = truncate_source(&evaluation.source, max_chars);
        message = message.replace(TEMPLATE_SOURCE, &source);
    }
    Some(message)
}

/// Plain-text hover content: the expression and its value.
pub fn hover_text(evaluation: &Evaluation) -> String {
    format!(
        "Source  {}\nResult  {}",
        evaluation.source, evaluation.result
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Position;
    use crate::evaluations::EvaluationRange;
    use pretty_assertions::assert_eq;

    fn evaluation(source: &str, result: &str) -> Evaluation {
        Evaluation {
            source: source.to_string(),
            result: result.to_string(),
            range: EvaluationRange {
                start: Position::new(0, 0),
                end: Position::new(0, source.chars().count()),
            },
        }
    }

    #[test]
    fn test_render_result_only() {
        let e = evaluation("2 + 2", "4");
        assert_eq!(render_message("$result", 50, &e).as_deref(), Some("4"));
        assert_eq!(render_message("= $result", 50, &e).as_deref(), Some("= 4"));
        assert_eq!(render_message("= $result", 0, &e), None);
    }

    #[test]
    fn test_render_with_source() {
        let e = evaluation("2 + 2", "4");
        assert_eq!(
            render_message("$source = $result", 50, &e).as_deref(),
            Some("2 + 2 = 4")
        );
    }

    #[test]
    fn test_source_is_truncated() {
        let e = evaluation("1 + 2 + 3 + 4 + 5", "15");
        assert_eq!(
            render_message("$source → $result", 8, &e).as_deref(),
            Some("1 + 2... → 15")
        );
    }

    #[test]
    fn test_truncate_source_boundaries() {
        assert_eq!(truncate_source("abc", 3), "abc");
        assert_eq!(truncate_source("abcd", 3), "...");
        assert_eq!(truncate_source("αβγδε", 4), "α...");
        assert_eq!(truncate_source("abcdef", 2), "..");
        assert_eq!(truncate_source("abcdef", 1), ".");
        assert_eq!(truncate_source("abcdef", 0), "");
        for max in 0..8 {
            assert!(truncate_source("1 + 2 + 3", max).chars().count() <= max);
        }
    }

    #[test]
    fn test_decoration_from_evaluation() {
        let doc = Document::new("x\n7 * 6 here\n");
        let e = Evaluation {
            source: "7 * 6".to_string(),
            result: "42".to_string(),
            range: EvaluationRange {
                start: Position::new(1, 0),
                end: Position::new(1, 10),
            },
        };
        let decoration = Decoration::from_evaluation(&doc, &e, &InlineMathConfig::default());
        assert_eq!(decoration.range, DecorationRange::new(2, 12));
        assert_eq!(decoration.placement, DecorationPlacement::After);
        assert_eq!(decoration.kind, DecorationKind::InlineResult);
        assert_eq!(decoration.text.as_deref(), Some("= 42"));
        assert_eq!(decoration.tooltip.as_deref(), Some("Source  7 * 6\nResult  42"));
    }
}
