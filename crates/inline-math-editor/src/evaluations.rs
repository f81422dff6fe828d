//! Per-selection extraction.
//!
//! For every selection the host passes in:
//! - an empty selection (a caret) evaluates the whole line containing it
//! - a non-empty selection evaluates exactly the selected text (possibly multi-line)
//!
//! A found result is anchored from the selection start to the end of the line containing the
//! selection end, which is where the host draws the inline message.

use crate::document::{Document, Position, Selection};
use inline_math::{Evaluator, Extractor};
use std::collections::BTreeMap;

/// Where an evaluation is displayed: selection start to end of line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationRange {
    /// Selection start.
    pub start: Position,
    /// End of the line containing the selection end.
    pub end: Position,
}

/// A `(source, result, position)` triple ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The evaluated expression.
    pub source: String,
    /// Its formatted value.
    pub result: String,
    /// Display anchor.
    pub range: EvaluationRange,
}

/// Evaluate one selection, or `None` if it contains nothing worth showing.
pub fn evaluate_selection<E: Evaluator>(
    doc: &Document,
    selection: Selection,
    extractor: &Extractor<E>,
) -> Option<Evaluation> {
    let start = selection.start();
    let end = selection.end();
    let line_end = doc.line_end(end.line);

    let text = if selection.is_empty() {
        doc.line_text(line_end.line)?
    } else {
        doc.text_between(start, end)
    };

    let found = extractor.extract(&text)?;
    Some(Evaluation {
        source: found.source,
        result: found.result,
        range: EvaluationRange {
            start,
            end: line_end,
        },
    })
}

/// Evaluate every selection, skipping those without a result.
pub fn evaluate_selections<E: Evaluator>(
    doc: &Document,
    selections: &[Selection],
    extractor: &Extractor<E>,
) -> Vec<Evaluation> {
    selections
        .iter()
        .filter_map(|selection| evaluate_selection(doc, *selection, extractor))
        .collect()
}

/// Evaluations keyed by the line they are displayed on.
///
/// When several selections end on the same line, the last one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedEvaluations {
    by_line: BTreeMap<usize, Evaluation>,
}

impl AggregatedEvaluations {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an evaluation, replacing any previous one on the same line.
    pub fn insert(&mut self, evaluation: Evaluation) -> Option<Evaluation> {
        self.by_line.insert(evaluation.range.end.line, evaluation)
    }

    /// The evaluation displayed on `line`.
    pub fn get(&self, line: usize) -> Option<&Evaluation> {
        self.by_line.get(&line)
    }

    /// Evaluations in line order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Evaluation)> {
        self.by_line.iter().map(|(line, evaluation)| (*line, evaluation))
    }

    /// Number of lines with an evaluation.
    pub fn len(&self) -> usize {
        self.by_line.len()
    }

    /// Returns `true` if there are no evaluations.
    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.by_line.clear();
    }
}

impl FromIterator<Evaluation> for AggregatedEvaluations {
    fn from_iter<I: IntoIterator<Item = Evaluation>>(iter: I) -> Self {
        let mut out = Self::new();
        for evaluation in iter {
            out.insert(evaluation);
        }
        out
    }
}
