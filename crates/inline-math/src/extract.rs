//! Extraction orchestrator.
//!
//! ```text
//! raw text ─► normalize ─► whole-text cache? ──hit──► result
//!                                 │ miss
//!                                 ▼
//!                tokenize ─► candidates (longest, leftmost first)
//!                                 │
//!                 subsequence cache? ──miss──► evaluator ─► cache outcome
//!                                 │
//!                       desirable? ──no──► next candidate
//!                                 │ yes
//!                                 ▼
//!                   store in whole-text cache ─► result
//! ```

use crate::cache::{CacheConfig, ExtractionCache};
use crate::evaluator::Evaluator;
use crate::filter::is_desirable;
use crate::subsequence::{Subsequences, candidate_count};
use crate::text::{NormalizedText, normalize, tokenize};
use std::sync::Arc;

/// The chosen expression and its formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvaluationResult {
    /// The candidate expression, tokens joined with single spaces.
    pub source: String,
    /// The evaluator's display string for the expression.
    pub result: String,
}

impl EvaluationResult {
    /// Create a new result.
    pub fn new(source: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            result: result.into(),
        }
    }
}

/// How an extraction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A desirable candidate was found by walking the candidates.
    Found,
    /// The whole-text cache already held the result.
    CacheHit,
    /// The normalized text was too short to contain an expression.
    InputTooShort,
    /// No candidate produced a desirable result.
    Exhausted,
}

/// Detailed report of a single extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The chosen result, if any.
    pub result: Option<EvaluationResult>,
    /// How the extraction ended.
    pub outcome: Outcome,
    /// Number of candidates examined.
    pub candidates_probed: usize,
    /// Number of evaluator invocations (per-candidate cache misses).
    pub evaluator_calls: usize,
}

impl Extraction {
    fn empty(outcome: Outcome) -> Self {
        Self {
            result: None,
            outcome,
            candidates_probed: 0,
            evaluator_calls: 0,
        }
    }
}

/// Finds the largest desirable expression in a line of text.
///
/// The extractor owns its evaluator and holds its cache through an `Arc`, so several
/// extractors (or threads) can share one cache. All methods take `&self`.
#[derive(Debug)]
pub struct Extractor<E> {
    evaluator: E,
    cache: Arc<ExtractionCache>,
}

impl<E: Evaluator> Extractor<E> {
    /// Create an extractor with a private cache using default capacities.
    pub fn new(evaluator: E) -> Self {
        Self::with_cache_config(evaluator, CacheConfig::default())
    }

    /// Create an extractor with a private cache using the given capacities.
    pub fn with_cache_config(evaluator: E, config: CacheConfig) -> Self {
        Self::with_cache(evaluator, Arc::new(ExtractionCache::new(config)))
    }

    /// Create an extractor backed by an existing cache.
    ///
    /// Cached outcomes are keyed by text only, so a shared cache must only be used with
    /// evaluators that agree on every expression.
    pub fn with_cache(evaluator: E, cache: Arc<ExtractionCache>) -> Self {
        Self { evaluator, cache }
    }

    /// The evaluator.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// The cache.
    pub fn cache(&self) -> &Arc<ExtractionCache> {
        &self.cache
    }

    /// Swap in another cache, returning the previous one.
    pub fn replace_cache(&mut self, cache: Arc<ExtractionCache>) -> Arc<ExtractionCache> {
        std::mem::replace(&mut self.cache, cache)
    }

    /// Find the best `(source, result)` pair in `raw`, or `None`.
    pub fn extract(&self, raw: &str) -> Option<EvaluationResult> {
        self.extract_detailed(raw).result
    }

    /// Like [`extract`](Self::extract), but reports how the extraction ended.
    pub fn extract_detailed(&self, raw: &str) -> Extraction {
        match normalize(raw) {
            Some(text) => self.extract_normalized(&text),
            None => Extraction::empty(Outcome::InputTooShort),
        }
    }

    /// Run the extraction on already normalized text.
    pub fn extract_normalized(&self, text: &NormalizedText) -> Extraction {
        if let Some(result) = self.cache.get_whole_text(text) {
            return Extraction {
                result: Some(result),
                ..Extraction::empty(Outcome::CacheHit)
            };
        }

        let tokens = tokenize(text);
        let total = candidate_count(tokens.len());
        if total > self.cache.subsequence().capacity() {
            log::debug!(
                "{total} candidates exceed the subsequence cache ({}); failures will not stay cached",
                self.cache.subsequence().capacity(),
            );
        }
        let mut candidates_probed = 0;
        let mut evaluator_calls = 0;

        for candidate in Subsequences::new(&tokens) {
            candidates_probed += 1;
            let source = candidate.text();

            let Some(value) = self.outcome(&source, &mut evaluator_calls) else {
                continue;
            };
            if !is_desirable(&source, &value) {
                continue;
            }

            let result = EvaluationResult::new(source, value);
            self.cache.put_whole_text(text.clone(), result.clone());
            log::trace!(
                "found {:?} = {:?} after {candidates_probed} candidates ({evaluator_calls} evaluator calls)",
                result.source,
                result.result,
            );
            return Extraction {
                result: Some(result),
                outcome: Outcome::Found,
                candidates_probed,
                evaluator_calls,
            };
        }

        log::trace!(
            "no result in {:?} after {candidates_probed} candidates ({evaluator_calls} evaluator calls)",
            text.as_str(),
        );
        Extraction {
            result: None,
            outcome: Outcome::Exhausted,
            candidates_probed,
            evaluator_calls,
        }
    }

    /// Per-candidate outcome, consulting the subsequence tier before the evaluator.
    fn outcome(&self, source: &str, evaluator_calls: &mut usize) -> Option<String> {
        if let Some(known) = self.cache.get_subsequence(source) {
            return known;
        }

        *evaluator_calls += 1;
        let value = self.evaluator.evaluate(source).ok();
        self.cache.put_subsequence(source.to_string(), value.clone());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{EvalError, FnEvaluator, MathEvaluator};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_prefers_largest_expression() {
        let extractor = Extractor::new(MathEvaluator::new());
        assert_eq!(
            extractor.extract("2 + 2 is four"),
            Some(EvaluationResult::new("2 + 2", "4"))
        );
        assert_eq!(
            extractor.extract("total: 10 * 3 + 1 items"),
            Some(EvaluationResult::new("10 * 3 + 1", "31"))
        );
    }

    #[test]
    fn test_extract_multiline() {
        let extractor = Extractor::new(MathEvaluator::new());
        assert_eq!(
            extractor.extract("3\n* 5"),
            Some(EvaluationResult::new("3 * 5", "15"))
        );
    }

    #[test]
    fn test_extract_nothing() {
        let extractor = Extractor::new(MathEvaluator::new());
        assert_eq!(extractor.extract("abc"), None);
        assert_eq!(extractor.extract("420"), None);
        assert_eq!(extractor.extract("'7'"), None);

        let detailed = extractor.extract_detailed("12");
        assert_eq!(detailed.outcome, Outcome::InputTooShort);
        assert_eq!(detailed.candidates_probed, 0);
    }

    #[test]
    fn test_falls_through_undesirable_candidates() {
        // "123" alone is a bare literal; only "5 - 1" computes something.
        let extractor = Extractor::new(MathEvaluator::new());
        assert_eq!(
            extractor.extract("item 123 costs 5 - 1"),
            Some(EvaluationResult::new("5 - 1", "4"))
        );
    }

    #[test]
    fn test_function_like_results_are_skipped() {
        let eval = FnEvaluator(|expr: &str| match expr {
            "f x" => Ok("function f(x)".to_string()),
            "x" => Ok("3".to_string()),
            _ => Err(EvalError::Syntax(expr.to_string())),
        });
        let extractor = Extractor::new(eval);
        assert_eq!(extractor.extract("f x"), Some(EvaluationResult::new("x", "3")));
    }

    #[test]
    fn test_print_calls_are_never_results() {
        let extractor = Extractor::new(MathEvaluator::new());
        assert_eq!(extractor.extract("print(\"hi\", 7)"), None);
        let found = extractor.extract("print(\"hi\", 7) + 1 here");
        assert!(found.is_none_or(|r| !r.source.contains("print")));
    }

    #[test]
    fn test_detailed_reports_cache_hit() {
        let extractor = Extractor::new(MathEvaluator::new());
        let first = extractor.extract_detailed("2 + 2 is four");
        assert_eq!(first.outcome, Outcome::Found);
        assert!(first.evaluator_calls > 0);

        let second = extractor.extract_detailed("2 + 2 is four");
        assert_eq!(second.outcome, Outcome::CacheHit);
        assert_eq!(second.evaluator_calls, 0);
        assert_eq!(second.result, first.result);
    }
}
