#![warn(missing_docs)]
//! Inline Math - expression extraction and caching engine
//!
//! # Overview
//!
//! `inline-math` locates the largest meaningful arithmetic expression embedded inside a
//! free-form line (or selection) of text, evaluates it, and decides whether the result is
//! worth showing to a user. It does not render anything: the upper layer supplies raw text
//! spans and consumes `(source, result)` pairs.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Extractor (extract / extract_detailed)     │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Two-Tier Cache (whole text + subsequence)  │  ← Memoization
//! ├─────────────────────────────────────────────┤
//! │  Desirability Filter                        │  ← Result Policy
//! ├─────────────────────────────────────────────┤
//! │  Evaluator Adapter (fasteval)               │  ← Math Semantics
//! ├─────────────────────────────────────────────┤
//! │  Subsequence Generator                      │  ← Candidate Order
//! ├─────────────────────────────────────────────┤
//! │  Tokenizer (normalize / tokenize)           │  ← Text Input
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use inline_math::{EvaluationResult, Extractor, MathEvaluator};
//!
//! let extractor = Extractor::new(MathEvaluator::new());
//!
//! let result = extractor.extract("2 + 2 is four");
//! assert_eq!(
//!     result,
//!     Some(EvaluationResult::new("2 + 2", "4")),
//! );
//!
//! // Bare literals evaluate to themselves and are not reported.
//! assert_eq!(extractor.extract("420"), None);
//! ```
//!
//! # Module Description
//!
//! - [`text`] - line normalization and tokenization
//! - [`subsequence`] - longest-first contiguous token run enumeration
//! - [`evaluator`] - evaluator capability and the `fasteval` backed default
//! - [`filter`] - desirability rules for `(source, result)` pairs
//! - [`cache`] - bounded LRU stores for whole-text and per-candidate outcomes
//! - [`extract`] - the orchestrator tying everything together

pub mod cache;
pub mod evaluator;
pub mod extract;
pub mod filter;
pub mod subsequence;
pub mod text;

pub use cache::{CacheConfig, CacheStats, ExtractionCache, LruStore};
pub use evaluator::{EvalError, Evaluator, FnEvaluator, MathEvaluator, format_number};
pub use extract::{EvaluationResult, Extraction, Extractor, Outcome};
pub use filter::{is_desirable, strip_matching_quotes};
pub use subsequence::{Candidate, Subsequences, candidate_count};
pub use text::{MIN_TEXT_CHARS, NormalizedText, normalize, tokenize};
