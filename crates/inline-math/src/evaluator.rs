//! Evaluator capability.
//!
//! The extraction engine does not define an expression grammar. It consumes anything that
//! implements [`Evaluator`]: a pure, deterministic function from an expression string to
//! either its canonical display string or an [`EvalError`].
//!
//! [`MathEvaluator`] is the default implementation, backed by the `fasteval` crate.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use thiserror::Error;

// `print(...)` is the only fasteval builtin that writes output.
static SIDE_EFFECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bprint\b").expect("static regex"));

/// Why a candidate expression could not be evaluated.
///
/// Evaluation failures are routine during extraction (most token runs are not valid
/// expressions) and are never surfaced to the caller of
/// [`Extractor::extract`](crate::Extractor::extract).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("empty expression")]
    /// The expression was empty or whitespace only.
    Empty,

    #[error("invalid expression: {0}")]
    /// The expression could not be parsed or referenced something unknown.
    Syntax(String),

    #[error("result is not a finite number")]
    /// The expression evaluated to NaN or an infinity.
    NonFinite,

    #[error("rejected: {0}")]
    /// The evaluator refused the expression for an implementation-specific reason.
    Rejected(String),
}

/// A pure expression evaluator.
///
/// Implementations must be deterministic for a given input string: the extraction cache
/// memoizes both successes and failures by expression text.
pub trait Evaluator: Send + Sync {
    /// Evaluate `expr` and return the canonical display string of its value.
    fn evaluate(&self, expr: &str) -> Result<String, EvalError>;
}

impl<T: Evaluator + ?Sized> Evaluator for &T {
    fn evaluate(&self, expr: &str) -> Result<String, EvalError> {
        (**self).evaluate(expr)
    }
}

impl<T: Evaluator + ?Sized> Evaluator for Arc<T> {
    fn evaluate(&self, expr: &str) -> Result<String, EvalError> {
        (**self).evaluate(expr)
    }
}

impl<T: Evaluator + ?Sized> Evaluator for Box<T> {
    fn evaluate(&self, expr: &str) -> Result<String, EvalError> {
        (**self).evaluate(expr)
    }
}

/// Adapts a plain function or closure into an [`Evaluator`].
#[derive(Debug, Clone, Copy)]
pub struct FnEvaluator<F>(pub F);

impl<F> Evaluator for FnEvaluator<F>
where
    F: Fn(&str) -> Result<String, EvalError> + Send + Sync,
{
    fn evaluate(&self, expr: &str) -> Result<String, EvalError> {
        (self.0)(expr)
    }
}

/// Arithmetic evaluator backed by `fasteval`.
///
/// Supports the usual operators (`+ - * / % ^`), comparisons and logic operators, and
/// `fasteval`'s builtin functions (`sin`, `cos`, `log`, `round`, `min`, `max`, `abs`,
/// `pi()`, `e()`, ...). Identifiers that are not builtins are evaluation failures.
///
/// Numbers accept `fasteval`'s magnitude suffixes, so prose such as `5k users` yields
/// `5k = 5000` and `3m` yields `0.003` (milli, not mega).
///
/// Expressions calling `print` are rejected without being evaluated.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathEvaluator {
    _private: (),
}

impl MathEvaluator {
    /// Create a new evaluator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Evaluator for MathEvaluator {
    fn evaluate(&self, expr: &str) -> Result<String, EvalError> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(EvalError::Empty);
        }
        if SIDE_EFFECT_RE.is_match(expr) {
            return Err(EvalError::Rejected("print is not allowed".to_string()));
        }

        let mut ns = fasteval::EmptyNamespace;
        let value =
            fasteval::ez_eval(expr, &mut ns).map_err(|err| EvalError::Syntax(format!("{err:?}")))?;

        format_number(value).ok_or(EvalError::NonFinite)
    }
}

/// Canonical display string for a numeric value.
///
/// Integral values print without a fractional part (`4`, not `4.0`); other values use the
/// shortest representation that round-trips. Returns `None` for NaN and infinities.
pub fn format_number(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        // Also folds negative zero.
        return Some("0".to_string());
    }
    Some(format!("{value}"))
}
