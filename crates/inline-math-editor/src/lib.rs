#![warn(missing_docs)]
//! `inline-math-editor` - editor-facing layer for `inline-math`.
//!
//! This crate connects the extraction engine to a host editor without depending on any
//! particular UI toolkit:
//!
//! - [`document`] - rope-backed document access with line/column positions
//! - [`evaluations`] - per-selection extraction (`Evaluation` triples)
//! - [`decorations`] - inline message rendering (templates, truncation, hover text)
//! - [`config`] - user settings (`inlineMath.*`)
//! - [`session`] - the controller a host drives on every cursor/text change
//!
//! # Example
//!
//! ```rust
//! use inline_math_editor::{Document, InlineMathConfig, InlineMathSession, Position, Selection};
//!
//! let doc = Document::new("rent 1200 * 12 per year\nhello\n");
//! let mut session = InlineMathSession::with_math_evaluator(InlineMathConfig::default());
//!
//! let decorations = session.refresh(&doc, &[Selection::caret(Position::new(0, 0))]);
//! assert_eq!(decorations.len(), 1);
//! assert_eq!(decorations[0].text.as_deref(), Some("= 14400"));
//! assert_eq!(session.result_at_line(0), Some("14400"));
//! ```

pub mod config;
pub mod decorations;
pub mod document;
pub mod evaluations;
pub mod session;

pub use config::{CacheSettings, ConfigError, InlineMathConfig, SETTINGS_PREFIX};
pub use decorations::{
    Decoration, DecorationKind, DecorationPlacement, DecorationRange, TEMPLATE_RESULT,
    TEMPLATE_SOURCE, hover_text, render_message, truncate_source,
};
pub use document::{Document, Position, Selection};
pub use evaluations::{
    AggregatedEvaluations, Evaluation, EvaluationRange, evaluate_selection, evaluate_selections,
};
pub use session::InlineMathSession;
