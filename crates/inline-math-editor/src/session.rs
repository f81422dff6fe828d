//! Session controller driven by the host editor.
//!
//! A host calls [`InlineMathSession::refresh`] whenever the text or the selections change and
//! renders the returned decorations. The session keeps the latest evaluations so commands like
//! "copy result" can look them up by line.

use crate::config::InlineMathConfig;
use crate::decorations::Decoration;
use crate::document::{Document, Selection};
use crate::evaluations::{AggregatedEvaluations, Evaluation, evaluate_selections};
use inline_math::{CacheConfig, Evaluator, ExtractionCache, Extractor, MathEvaluator};
use std::sync::Arc;

/// Inline math state for one editor (or one editor view).
#[derive(Debug)]
pub struct InlineMathSession<E> {
    config: InlineMathConfig,
    extractor: Extractor<E>,
    evaluations: AggregatedEvaluations,
}

impl InlineMathSession<MathEvaluator> {
    /// Create a session using the default arithmetic evaluator.
    pub fn with_math_evaluator(config: InlineMathConfig) -> Self {
        Self::new(config, MathEvaluator::new())
    }
}

impl<E: Evaluator> InlineMathSession<E> {
    /// Create a session with its own cache sized from `config`.
    pub fn new(config: InlineMathConfig, evaluator: E) -> Self {
        let extractor = Extractor::with_cache_config(evaluator, config.cache.into());
        Self {
            config,
            extractor,
            evaluations: AggregatedEvaluations::new(),
        }
    }

    /// Current settings.
    pub fn config(&self) -> &InlineMathConfig {
        &self.config
    }

    /// The extractor (and through it, the cache).
    pub fn extractor(&self) -> &Extractor<E> {
        &self.extractor
    }

    /// Apply new settings.
    ///
    /// The cache is rebuilt only if its capacities changed. Disabling clears the stored
    /// evaluations.
    pub fn set_config(&mut self, config: InlineMathConfig) {
        if config.cache != self.config.cache {
            let cache_config: CacheConfig = config.cache.into();
            log::debug!("inline math cache resized: {cache_config:?}");
            self.extractor
                .replace_cache(Arc::new(ExtractionCache::new(cache_config)));
        }
        if !config.enabled {
            self.evaluations.clear();
        }
        self.config = config;
    }

    /// Whether results are shown.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Flip `enabled`, returning the new value.
    pub fn toggle(&mut self) -> bool {
        self.config.enabled = !self.config.enabled;
        if !self.config.enabled {
            self.evaluations.clear();
        }
        log::debug!("inline math enabled: {}", self.config.enabled);
        self.config.enabled
    }

    /// Re-evaluate `selections` in `doc` and return the decorations to render.
    ///
    /// Returns no decorations while disabled.
    pub fn refresh(&mut self, doc: &Document, selections: &[Selection]) -> Vec<Decoration> {
        if !self.config.enabled {
            self.evaluations.clear();
            return Vec::new();
        }

        let evaluations = evaluate_selections(doc, selections, &self.extractor);
        let decorations = evaluations
            .iter()
            .map(|evaluation| Decoration::from_evaluation(doc, evaluation, &self.config))
            .collect();

        log::trace!(
            "{} of {} selections produced a result",
            evaluations.len(),
            selections.len()
        );
        self.evaluations = evaluations.into_iter().collect();
        decorations
    }

    /// Evaluations from the last [`refresh`](Self::refresh).
    pub fn evaluations(&self) -> &AggregatedEvaluations {
        &self.evaluations
    }

    /// The evaluation displayed on `line`, if any.
    pub fn evaluation_at_line(&self, line: usize) -> Option<&Evaluation> {
        self.evaluations.get(line)
    }

    /// The result displayed on `line`, e.g. for a "copy result" command.
    pub fn result_at_line(&self, line: usize) -> Option<&str> {
        self.evaluation_at_line(line).map(|e| e.result.as_str())
    }
}
