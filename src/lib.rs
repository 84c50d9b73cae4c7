//! commitment-gate: decides whether a personal commitment is allowed, deferred, or forbidden.
//!
//! A request that has already been structured by a parser is run through six
//! gates in a fixed order, against the user's standing policy, their current
//! energy, and their recent load. The result is one of
//! [`eval::Verdict::Allow`], [`eval::Verdict::Defer`], or
//! [`eval::Verdict::Forbid`], with reason codes and a response-template key.
//!
//! # Architecture
//!
//! - **[`model`]**: Request, profile, state, and stats records handed in by the caller.
//! - **[`gates`]**: The six gates and their fixed [`PIPELINE`](gates::PIPELINE) order.
//! - **[`eval`]**: Evaluator, evaluation context, decision types.
//! - **[`catalog`]**: Policy catalog: embedded defaults, user overlay, startup validation.
//! - **[`template`]**: Template key → display text, with fallback.
//! - **[`logging`]**: Decision log and diagnostic logger setup.

/// Policy catalog types, loading, overlay merge, and validation.
pub mod catalog;
/// Evaluation engine: evaluator, context, decision types.
pub mod eval;
/// Pipeline gates, one module per gate.
pub mod gates;
/// File-based decision logging.
pub mod logging;
/// Input records: parsed request, user profile, dynamic state, stats.
pub mod model;
/// Template resolution with guaranteed fallback.
pub mod template;

use std::sync::LazyLock;

use catalog::Catalog;
use eval::{DecisionResult, EvaluationInput, Evaluator};

static DEFAULT_EVALUATOR: LazyLock<Evaluator> = LazyLock::new(|| {
    Evaluator::new(Catalog::embedded().expect("embedded default catalog must be valid"))
});

/// The evaluator built from the embedded default catalog.
pub fn default_evaluator() -> &'static Evaluator {
    &DEFAULT_EVALUATOR
}

/// Evaluate a request against the embedded default catalog.
///
/// This is the main entry point for tests and simple usage.
/// To honour the user overlay or a custom catalog, build an [`Evaluator`] directly.
pub fn evaluate(input: &EvaluationInput) -> DecisionResult {
    DEFAULT_EVALUATOR.evaluate(input)
}

/// Display text for a template key from the embedded default catalog.
pub fn resolve_template(key: &str) -> &'static str {
    DEFAULT_EVALUATOR.catalog().resolve_template(key)
}
