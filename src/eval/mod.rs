pub mod context;
pub mod decision;

pub use context::{EvaluationContext, EvaluationInput};
pub use decision::{DecisionResponse, DecisionResult, MatrixEntry, ReasonCode, TemplateKey, Verdict};

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::gates::{Flow, Terminal, PIPELINE};

/// Runs the gate pipeline against one immutable catalog.
///
/// Cloning is cheap and every clone shares the catalog. To change policy,
/// build a new `Evaluator` from a new catalog; the old one keeps seeing the
/// catalog it was built with.
#[derive(Debug, Clone)]
pub struct Evaluator {
    catalog: Arc<Catalog>,
}

impl Evaluator {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Share an already-loaded catalog.
    pub fn with_shared(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Evaluate one request. Total and deterministic.
    pub fn evaluate(&self, input: &EvaluationInput) -> DecisionResult {
        evaluate_with(&self.catalog, input)
    }

    /// Evaluate and attach the response text.
    pub fn respond(&self, input: &EvaluationInput) -> DecisionResponse {
        self.catalog.respond(self.evaluate(input))
    }

    pub fn resolve_template(&self, key: &str) -> &str {
        self.catalog.resolve_template(key)
    }
}

/// Run every gate in [`PIPELINE`] order until one stops, then finalize.
pub fn evaluate_with(catalog: &Catalog, input: &EvaluationInput) -> DecisionResult {
    log::trace!(
        "evaluating {} for {} (energy {})",
        input.parsed_request.intent.as_str(),
        input.user_profile.primary_role.as_str(),
        input.dynamic_state.energy_level.as_str(),
    );

    let mut ctx = EvaluationContext::new();
    for gate in PIPELINE {
        match gate.apply(input, catalog, &mut ctx) {
            Flow::Continue => {
                log::debug!("gate {} -> continue ({})", gate.name(), ctx.verdict);
            }
            Flow::Stop(terminal) => {
                log::debug!(
                    "gate {} -> stop {} ({})",
                    gate.name(),
                    terminal.verdict,
                    terminal.template
                );
                return stopped(ctx, terminal);
            }
        }
    }
    finished(ctx)
}

/// A gate ended evaluation. A forbidden request never needs a calendar;
/// a deferred one keeps whatever the gates recorded.
fn stopped(ctx: EvaluationContext, terminal: Terminal) -> DecisionResult {
    DecisionResult {
        result: terminal.verdict,
        reason_codes: ctx.reasons,
        template_key: terminal.template,
        requires_calendar: terminal.verdict != Verdict::Forbid && ctx.requires_calendar,
    }
}

/// Every gate ran. Pick the template for the surviving verdict.
fn finished(ctx: EvaluationContext) -> DecisionResult {
    let template_key = match ctx.verdict {
        Verdict::Allow => TemplateKey::AllowDefault,
        Verdict::Defer => ctx.template.unwrap_or(TemplateKey::DeferNeedTime),
        Verdict::Forbid => ctx.template.unwrap_or(TemplateKey::ForbidPolicy),
    };
    DecisionResult {
        result: ctx.verdict,
        reason_codes: ctx.reasons,
        template_key,
        requires_calendar: ctx.requires_calendar,
    }
}
