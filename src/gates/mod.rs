//! The six gates of the decision pipeline.
//!
//! Each gate implements [`Gate`]: it reads the evaluation input and the
//! catalog, may record reason codes or tighten the working verdict in the
//! shared [`EvaluationContext`], and either lets evaluation continue or stops
//! it with a final verdict. Gates never call each other.
//!
//! [`PIPELINE`] fixes the order. Reordering it changes what a user can be
//! committed to; the integration and property tests pin it.

/// Gate 6: calendar connection and slot availability.
pub mod calendar;
/// Gate 3: red energy forbids, yellow energy flags.
pub mod energy;
/// Gate 5: per-intent policy checks (money, time, intro, support, ...).
pub mod intent_policy;
/// Gate 4: daily and weekly capacity limits of the load profile.
pub mod load_limits;
/// Gate 2: Role × Intent matrix lookup.
pub mod role_intent;
/// Gate 1: user hard rules and decision-pressure flag.
pub mod system_rules;

use crate::catalog::Catalog;
use crate::eval::{EvaluationContext, EvaluationInput, TemplateKey, Verdict};

/// A verdict that ends evaluation, with the template chosen for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    pub verdict: Verdict,
    pub template: TemplateKey,
}

/// What a gate tells the evaluator to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop(Terminal),
}

impl Flow {
    pub fn forbid(template: TemplateKey) -> Self {
        Flow::Stop(Terminal {
            verdict: Verdict::Forbid,
            template,
        })
    }

    pub fn defer(template: TemplateKey) -> Self {
        Flow::Stop(Terminal {
            verdict: Verdict::Defer,
            template,
        })
    }
}

/// Trait for pipeline gates.
///
/// Implementations must be pure: the outcome depends only on the input,
/// the catalog, and the context built by earlier gates.
pub trait Gate: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Run the gate against the accumulated context.
    fn apply(
        &self,
        input: &EvaluationInput,
        catalog: &Catalog,
        ctx: &mut EvaluationContext,
    ) -> Flow;
}

/// The gates, in mandatory evaluation order.
pub static PIPELINE: &[&dyn Gate] = &[
    &system_rules::SystemRules,
    &role_intent::RoleIntentMatrix,
    &energy::EnergyGate,
    &load_limits::LoadLimits,
    &intent_policy::IntentPolicies,
    &calendar::CalendarAvailability,
];
