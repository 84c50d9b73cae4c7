use serde::{Deserialize, Serialize};

use super::decision::{ReasonCode, TemplateKey, Verdict};
use crate::model::{AggregatedStats, DynamicState, ParsedRequest, UserProfile};

/// Everything one evaluation reads. Owned by the caller, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationInput {
    pub parsed_request: ParsedRequest,
    pub user_profile: UserProfile,
    /// Energy defaults to green when the caller has no state on record.
    #[serde(default)]
    pub dynamic_state: DynamicState,
    #[serde(default)]
    pub aggregated_stats: AggregatedStats,
    /// Slot availability from the calendar collaborator; `None` when not checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_available: Option<bool>,
}

impl EvaluationInput {
    /// An input with green energy, zero stats, and no calendar signal.
    pub fn new(parsed_request: ParsedRequest, user_profile: UserProfile) -> Self {
        Self {
            parsed_request,
            user_profile,
            dynamic_state: DynamicState::default(),
            aggregated_stats: AggregatedStats::default(),
            calendar_available: None,
        }
    }
}

/// Accumulator the evaluator threads through the gates.
///
/// Gates communicate only through this: the working verdict, the reason
/// codes in execution order, a template chosen by a non-terminal gate,
/// and whether the request needs a calendar slot.
#[derive(Debug)]
pub struct EvaluationContext {
    pub verdict: Verdict,
    pub reasons: Vec<ReasonCode>,
    pub template: Option<TemplateKey>,
    pub requires_calendar: bool,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self {
            verdict: Verdict::Defer,
            reasons: Vec::new(),
            template: None,
            requires_calendar: false,
        }
    }

    pub fn push(&mut self, reason: ReasonCode) {
        self.reasons.push(reason);
    }

    /// Set the working verdict to `Defer` with a specific template,
    /// without ending evaluation.
    pub fn defer_with(&mut self, template: TemplateKey) {
        self.verdict = Verdict::Defer;
        self.template = Some(template);
    }

    /// Lower `Allow` to `Defer`; stricter verdicts are left alone.
    pub fn downgrade_to_defer(&mut self) {
        if self.verdict == Verdict::Allow {
            self.verdict = Verdict::Defer;
        }
    }
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self::new()
    }
}
