use crate::catalog::Catalog;
use crate::eval::{EvaluationContext, EvaluationInput, ReasonCode, TemplateKey};
use crate::gates::{Flow, Gate};

/// Gate 1: the user's hard rules, then the decision-pressure flag.
///
/// A hard rule matches when, ignoring case, the rule contains the intent name
/// or the intent name contains the rule. The first match forbids. Rules are
/// compared as written, so an empty rule matches every intent.
pub struct SystemRules;

impl SystemRules {
    /// Two-way case-insensitive substring match.
    pub fn rule_matches(rule: &str, intent: &str) -> bool {
        let rule = rule.to_lowercase();
        let intent = intent.to_lowercase();
        rule.contains(&intent) || intent.contains(&rule)
    }
}

impl Gate for SystemRules {
    fn name(&self) -> &'static str {
        "system_rules"
    }

    fn apply(
        &self,
        input: &EvaluationInput,
        _catalog: &Catalog,
        ctx: &mut EvaluationContext,
    ) -> Flow {
        let request = &input.parsed_request;
        let intent = request.intent.as_str();

        if let Some(rule) = input
            .user_profile
            .hard_rules
            .iter()
            .find(|rule| Self::rule_matches(rule, intent))
        {
            ctx.push(ReasonCode::HardRuleMatch(rule.clone()));
            return Flow::forbid(TemplateKey::ForbidPolicy);
        }

        if request.decision_pressure {
            ctx.push(ReasonCode::PressureDetected);
        }
        Flow::Continue
    }
}
