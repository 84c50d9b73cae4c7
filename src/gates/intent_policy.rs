use crate::catalog::Catalog;
use crate::eval::{EvaluationContext, EvaluationInput, ReasonCode, TemplateKey};
use crate::gates::{Flow, Gate};
use crate::model::{Intent, ParsedRequest, UserProfile};

/// Gate 5: checks specific to the request's primary intent.
///
/// Secondary intents are never consulted. A `FORBID`, and a `DEFER` for a
/// request that needs no calendar, ends the pipeline. A time request missing
/// its duration defers without stopping, so the calendar gate still runs.
pub struct IntentPolicies;

impl IntentPolicies {
    fn money(request: &ParsedRequest, profile: &UserProfile, ctx: &mut EvaluationContext) -> Flow {
        let policy = &profile.money_policy;
        let params = &request.params;

        if !policy.allowed_actors.contains(&request.actor_type) {
            ctx.push(ReasonCode::ActorNotAllowedForMoney);
            return Flow::forbid(TemplateKey::MoneyForbid);
        }
        if policy.require_return_date && !params.has_return_date() {
            ctx.push(ReasonCode::MissingReturnDate);
            return Flow::defer(TemplateKey::MoneyDefer);
        }
        // A zero cap or zero amount is treated as unset.
        if let (Some(max), Some(amount)) = (policy.max_amount, params.amount)
            && max != 0.0
            && amount != 0.0
            && amount > max
        {
            ctx.push(ReasonCode::ExceedsMaxAmount);
            return Flow::forbid(TemplateKey::MoneyForbid);
        }
        Flow::Continue
    }

    fn time(request: &ParsedRequest, ctx: &mut EvaluationContext) -> Flow {
        ctx.requires_calendar = true;
        if !request.params.has_duration() {
            ctx.push(ReasonCode::MissingDuration);
            ctx.defer_with(TemplateKey::DeferNeedInfo);
        }
        Flow::Continue
    }

    fn intro(request: &ParsedRequest, ctx: &mut EvaluationContext) -> Flow {
        if !request.params.has_pitch() {
            ctx.push(ReasonCode::MissingPitch);
            return Flow::defer(TemplateKey::IntroNeedPitch);
        }
        Flow::Continue
    }

    fn support(request: &ParsedRequest, profile: &UserProfile, ctx: &mut EvaluationContext) -> Flow {
        if !profile
            .support_policy
            .allowed_actors
            .contains(&request.actor_type)
        {
            ctx.push(ReasonCode::ActorNotAllowedForSupport);
            return Flow::forbid(TemplateKey::ForbidPolicy);
        }
        Flow::Continue
    }
}

impl Gate for IntentPolicies {
    fn name(&self) -> &'static str {
        "intent_policy"
    }

    fn apply(
        &self,
        input: &EvaluationInput,
        _catalog: &Catalog,
        ctx: &mut EvaluationContext,
    ) -> Flow {
        let request = &input.parsed_request;
        let profile = &input.user_profile;

        match request.intent {
            Intent::Money => Self::money(request, profile, ctx),
            Intent::Time => Self::time(request, ctx),
            Intent::Intro => Self::intro(request, ctx),
            Intent::Support => Self::support(request, profile, ctx),
            Intent::Attention | Intent::WorkChange => {
                if request.params.has_duration() {
                    ctx.requires_calendar = true;
                }
                Flow::Continue
            }
            Intent::Errand | Intent::DecisionPressure | Intent::EmotionalLoad => Flow::Continue,
        }
    }
}
