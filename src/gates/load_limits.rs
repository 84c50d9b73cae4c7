use crate::catalog::Catalog;
use crate::eval::{EvaluationContext, EvaluationInput, ReasonCode, TemplateKey};
use crate::gates::{Flow, Gate};
use crate::model::Intent;

/// Gate 4: capacity limits of the user's load profile.
///
/// Evaluation order:
/// 1. Daily commitments at limit → FORBID (`forbid_no_capacity`)
/// 2. Money request and weekly money requests at limit → FORBID
/// 3. Time request and weekly time blocks at limit → FORBID
/// 4. Work change and concurrent projects at limit → ALLOW downgraded to DEFER
///
/// Only the first limit that applies is reported.
pub struct LoadLimits;

impl Gate for LoadLimits {
    fn name(&self) -> &'static str {
        "load_limits"
    }

    fn apply(
        &self,
        input: &EvaluationInput,
        catalog: &Catalog,
        ctx: &mut EvaluationContext,
    ) -> Flow {
        let profile = input.user_profile.load_profile;
        let Some(limits) = catalog.limits(profile) else {
            log::debug!("no limits for load profile {}, skipping", profile.as_str());
            return Flow::Continue;
        };
        let stats = &input.aggregated_stats;
        let intent = input.parsed_request.intent;

        if stats.daily_commitments >= limits.daily_commitments {
            ctx.push(ReasonCode::DailyLimitReached);
            return Flow::forbid(TemplateKey::ForbidNoCapacity);
        }

        match intent {
            Intent::Money if stats.weekly_money_requests >= limits.weekly_money_requests => {
                ctx.push(ReasonCode::WeeklyMoneyLimit);
                Flow::forbid(TemplateKey::ForbidNoCapacity)
            }
            Intent::Time if stats.weekly_time_blocks >= limits.weekly_time_blocks => {
                ctx.push(ReasonCode::WeeklyTimeLimit);
                Flow::forbid(TemplateKey::ForbidNoCapacity)
            }
            Intent::WorkChange if stats.concurrent_projects >= limits.concurrent_projects => {
                ctx.push(ReasonCode::ProjectLimitReached);
                ctx.downgrade_to_defer();
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }
}
