use crate::catalog::Catalog;
use crate::eval::{EvaluationContext, EvaluationInput, ReasonCode, TemplateKey};
use crate::gates::{Flow, Gate};

/// Gate 6: runs only when an earlier gate marked the request as needing a
/// calendar slot. No connected calendar, or a known lack of free slots,
/// defers with `defer_need_time`. An unchecked slot (`None`) passes.
pub struct CalendarAvailability;

impl Gate for CalendarAvailability {
    fn name(&self) -> &'static str {
        "calendar"
    }

    fn apply(
        &self,
        input: &EvaluationInput,
        _catalog: &Catalog,
        ctx: &mut EvaluationContext,
    ) -> Flow {
        if !ctx.requires_calendar {
            return Flow::Continue;
        }

        let reason = if !input.user_profile.calendar_connected {
            ReasonCode::CalendarNotConnected
        } else if input.calendar_available == Some(false) {
            ReasonCode::NoCalendarSlot
        } else {
            return Flow::Continue;
        };

        ctx.push(reason);
        ctx.defer_with(TemplateKey::DeferNeedTime);
        Flow::Continue
    }
}
