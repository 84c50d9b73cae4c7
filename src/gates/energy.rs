use crate::catalog::Catalog;
use crate::eval::{EvaluationContext, EvaluationInput, ReasonCode, TemplateKey, Verdict};
use crate::gates::{Flow, Gate};
use crate::model::EnergyLevel;

/// Gate 3: the user's momentary energy.
///
/// Red forbids any request still standing with `forbid_energy`.
/// Yellow on an allowed request is advisory: it adds `ENERGY_YELLOW` but
/// leaves the verdict at `ALLOW`.
pub struct EnergyGate;

impl Gate for EnergyGate {
    fn name(&self) -> &'static str {
        "energy"
    }

    fn apply(
        &self,
        input: &EvaluationInput,
        _catalog: &Catalog,
        ctx: &mut EvaluationContext,
    ) -> Flow {
        match input.dynamic_state.energy_level {
            EnergyLevel::Red => {
                ctx.push(ReasonCode::EnergyRed);
                if matches!(ctx.verdict, Verdict::Allow | Verdict::Defer) {
                    return Flow::forbid(TemplateKey::ForbidEnergy);
                }
            }
            EnergyLevel::Yellow => {
                if ctx.verdict == Verdict::Allow {
                    ctx.push(ReasonCode::EnergyYellow);
                }
            }
            EnergyLevel::Green => {}
        }
        Flow::Continue
    }
}
