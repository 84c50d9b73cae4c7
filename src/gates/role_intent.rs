use crate::catalog::Catalog;
use crate::eval::{EvaluationContext, EvaluationInput, MatrixEntry, ReasonCode, TemplateKey, Verdict};
use crate::gates::{Flow, Gate};

/// Gate 2: looks up (primary role, intent) in the catalog matrix.
///
/// - `FORBID` → forbid with `forbid_policy`
/// - `CONDITIONAL` → working verdict `DEFER`, flagged
/// - `ALLOW` → working verdict `ALLOW`
/// - `DEFER` or no entry → working verdict `DEFER`
pub struct RoleIntentMatrix;

impl Gate for RoleIntentMatrix {
    fn name(&self) -> &'static str {
        "role_intent"
    }

    fn apply(
        &self,
        input: &EvaluationInput,
        catalog: &Catalog,
        ctx: &mut EvaluationContext,
    ) -> Flow {
        let role = input.user_profile.primary_role;
        let intent = input.parsed_request.intent;

        let entry = catalog.matrix_entry(role, intent);
        if let Some(entry) = entry {
            log::trace!(
                "matrix {} × {} = {}",
                role.as_str(),
                intent.as_str(),
                entry.as_str()
            );
        }

        match entry {
            Some(MatrixEntry::Forbid) => {
                ctx.push(ReasonCode::RoleIntentForbid);
                return Flow::forbid(TemplateKey::ForbidPolicy);
            }
            Some(MatrixEntry::Conditional) => {
                ctx.verdict = Verdict::Defer;
                ctx.push(ReasonCode::RoleIntentConditional);
            }
            Some(MatrixEntry::Allow) => ctx.verdict = Verdict::Allow,
            Some(MatrixEntry::Defer) => ctx.verdict = Verdict::Defer,
            None => {
                log::debug!(
                    "no matrix entry for {} × {}, deferring",
                    role.as_str(),
                    intent.as_str()
                );
                ctx.verdict = Verdict::Defer;
            }
        }
        Flow::Continue
    }
}
