//! Template resolution: template key → display text.
//!
//! Resolution never fails. Unknown keys fall back to the `allow_default`
//! text, and a catalog that somehow lacks even that (one that skipped
//! [`Catalog::validate`]) falls back to [`FALLBACK_TEXT`].

use crate::catalog::Catalog;
use crate::eval::{DecisionResponse, DecisionResult, TemplateKey};

/// Last-resort text for catalogs that were never validated.
pub const FALLBACK_TEXT: &str = "Thanks, I've noted your request.";

impl Catalog {
    /// Display text for a template key, falling back to `allow_default`.
    pub fn resolve_template(&self, key: &str) -> &str {
        self.non_empty_text(key)
            .or_else(|| self.non_empty_text(TemplateKey::AllowDefault.as_str()))
            .unwrap_or(FALLBACK_TEXT)
    }

    fn non_empty_text(&self, key: &str) -> Option<&str> {
        self.template(key)
            .map(|t| t.text.as_str())
            .filter(|text| !text.trim().is_empty())
    }

    /// Attach display text to a decision.
    pub fn respond(&self, decision: DecisionResult) -> DecisionResponse {
        let template_text = self.resolve_template(decision.template_key.as_str()).to_string();
        DecisionResponse {
            result: decision.result,
            reason_codes: decision.reason_codes,
            template_key: decision.template_key,
            template_text,
            requires_calendar: decision.requires_calendar,
        }
    }
}
