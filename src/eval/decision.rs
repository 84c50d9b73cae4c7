use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Final ternary verdict. Ordered by caution: `Allow < Defer < Forbid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Allow,
    Defer,
    Forbid,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Allow => "ALLOW",
            Verdict::Defer => "DEFER",
            Verdict::Forbid => "FORBID",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell of the Role × Intent matrix.
///
/// `Conditional` only ever yields [`Verdict::Defer`], but stays distinct:
/// it records that the matrix would allow the request under extra conditions,
/// where a plain `Defer` cell expresses no such intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatrixEntry {
    Allow,
    Defer,
    Forbid,
    Conditional,
}

impl MatrixEntry {
    pub fn as_str(self) -> &'static str {
        match self {
            MatrixEntry::Allow => "ALLOW",
            MatrixEntry::Defer => "DEFER",
            MatrixEntry::Forbid => "FORBID",
            MatrixEntry::Conditional => "CONDITIONAL",
        }
    }
}

/// Machine-readable tag explaining why a gate acted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    /// Carries the hard rule's original text.
    HardRuleMatch(String),
    PressureDetected,
    RoleIntentForbid,
    RoleIntentConditional,
    EnergyRed,
    EnergyYellow,
    DailyLimitReached,
    WeeklyMoneyLimit,
    WeeklyTimeLimit,
    ProjectLimitReached,
    ActorNotAllowedForMoney,
    MissingReturnDate,
    ExceedsMaxAmount,
    MissingDuration,
    MissingPitch,
    ActorNotAllowedForSupport,
    CalendarNotConnected,
    NoCalendarSlot,
}

impl ReasonCode {
    /// Tag without any payload (`HARD_RULE_MATCH` for a hard rule).
    pub fn tag(&self) -> &'static str {
        match self {
            ReasonCode::HardRuleMatch(_) => "HARD_RULE_MATCH",
            ReasonCode::PressureDetected => "PRESSURE_DETECTED",
            ReasonCode::RoleIntentForbid => "ROLE_INTENT_FORBID",
            ReasonCode::RoleIntentConditional => "ROLE_INTENT_CONDITIONAL",
            ReasonCode::EnergyRed => "ENERGY_RED",
            ReasonCode::EnergyYellow => "ENERGY_YELLOW",
            ReasonCode::DailyLimitReached => "DAILY_LIMIT_REACHED",
            ReasonCode::WeeklyMoneyLimit => "WEEKLY_MONEY_LIMIT",
            ReasonCode::WeeklyTimeLimit => "WEEKLY_TIME_LIMIT",
            ReasonCode::ProjectLimitReached => "PROJECT_LIMIT_REACHED",
            ReasonCode::ActorNotAllowedForMoney => "ACTOR_NOT_ALLOWED_FOR_MONEY",
            ReasonCode::MissingReturnDate => "MISSING_RETURN_DATE",
            ReasonCode::ExceedsMaxAmount => "EXCEEDS_MAX_AMOUNT",
            ReasonCode::MissingDuration => "MISSING_DURATION",
            ReasonCode::MissingPitch => "MISSING_PITCH",
            ReasonCode::ActorNotAllowedForSupport => "ACTOR_NOT_ALLOWED_FOR_SUPPORT",
            ReasonCode::CalendarNotConnected => "CALENDAR_NOT_CONNECTED",
            ReasonCode::NoCalendarSlot => "NO_CALENDAR_SLOT",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasonCode::HardRuleMatch(rule) => write!(f, "HARD_RULE_MATCH:{rule}"),
            other => f.write_str(other.tag()),
        }
    }
}

impl Serialize for ReasonCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Key into the catalog's template table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    AllowDefault,
    ForbidPolicy,
    ForbidEnergy,
    ForbidNoCapacity,
    MoneyForbid,
    MoneyDefer,
    DeferNeedInfo,
    DeferNeedTime,
    IntroNeedPitch,
}

impl TemplateKey {
    /// Every key the evaluator can emit; the catalog must define all of them.
    pub const ALL: [TemplateKey; 9] = [
        TemplateKey::AllowDefault,
        TemplateKey::ForbidPolicy,
        TemplateKey::ForbidEnergy,
        TemplateKey::ForbidNoCapacity,
        TemplateKey::MoneyForbid,
        TemplateKey::MoneyDefer,
        TemplateKey::DeferNeedInfo,
        TemplateKey::DeferNeedTime,
        TemplateKey::IntroNeedPitch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKey::AllowDefault => "allow_default",
            TemplateKey::ForbidPolicy => "forbid_policy",
            TemplateKey::ForbidEnergy => "forbid_energy",
            TemplateKey::ForbidNoCapacity => "forbid_no_capacity",
            TemplateKey::MoneyForbid => "money_forbid",
            TemplateKey::MoneyDefer => "money_defer",
            TemplateKey::DeferNeedInfo => "defer_need_info",
            TemplateKey::DeferNeedTime => "defer_need_time",
            TemplateKey::IntroNeedPitch => "intro_need_pitch",
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TemplateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Output of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResult {
    pub result: Verdict,
    /// In gate execution order; duplicates are kept.
    pub reason_codes: Vec<ReasonCode>,
    pub template_key: TemplateKey,
    pub requires_calendar: bool,
}

impl DecisionResult {
    /// Whether any reason code carries the given tag (`HARD_RULE_MATCH` matches every rule).
    pub fn has_reason(&self, tag: &str) -> bool {
        self.reason_codes.iter().any(|r| r.tag() == tag)
    }

    /// Reason codes rendered as their string tags.
    pub fn reason_strings(&self) -> Vec<String> {
        self.reason_codes.iter().map(ToString::to_string).collect()
    }
}

/// A decision joined with its display text, as handed to the caller's UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResponse {
    pub result: Verdict,
    pub reason_codes: Vec<ReasonCode>,
    pub template_key: TemplateKey,
    pub template_text: String,
    pub requires_calendar: bool,
}
