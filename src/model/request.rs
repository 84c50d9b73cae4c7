//! The structured request handed over by the parsing collaborator.
//!
//! Deserialization is deliberately lenient: the parser is an LLM or a
//! keyword fallback, so unknown intents collapse to [`Intent::Attention`],
//! unknown actors to [`ActorType::Unknown`], and `null` params to absent.
//! Once a [`ParsedRequest`] exists, every field is a member of its enumeration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What the request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    Money,
    Time,
    Attention,
    WorkChange,
    Support,
    Intro,
    Errand,
    DecisionPressure,
    EmotionalLoad,
}

impl Intent {
    /// Every intent, in catalog order.
    pub const ALL: [Intent; 9] = [
        Intent::Money,
        Intent::Time,
        Intent::Attention,
        Intent::WorkChange,
        Intent::Support,
        Intent::Intro,
        Intent::Errand,
        Intent::DecisionPressure,
        Intent::EmotionalLoad,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Money => "money",
            Intent::Time => "time",
            Intent::Attention => "attention",
            Intent::WorkChange => "work-change",
            Intent::Support => "support",
            Intent::Intro => "intro",
            Intent::Errand => "errand",
            Intent::DecisionPressure => "decision-pressure",
            Intent::EmotionalLoad => "emotional-load",
        }
    }
}

impl FromStr for Intent {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or(())
    }
}

/// Who is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Friend,
    Client,
    Team,
    Family,
    Unknown,
}

impl ActorType {
    pub const ALL: [ActorType; 5] = [
        ActorType::Friend,
        ActorType::Client,
        ActorType::Team,
        ActorType::Family,
        ActorType::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActorType::Friend => "friend",
            ActorType::Client => "client",
            ActorType::Team => "team",
            ActorType::Family => "family",
            ActorType::Unknown => "unknown",
        }
    }
}

impl FromStr for ActorType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActorType::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or(())
    }
}

/// Extracted parameters. All optional; which ones matter depends on the intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// ISO-8601 date the money would come back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,
    /// Minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub two_line_pitch: Option<String>,
}

impl RequestParams {
    /// An empty return date counts as missing; any other text is present.
    pub fn has_return_date(&self) -> bool {
        self.return_date.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// A zero-minute duration carries no information and counts as missing.
    pub fn has_duration(&self) -> bool {
        self.duration.is_some_and(|d| d > 0)
    }

    pub fn has_pitch(&self) -> bool {
        self.two_line_pitch.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// A request after structure extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawParsedRequest")]
pub struct ParsedRequest {
    pub intent: Intent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_intents: Option<Vec<Intent>>,
    pub actor_type: ActorType,
    pub params: RequestParams,
    /// Urgency, guilt, or ultimatum language was detected in the inbound text.
    pub decision_pressure: bool,
}

impl ParsedRequest {
    /// A request with the given intent and actor and nothing else set.
    pub fn new(intent: Intent, actor_type: ActorType) -> Self {
        Self {
            intent,
            secondary_intents: None,
            actor_type,
            params: RequestParams::default(),
            decision_pressure: false,
        }
    }
}

// ── Parser output, as it arrives on the wire ──

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawParsedRequest {
    intent: Option<String>,
    secondary_intents: Option<Vec<String>>,
    actor_type: Option<String>,
    params: Option<RawParams>,
    decision_pressure: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawParams {
    amount: Option<f64>,
    return_date: Option<String>,
    agenda: Option<String>,
    duration: Option<f64>,
    two_line_pitch: Option<String>,
}

impl From<RawParsedRequest> for ParsedRequest {
    fn from(raw: RawParsedRequest) -> Self {
        let intent = raw
            .intent
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Intent::Attention);
        let actor_type = raw
            .actor_type
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(ActorType::Unknown);
        let secondary_intents = raw
            .secondary_intents
            .map(|list| {
                list.iter()
                    .filter_map(|s| s.parse().ok())
                    .collect::<Vec<Intent>>()
            })
            .filter(|list| !list.is_empty());
        let params = raw.params.unwrap_or_default();

        ParsedRequest {
            intent,
            secondary_intents,
            actor_type,
            params: RequestParams {
                amount: params.amount.filter(|a| a.is_finite()),
                return_date: params.return_date,
                agenda: params.agenda,
                duration: params
                    .duration
                    .filter(|d| d.is_finite() && *d >= 0.0)
                    .map(whole_minutes),
                two_line_pitch: params.two_line_pitch,
            },
            decision_pressure: raw.decision_pressure.unwrap_or(false),
        }
    }
}

/// Round to whole minutes. Any positive duration stays at least one minute,
/// so a present sub-minute value is never read back as missing.
fn whole_minutes(d: f64) -> u32 {
    if d == 0.0 {
        return 0;
    }
    d.round().clamp(1.0, u32::MAX as f64) as u32
}
