//! The user's standing policy, momentary state, and usage counters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::request::ActorType;

/// The user's self-declared working role; selects a row of the Role × Intent matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Creator,
    Manager,
    Expert,
    Helper,
    Executor,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Creator,
        Role::Manager,
        Role::Expert,
        Role::Helper,
        Role::Executor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Creator => "creator",
            Role::Manager => "manager",
            Role::Expert => "expert",
            Role::Helper => "helper",
            Role::Executor => "executor",
        }
    }
}

/// Capacity tier; selects the numeric limits enforced by the load gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoadProfile {
    A,
    B,
    C,
}

impl LoadProfile {
    pub const ALL: [LoadProfile; 3] = [LoadProfile::A, LoadProfile::B, LoadProfile::C];

    pub fn as_str(self) -> &'static str {
        match self {
            LoadProfile::A => "A",
            LoadProfile::B => "B",
            LoadProfile::C => "C",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    #[default]
    Green,
    Yellow,
    Red,
}

impl EnergyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            EnergyLevel::Green => "green",
            EnergyLevel::Yellow => "yellow",
            EnergyLevel::Red => "red",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyPolicy {
    /// Largest amount the user will lend or pay. `None` or `0` means no cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    #[serde(default)]
    pub require_return_date: bool,
    #[serde(default)]
    pub allowed_actors: BTreeSet<ActorType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportPolicy {
    /// Informational; weekly support volume is not gated.
    #[serde(default)]
    pub max_weekly: u32,
    #[serde(default)]
    pub allowed_actors: BTreeSet<ActorType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub primary_role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_role: Option<Role>,
    pub load_profile: LoadProfile,
    #[serde(default)]
    pub money_policy: MoneyPolicy,
    #[serde(default)]
    pub support_policy: SupportPolicy,
    /// Free-text blockers, matched case-insensitively against the intent name.
    #[serde(default)]
    pub hard_rules: Vec<String>,
    #[serde(default)]
    pub calendar_connected: bool,
}

impl UserProfile {
    /// A profile with empty policies, no hard rules, and no calendar.
    pub fn new(primary_role: Role, load_profile: LoadProfile) -> Self {
        Self {
            primary_role,
            secondary_role: None,
            load_profile,
            money_policy: MoneyPolicy::default(),
            support_policy: SupportPolicy::default(),
            hard_rules: Vec::new(),
            calendar_connected: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicState {
    #[serde(default)]
    pub energy_level: EnergyLevel,
}

/// Active (pending or confirmed) commitments over the rolling day/week window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregatedStats {
    pub daily_commitments: u32,
    pub weekly_money_requests: u32,
    pub weekly_time_blocks: u32,
    pub concurrent_projects: u32,
    pub weekly_support: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_from_storage_json() {
        let profile: UserProfile = serde_json::from_str(
            r#"{
                "userId": "u-1",
                "primaryRole": "executor",
                "loadProfile": "B",
                "moneyPolicy": {"maxAmount": 1000, "requireReturnDate": true,
                                "allowedActors": ["family", "friend"]},
                "supportPolicy": {"maxWeekly": 3, "allowedActors": ["team"]},
                "hardRules": ["No loans"],
                "calendarConnected": true
            }"#,
        )
        .unwrap();
        assert_eq!(profile.primary_role, Role::Executor);
        assert_eq!(profile.load_profile, LoadProfile::B);
        assert_eq!(profile.money_policy.max_amount, Some(1000.0));
        assert!(profile.money_policy.allowed_actors.contains(&ActorType::Family));
        assert!(!profile.money_policy.allowed_actors.contains(&ActorType::Client));
        assert_eq!(profile.support_policy.max_weekly, 3);
        assert_eq!(profile.hard_rules, vec!["No loans"]);
        assert!(profile.calendar_connected);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = serde_json::from_str::<UserProfile>(
            r#"{"primaryRole": "wizard", "loadProfile": "A"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn energy_defaults_to_green() {
        let state: DynamicState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.energy_level, EnergyLevel::Green);
    }

    #[test]
    fn stats_default_to_zero() {
        let stats: AggregatedStats = serde_json::from_str(r#"{"dailyCommitments": 2}"#).unwrap();
        assert_eq!(stats.daily_commitments, 2);
        assert_eq!(stats.weekly_support, 0);
    }
}
