//! Property tests over randomly generated requests, profiles, and counters.

use std::collections::BTreeSet;

use commitment_gate::eval::{
    DecisionResult, EvaluationInput, MatrixEntry, ReasonCode, TemplateKey, Verdict,
};
use commitment_gate::model::{
    ActorType, AggregatedStats, EnergyLevel, Intent, LoadProfile, MoneyPolicy, ParsedRequest,
    RequestParams, Role, SupportPolicy, UserProfile,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

const RULE_POOL: &[&str] = &[
    "",
    "no calls after 8pm",
    "weekends are off",
    "No money",
    "ERRAND",
    "time",
    "never lend to clients",
    "support",
    "emotional",
];

fn arb_intent() -> impl Strategy<Value = Intent> {
    prop::sample::select(Intent::ALL.to_vec())
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

fn arb_actor() -> impl Strategy<Value = ActorType> {
    prop::sample::select(ActorType::ALL.to_vec())
}

fn arb_load() -> impl Strategy<Value = LoadProfile> {
    prop::sample::select(LoadProfile::ALL.to_vec())
}

fn arb_energy() -> impl Strategy<Value = EnergyLevel> {
    prop::sample::select(vec![EnergyLevel::Green, EnergyLevel::Yellow, EnergyLevel::Red])
}

fn arb_actor_set() -> impl Strategy<Value = BTreeSet<ActorType>> {
    prop::sample::subsequence(ActorType::ALL.to_vec(), 0..=ActorType::ALL.len())
        .prop_map(|actors| actors.into_iter().collect())
}

fn arb_params() -> impl Strategy<Value = RequestParams> {
    (
        prop::option::of(0.0f64..5000.0),
        prop::option::of(prop::sample::select(vec!["", "2026-12-01"])),
        prop::option::of(0u32..240),
        prop::option::of(prop::sample::select(vec!["", "Two lines.\nAbout them."])),
    )
        .prop_map(|(amount, return_date, duration, pitch)| RequestParams {
            amount,
            return_date: return_date.map(String::from),
            agenda: None,
            duration,
            two_line_pitch: pitch.map(String::from),
        })
}

fn arb_request() -> impl Strategy<Value = ParsedRequest> {
    (
        arb_intent(),
        prop::option::of(prop::collection::vec(arb_intent(), 1..3)),
        arb_actor(),
        arb_params(),
        any::<bool>(),
    )
        .prop_map(|(intent, secondary_intents, actor_type, params, decision_pressure)| {
            ParsedRequest {
                intent,
                secondary_intents,
                actor_type,
                params,
                decision_pressure,
            }
        })
}

fn arb_profile() -> impl Strategy<Value = UserProfile> {
    (
        arb_role(),
        arb_load(),
        prop::option::of(0.0f64..3000.0),
        any::<bool>(),
        arb_actor_set(),
        arb_actor_set(),
        prop::collection::vec(prop::sample::select(RULE_POOL.to_vec()), 0..3),
        any::<bool>(),
    )
        .prop_map(
            |(role, load, max_amount, require_return_date, money_actors, support_actors, rules, calendar)| {
                let mut profile = UserProfile::new(role, load);
                profile.money_policy = MoneyPolicy {
                    max_amount,
                    require_return_date,
                    allowed_actors: money_actors,
                };
                profile.support_policy = SupportPolicy {
                    max_weekly: 3,
                    allowed_actors: support_actors,
                };
                profile.hard_rules = rules.into_iter().map(String::from).collect();
                profile.calendar_connected = calendar;
                profile
            },
        )
}

fn arb_stats() -> impl Strategy<Value = AggregatedStats> {
    (0u32..8, 0u32..8, 0u32..8, 0u32..8, 0u32..8).prop_map(
        |(daily, money, time, projects, support)| AggregatedStats {
            daily_commitments: daily,
            weekly_money_requests: money,
            weekly_time_blocks: time,
            concurrent_projects: projects,
            weekly_support: support,
        },
    )
}

fn arb_input() -> impl Strategy<Value = EvaluationInput> {
    (
        arb_request(),
        arb_profile(),
        arb_energy(),
        arb_stats(),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(request, profile, energy, stats, calendar_available)| {
            let mut input = EvaluationInput::new(request, profile);
            input.dynamic_state.energy_level = energy;
            input.aggregated_stats = stats;
            input.calendar_available = calendar_available;
            input
        })
}

/// Role × intent cells the default catalog forbids outright.
fn forbidden_cells() -> Vec<(Role, Intent)> {
    let catalog = commitment_gate::default_evaluator().catalog();
    Role::ALL
        .into_iter()
        .flat_map(|role| Intent::ALL.into_iter().map(move |intent| (role, intent)))
        .filter(|&(role, intent)| catalog.matrix_entry(role, intent) == Some(MatrixEntry::Forbid))
        .collect()
}

// ============================================================================
// Helpers
// ============================================================================

fn decide(input: &EvaluationInput) -> DecisionResult {
    commitment_gate::evaluate(input)
}

/// Position of the gate that emits a reason code.
fn gate_of(reason: &ReasonCode) -> usize {
    match reason {
        ReasonCode::HardRuleMatch(_) | ReasonCode::PressureDetected => 0,
        ReasonCode::RoleIntentForbid | ReasonCode::RoleIntentConditional => 1,
        ReasonCode::EnergyRed | ReasonCode::EnergyYellow => 2,
        ReasonCode::DailyLimitReached
        | ReasonCode::WeeklyMoneyLimit
        | ReasonCode::WeeklyTimeLimit
        | ReasonCode::ProjectLimitReached => 3,
        ReasonCode::ActorNotAllowedForMoney
        | ReasonCode::MissingReturnDate
        | ReasonCode::ExceedsMaxAmount
        | ReasonCode::MissingDuration
        | ReasonCode::MissingPitch
        | ReasonCode::ActorNotAllowedForSupport => 4,
        ReasonCode::CalendarNotConnected | ReasonCode::NoCalendarSlot => 5,
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_evaluation_is_deterministic(input in arb_input()) {
        prop_assert_eq!(decide(&input), decide(&input));
    }

    #[test]
    fn prop_reasons_follow_gate_order(input in arb_input()) {
        let result = decide(&input);
        let gates: Vec<usize> = result.reason_codes.iter().map(gate_of).collect();
        prop_assert!(gates.windows(2).all(|w| w[0] <= w[1]), "{:?}", result.reason_codes);
    }

    /// A hard rule that names any fragment of the intent forbids the request
    /// and hides every later gate.
    #[test]
    fn prop_hard_rule_takes_precedence(
        input in arb_input(),
        start in any::<prop::sample::Index>(),
    ) {
        let mut input = input;
        let name = input.parsed_request.intent.as_str();
        let rule = name[start.index(name.len())..].to_uppercase();
        input.user_profile.hard_rules.insert(0, rule.clone());

        let result = decide(&input);
        prop_assert_eq!(result.result, Verdict::Forbid);
        prop_assert_eq!(result.template_key, TemplateKey::ForbidPolicy);
        prop_assert_eq!(result.reason_codes, vec![ReasonCode::HardRuleMatch(rule)]);
        prop_assert!(!result.requires_calendar);
    }

    #[test]
    fn prop_matrix_forbid_is_final(
        input in arb_input(),
        cell in prop::sample::select(forbidden_cells()),
    ) {
        let mut input = input;
        let (role, intent) = cell;
        input.user_profile.primary_role = role;
        input.parsed_request.intent = intent;
        input.user_profile.hard_rules.clear();

        let result = decide(&input);
        prop_assert_eq!(result.result, Verdict::Forbid);
        prop_assert_eq!(result.template_key, TemplateKey::ForbidPolicy);
        prop_assert!(result.reason_codes.contains(&ReasonCode::RoleIntentForbid));
    }

    #[test]
    fn prop_red_energy_always_forbids(input in arb_input()) {
        let mut input = input;
        input.dynamic_state.energy_level = EnergyLevel::Red;
        input.user_profile.hard_rules.clear();

        let result = decide(&input);
        prop_assert_eq!(result.result, Verdict::Forbid);
        if result.reason_codes.contains(&ReasonCode::RoleIntentForbid) {
            prop_assert_eq!(result.template_key, TemplateKey::ForbidPolicy);
        } else {
            prop_assert_eq!(result.template_key, TemplateKey::ForbidEnergy);
            prop_assert!(result.reason_codes.contains(&ReasonCode::EnergyRed));
        }
    }

    /// Yellow energy annotates an ALLOW and changes nothing else.
    #[test]
    fn prop_yellow_matches_green(input in arb_input()) {
        let mut green = input.clone();
        green.dynamic_state.energy_level = EnergyLevel::Green;
        let mut yellow = input;
        yellow.dynamic_state.energy_level = EnergyLevel::Yellow;

        let g = decide(&green);
        let y = decide(&yellow);
        prop_assert_eq!(g.result, y.result);
        prop_assert_eq!(g.template_key, y.template_key);
        prop_assert_eq!(g.requires_calendar, y.requires_calendar);
        let stripped: Vec<ReasonCode> = y
            .reason_codes
            .iter()
            .filter(|r| **r != ReasonCode::EnergyYellow)
            .cloned()
            .collect();
        prop_assert_eq!(g.reason_codes, stripped);
    }

    #[test]
    fn prop_more_load_is_never_less_cautious(input in arb_input(), extra in arb_stats()) {
        let mut busier = input.clone();
        let stats = &mut busier.aggregated_stats;
        stats.daily_commitments += extra.daily_commitments;
        stats.weekly_money_requests += extra.weekly_money_requests;
        stats.weekly_time_blocks += extra.weekly_time_blocks;
        stats.concurrent_projects += extra.concurrent_projects;

        prop_assert!(decide(&busier).result >= decide(&input).result);
    }

    #[test]
    fn prop_calendar_requirement(input in arb_input()) {
        let result = decide(&input);
        let params = &input.parsed_request.params;
        let expected = match input.parsed_request.intent {
            Intent::Time => result.result != Verdict::Forbid,
            Intent::Attention | Intent::WorkChange => {
                params.has_duration() && result.result != Verdict::Forbid
            }
            _ => false,
        };
        prop_assert_eq!(result.requires_calendar, expected);

        if result.requires_calendar && !input.user_profile.calendar_connected {
            prop_assert_eq!(result.result, Verdict::Defer);
            prop_assert_eq!(result.template_key, TemplateKey::DeferNeedTime);
            prop_assert!(result.has_reason("CALENDAR_NOT_CONNECTED"));
        }
    }

    #[test]
    fn prop_any_template_key_resolves(key in "[a-z_]{0,24}") {
        prop_assert!(!commitment_gate::resolve_template(&key).trim().is_empty());
    }
}
