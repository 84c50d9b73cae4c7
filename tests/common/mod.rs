#![allow(dead_code)]

use commitment_gate::eval::EvaluationInput;
use commitment_gate::model::{
    ActorType, Intent, LoadProfile, MoneyPolicy, ParsedRequest, Role, SupportPolicy, UserProfile,
};

/// Executor on load profile B who lends to family and friends against a return
/// date, supports anyone but unknown actors, with a connected calendar.
pub fn executor_profile() -> UserProfile {
    let mut profile = UserProfile::new(Role::Executor, LoadProfile::B);
    profile.money_policy = MoneyPolicy {
        max_amount: None,
        require_return_date: true,
        allowed_actors: [ActorType::Family, ActorType::Friend].into(),
    };
    profile.support_policy = SupportPolicy {
        max_weekly: 3,
        allowed_actors: [ActorType::Family, ActorType::Friend, ActorType::Team].into(),
    };
    profile.calendar_connected = true;
    profile
}

/// A request from family with every parameter its intent needs.
pub fn complete_request(intent: Intent) -> ParsedRequest {
    let mut req = ParsedRequest::new(intent, ActorType::Family);
    match intent {
        Intent::Money => {
            req.params.amount = Some(500.0);
            req.params.return_date = Some("2026-11-30".into());
        }
        Intent::Time => req.params.duration = Some(60),
        Intent::Intro => {
            req.params.two_line_pitch = Some("Runs a bakery.\nWants to meet your supplier.".into())
        }
        _ => {}
    }
    req
}

/// An otherwise-allowed input for the executor profile.
pub fn allowed_input(intent: Intent) -> EvaluationInput {
    EvaluationInput::new(complete_request(intent), executor_profile())
}
