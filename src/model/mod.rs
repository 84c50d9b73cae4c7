pub mod profile;
pub mod request;

pub use profile::{
    AggregatedStats, DynamicState, EnergyLevel, LoadProfile, MoneyPolicy, Role, SupportPolicy,
    UserProfile,
};
pub use request::{ActorType, Intent, ParsedRequest, RequestParams};
