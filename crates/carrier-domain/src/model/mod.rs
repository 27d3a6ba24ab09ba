//! Domain model types

pub mod account;
pub mod carrier;
pub mod criteria;

pub use account::{NewUserRequest, ProvisionedAccount, Role};
pub use carrier::{
    coerce_count, CarrierOperation, CarrierRecord, ClassDefinition, StateCode, UnknownLabel,
    US_STATES,
};
pub use criteria::{
    CarrierPredicate, FilterCriteria, FilterOutcome, FilterResult, TextConstraint, RESULT_LIMIT,
};
