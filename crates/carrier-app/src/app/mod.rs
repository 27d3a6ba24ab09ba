//! Application Layer
//!
//! Orchestrates between the front end and the domain/infrastructure layers.
//!
//! - `query_service`: run carrier filters and report the outcome
//! - `provisioning_service`: create user accounts and report the outcome
//! - `notification`: user-visible message content
//! - `view_state`: immutable view state and its reducers

pub mod notification;
pub mod provisioning_service;
pub mod query_service;
pub mod view_state;

pub use notification::{Notification, Severity};
pub use provisioning_service::submit_new_user;
pub use query_service::{run_filter, submit_filter};
pub use view_state::{AdminAction, AdminFormState, FilterAction, FilterViewState};
