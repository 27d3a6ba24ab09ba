//! Domain layer for the carrier dashboard
//!
//! Record model, filter criteria, the filter engine, pagination, and the
//! account provisioner together with the repository traits they depend on.

pub mod model;
pub mod repository;
pub mod service;
