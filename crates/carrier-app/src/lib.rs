//! Application service layer - config, queries, provisioning, view state

pub mod app;
pub mod config;
pub mod repository;
