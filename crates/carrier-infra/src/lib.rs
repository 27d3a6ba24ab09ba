//! Infrastructure layer - dataset loaders and REST backend clients

pub mod backend;
pub mod csv_loader;
pub mod persistence;
