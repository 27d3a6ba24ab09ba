//! File-based implementations of the repository traits

mod file_carrier_source;

pub use file_carrier_source::FileCarrierSource;
