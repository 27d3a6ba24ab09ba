//! Domain services

pub mod carrier_filter;
pub mod pagination;
pub mod password;
pub mod provisioner;

pub use carrier_filter::{count_matching, filter_carriers};
pub use pagination::{Pagination, DEFAULT_ITEMS_PER_PAGE};
pub use password::{generate_password, PASSWORD_CHARSET, PASSWORD_LENGTH};
pub use provisioner::{login_email, AccountProvisioner, ProvisionError, DEFAULT_EMAIL_DOMAIN};
