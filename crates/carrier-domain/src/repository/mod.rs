//! Repository trait definitions for the dataset and the identity backend

mod memory;

pub use memory::{InMemoryCarrierSource, InMemoryIdentityStore, InMemoryProfileStore};

use thiserror::Error;
use uuid::Uuid;

use crate::model::{CarrierRecord, FilterCriteria, FilterResult, Role};
use crate::service::filter_carriers;
use carrier_types::Error;

/// Source of carrier records
pub trait CarrierSource {
    /// Short description used in log lines
    fn describe(&self) -> String;

    /// Load every record, normalized to the canonical shape
    fn load_all(&self) -> Result<Vec<CarrierRecord>, Error>;

    /// Run a filter query.
    ///
    /// The default loads the whole dataset and filters in memory. Sources
    /// that can filter and count natively override this and must return
    /// exactly what the in-memory path would.
    fn query(&self, criteria: &FilterCriteria) -> Result<FilterResult, Error> {
        let dataset = self.load_all()?;
        Ok(filter_carriers(&dataset, criteria))
    }
}

impl<T: CarrierSource + ?Sized> CarrierSource for &T {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn load_all(&self) -> Result<Vec<CarrierRecord>, Error> {
        (**self).load_all()
    }

    fn query(&self, criteria: &FilterCriteria) -> Result<FilterResult, Error> {
        (**self).query(criteria)
    }
}

impl<T: CarrierSource + ?Sized> CarrierSource for Box<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn load_all(&self) -> Result<Vec<CarrierRecord>, Error> {
        (**self).load_all()
    }

    fn query(&self, criteria: &FilterCriteria) -> Result<FilterResult, Error> {
        (**self).query(criteria)
    }
}

/// Failure reported by the identity or profile store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store answered and refused the write
    #[error("{0}")]
    Rejected(String),

    /// The store could not be reached or timed out
    #[error("{0}")]
    Unavailable(String),

    /// The store answered with something we could not interpret
    #[error("{0}")]
    Malformed(String),
}

/// Credential to create in the identity store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCredential {
    pub email: String,
    pub password: String,
    pub username: String,
    /// Mark the email as already verified
    pub email_confirmed: bool,
}

/// Profile row linked to an identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub user_id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub role: Role,
}

/// External system of record for login credentials
pub trait IdentityStore {
    /// Create a credential and return the store-generated identity id
    fn create_credential(&self, credential: &NewCredential) -> Result<Uuid, StoreError>;

    /// Remove a credential, used to roll back a half-created account
    fn delete_credential(&self, user_id: Uuid) -> Result<(), StoreError>;
}

impl<T: IdentityStore + ?Sized> IdentityStore for &T {
    fn create_credential(&self, credential: &NewCredential) -> Result<Uuid, StoreError> {
        (**self).create_credential(credential)
    }

    fn delete_credential(&self, user_id: Uuid) -> Result<(), StoreError> {
        (**self).delete_credential(user_id)
    }
}

/// External store of user display attributes and roles
pub trait ProfileStore {
    fn create_profile(&self, profile: &NewProfile) -> Result<(), StoreError>;
}

impl<T: ProfileStore + ?Sized> ProfileStore for &T {
    fn create_profile(&self, profile: &NewProfile) -> Result<(), StoreError> {
        (**self).create_profile(profile)
    }
}
