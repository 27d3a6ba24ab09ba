//! In-memory implementations of the repository traits
//!
//! Used by tests and by the CLI when a dataset is supplied inline.

use std::cell::RefCell;

use uuid::Uuid;

use super::{CarrierSource, IdentityStore, NewCredential, NewProfile, ProfileStore, StoreError};
use crate::model::CarrierRecord;
use carrier_types::Error;

/// Carrier source backed by a vector, or by a fixed load error
#[derive(Debug, Clone)]
pub struct InMemoryCarrierSource {
    records: Vec<CarrierRecord>,
    failure: Option<String>,
}

impl InMemoryCarrierSource {
    pub fn new(records: Vec<CarrierRecord>) -> Self {
        Self {
            records,
            failure: None,
        }
    }

    /// Source whose every load fails as unavailable
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

impl CarrierSource for InMemoryCarrierSource {
    fn describe(&self) -> String {
        format!("memory ({} records)", self.records.len())
    }

    fn load_all(&self) -> Result<Vec<CarrierRecord>, Error> {
        match &self.failure {
            Some(message) => Err(Error::DataSourceUnavailable(message.clone())),
            None => Ok(self.records.clone()),
        }
    }
}

/// Identity store that keeps credentials in a list
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    credentials: RefCell<Vec<(Uuid, NewCredential)>>,
    deleted: RefCell<Vec<Uuid>>,
    create_failure: Option<StoreError>,
    delete_failure: Option<StoreError>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every create call fails with this error
    pub fn failing_with(error: StoreError) -> Self {
        Self {
            create_failure: Some(error),
            ..Self::default()
        }
    }

    /// Every delete call fails with this error
    pub fn with_delete_failure(mut self, error: StoreError) -> Self {
        self.delete_failure = Some(error);
        self
    }

    pub fn credentials(&self) -> Vec<(Uuid, NewCredential)> {
        self.credentials.borrow().clone()
    }

    pub fn deleted(&self) -> Vec<Uuid> {
        self.deleted.borrow().clone()
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn create_credential(&self, credential: &NewCredential) -> Result<Uuid, StoreError> {
        if let Some(error) = &self.create_failure {
            return Err(error.clone());
        }
        let mut credentials = self.credentials.borrow_mut();
        if credentials.iter().any(|(_, c)| c.email == credential.email) {
            return Err(StoreError::Rejected(
                "A user with this email address has already been registered".to_string(),
            ));
        }
        let id = Uuid::new_v4();
        credentials.push((id, credential.clone()));
        Ok(id)
    }

    fn delete_credential(&self, user_id: Uuid) -> Result<(), StoreError> {
        self.deleted.borrow_mut().push(user_id);
        if let Some(error) = &self.delete_failure {
            return Err(error.clone());
        }
        self.credentials.borrow_mut().retain(|(id, _)| *id != user_id);
        Ok(())
    }
}

/// Profile store that keeps profiles in a list
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RefCell<Vec<NewProfile>>,
    failure: Option<StoreError>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_with(error: StoreError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn profiles(&self) -> Vec<NewProfile> {
        self.profiles.borrow().clone()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn create_profile(&self, profile: &NewProfile) -> Result<(), StoreError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.profiles.borrow_mut().push(profile.clone());
        Ok(())
    }
}
