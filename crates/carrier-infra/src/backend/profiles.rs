//! Profile store backed by the profiles table

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use carrier_domain::model::Role;
use carrier_domain::repository::{NewProfile, ProfileStore, StoreError};

use super::{rejected, transport_message, BackendClient};

#[derive(Debug, Serialize)]
struct ProfileRow<'a> {
    user_id: Uuid,
    username: &'a str,
    full_name: Option<&'a str>,
    role: Role,
}

impl<'a> From<&'a NewProfile> for ProfileRow<'a> {
    fn from(profile: &'a NewProfile) -> Self {
        Self {
            user_id: profile.user_id,
            username: &profile.username,
            full_name: profile.full_name.as_deref(),
            role: profile.role,
        }
    }
}

/// Profiles inserted into a backend table
pub struct RestProfileStore {
    client: BackendClient,
    table: String,
}

impl RestProfileStore {
    pub fn new(client: BackendClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

impl ProfileStore for RestProfileStore {
    fn create_profile(&self, profile: &NewProfile) -> Result<(), StoreError> {
        debug!(user_id = %profile.user_id, table = %self.table, "inserting profile");
        let response = self
            .client
            .post(&format!("rest/v1/{}", self.table))
            .header("Prefer", "return=minimal")
            .json(&ProfileRow::from(profile))
            .send()
            .map_err(|e| StoreError::Unavailable(transport_message(&e, self.client.timeout())))?;

        if !response.status().is_success() {
            return Err(rejected(response));
        }
        Ok(())
    }
}
