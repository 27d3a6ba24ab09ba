//! Identity store backed by the admin users API

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use carrier_domain::repository::{IdentityStore, NewCredential, StoreError};

use super::{rejected, transport_message, BackendClient};

const ADMIN_USERS_PATH: &str = "auth/v1/admin/users";

#[derive(Debug, Serialize)]
struct UserMetadata<'a> {
    username: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateUserBody<'a> {
    email: &'a str,
    password: &'a str,
    user_metadata: UserMetadata<'a>,
    email_confirm: bool,
}

impl<'a> From<&'a NewCredential> for CreateUserBody<'a> {
    fn from(credential: &'a NewCredential) -> Self {
        Self {
            email: &credential.email,
            password: &credential.password,
            user_metadata: UserMetadata {
                username: &credential.username,
            },
            email_confirm: credential.email_confirmed,
        }
    }
}

/// The created user, either bare or wrapped in `{"user": ...}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreatedUser {
    Wrapped { user: UserId },
    Bare(UserId),
}

#[derive(Debug, Deserialize)]
struct UserId {
    id: Uuid,
}

impl CreatedUser {
    fn id(&self) -> Uuid {
        match self {
            CreatedUser::Wrapped { user } => user.id,
            CreatedUser::Bare(user) => user.id,
        }
    }
}

fn parse_created_user(body: &str) -> Result<Uuid, StoreError> {
    serde_json::from_str::<CreatedUser>(body)
        .map(|user| user.id())
        .map_err(|e| StoreError::Malformed(format!("Unreadable user response: {}", e)))
}

/// Credentials created through the backend's admin API
pub struct RestIdentityStore {
    client: BackendClient,
}

impl RestIdentityStore {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

impl IdentityStore for RestIdentityStore {
    fn create_credential(&self, credential: &NewCredential) -> Result<Uuid, StoreError> {
        debug!(email = %credential.email, "creating credential");
        let response = self
            .client
            .post(ADMIN_USERS_PATH)
            .json(&CreateUserBody::from(credential))
            .send()
            .map_err(|e| StoreError::Unavailable(transport_message(&e, self.client.timeout())))?;

        if !response.status().is_success() {
            return Err(rejected(response));
        }

        let body = response
            .text()
            .map_err(|e| StoreError::Malformed(format!("Unreadable user response: {}", e)))?;
        parse_created_user(&body)
    }

    fn delete_credential(&self, user_id: Uuid) -> Result<(), StoreError> {
        debug!(%user_id, "deleting credential");
        let response = self
            .client
            .delete(&format!("{}/{}", ADMIN_USERS_PATH, user_id))
            .send()
            .map_err(|e| StoreError::Unavailable(transport_message(&e, self.client.timeout())))?;

        if !response.status().is_success() {
            return Err(rejected(response));
        }
        Ok(())
    }
}
