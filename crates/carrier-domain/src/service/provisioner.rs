//! Account provisioning: credential first, then profile
//!
//! The two writes are not atomic on the backend. When the profile write
//! fails, the credential created by the first write is deleted again so no
//! login exists without a profile. If that delete also fails, the orphaned
//! identity id is returned in the error and logged.

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::model::{NewUserRequest, ProvisionedAccount};
use crate::repository::{IdentityStore, NewCredential, NewProfile, ProfileStore, StoreError};

/// Domain appended to synthesized login emails
pub const DEFAULT_EMAIL_DOMAIN: &str = "carrier-data.com";

/// Errors from account provisioning
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisionError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    IdentityCreation(String),

    #[error("{message}")]
    ProfileCreation {
        message: String,
        /// Identity left behind because the rollback delete failed
        orphaned_user_id: Option<Uuid>,
    },

    #[error("{0}")]
    Unexpected(String),
}

impl From<ProvisionError> for carrier_types::Error {
    fn from(err: ProvisionError) -> Self {
        match err {
            ProvisionError::InvalidRequest(msg) => carrier_types::Error::InvalidInput(msg),
            ProvisionError::IdentityCreation(msg) => {
                carrier_types::Error::IdentityCreationFailure(msg)
            }
            ProvisionError::ProfileCreation { message, .. } => {
                carrier_types::Error::ProfileCreationFailure(message)
            }
            ProvisionError::Unexpected(msg) => carrier_types::Error::UnexpectedFailure(msg),
        }
    }
}

/// Build the login email for a username: lower-cased, whitespace removed
pub fn login_email(username: &str, domain: &str) -> String {
    let local: String = username
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    format!("{}@{}", local, domain)
}

/// Creates credential and profile entries for new users
pub struct AccountProvisioner<I, P> {
    identity: I,
    profiles: P,
    email_domain: String,
}

impl<I: IdentityStore, P: ProfileStore> AccountProvisioner<I, P> {
    pub fn new(identity: I, profiles: P) -> Self {
        Self {
            identity,
            profiles,
            email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
        }
    }

    pub fn with_email_domain(mut self, domain: impl Into<String>) -> Self {
        self.email_domain = domain.into();
        self
    }

    pub fn email_domain(&self) -> &str {
        &self.email_domain
    }

    /// Create the credential, then the profile keyed by the new identity id
    pub fn create_user(&self, request: &NewUserRequest) -> Result<ProvisionedAccount, ProvisionError> {
        validate(request)?;

        let username = request.username.trim().to_string();
        let email = login_email(&username, &self.email_domain);
        let credential = NewCredential {
            email: email.clone(),
            password: request.password.clone(),
            username: username.clone(),
            email_confirmed: true,
        };

        let user_id = match self.identity.create_credential(&credential) {
            Ok(id) => id,
            Err(StoreError::Malformed(msg)) => {
                warn!(%email, "identity store returned an unreadable response: {}", msg);
                return Err(ProvisionError::Unexpected(msg));
            }
            Err(e) => {
                warn!(%email, "credential creation failed: {}", e);
                return Err(ProvisionError::IdentityCreation(e.to_string()));
            }
        };

        let profile = NewProfile {
            user_id,
            username: username.clone(),
            full_name: request.full_name().map(str::to_string),
            role: request.role,
        };

        if let Err(e) = self.profiles.create_profile(&profile) {
            warn!(%user_id, "profile creation failed, removing credential: {}", e);
            let orphaned_user_id = match self.identity.delete_credential(user_id) {
                Ok(()) => None,
                Err(delete_err) => {
                    error!(%user_id, %email, "credential left without profile: {}", delete_err);
                    Some(user_id)
                }
            };
            return Err(ProvisionError::ProfileCreation {
                message: e.to_string(),
                orphaned_user_id,
            });
        }

        info!(%user_id, %email, role = %request.role, "provisioned account");

        Ok(ProvisionedAccount {
            user_id,
            email,
            username,
            role: request.role,
            created_at: Utc::now(),
        })
    }
}

fn validate(request: &NewUserRequest) -> Result<(), ProvisionError> {
    if request.username.trim().is_empty() {
        return Err(ProvisionError::InvalidRequest("Username is required".to_string()));
    }
    if request.password.trim().is_empty() {
        return Err(ProvisionError::InvalidRequest("Password is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use crate::repository::{InMemoryIdentityStore, InMemoryProfileStore};

    #[test]
    fn test_login_email() {
        assert_eq!(login_email("John Smith", "carrier-data.com"), "johnsmith@carrier-data.com");
        assert_eq!(login_email(" A\tB ", "x.org"), "ab@x.org");
    }

    #[test]
    fn test_both_steps_succeed() {
        let identity = InMemoryIdentityStore::new();
        let profiles = InMemoryProfileStore::new();
        let provisioner = AccountProvisioner::new(&identity, &profiles);

        let request = NewUserRequest::new("Jane Doe", "hunter2")
            .with_full_name("Jane Doe")
            .with_role(Role::Admin);
        let account = provisioner.create_user(&request).unwrap();

        assert_eq!(account.email, "janedoe@carrier-data.com");
        assert_eq!(account.role, Role::Admin);

        let credentials = identity.credentials();
        assert_eq!(credentials.len(), 1);
        assert_eq!(credentials[0].0, account.user_id);
        assert!(credentials[0].1.email_confirmed);
        assert_eq!(credentials[0].1.username, "Jane Doe");

        let stored = profiles.profiles();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].user_id, account.user_id);
        assert_eq!(stored[0].full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(stored[0].role, Role::Admin);
    }

    #[test]
    fn test_identity_failure_skips_profile() {
        let identity = InMemoryIdentityStore::failing_with(StoreError::Rejected(
            "Password should be at least 6 characters".to_string(),
        ));
        let profiles = InMemoryProfileStore::new();
        let provisioner = AccountProvisioner::new(&identity, &profiles);

        let err = provisioner
            .create_user(&NewUserRequest::new("abc", "x"))
            .unwrap_err();

        assert_eq!(
            err,
            ProvisionError::IdentityCreation("Password should be at least 6 characters".to_string())
        );
        assert!(profiles.profiles().is_empty());
    }

    #[test]
    fn test_profile_failure_rolls_back_credential() {
        let identity = InMemoryIdentityStore::new();
        let profiles = InMemoryProfileStore::failing_with(StoreError::Rejected(
            "duplicate key value violates unique constraint".to_string(),
        ));
        let provisioner = AccountProvisioner::new(&identity, &profiles);

        let err = provisioner
            .create_user(&NewUserRequest::new("abc", "pw"))
            .unwrap_err();

        assert_eq!(
            err,
            ProvisionError::ProfileCreation {
                message: "duplicate key value violates unique constraint".to_string(),
                orphaned_user_id: None,
            }
        );
        assert_eq!(identity.deleted().len(), 1);
        assert!(identity.credentials().is_empty());
    }

    #[test]
    fn test_failed_rollback_reports_orphan() {
        let identity = InMemoryIdentityStore::new()
            .with_delete_failure(StoreError::Unavailable("connection reset".to_string()));
        let profiles =
            InMemoryProfileStore::failing_with(StoreError::Unavailable("timed out".to_string()));
        let provisioner = AccountProvisioner::new(&identity, &profiles);

        let err = provisioner
            .create_user(&NewUserRequest::new("abc", "pw"))
            .unwrap_err();

        let orphan = identity.credentials()[0].0;
        assert_eq!(
            err,
            ProvisionError::ProfileCreation {
                message: "timed out".to_string(),
                orphaned_user_id: Some(orphan),
            }
        );
    }

    #[test]
    fn test_malformed_identity_response_is_unexpected() {
        let identity =
            InMemoryIdentityStore::failing_with(StoreError::Malformed("missing id".to_string()));
        let profiles = InMemoryProfileStore::new();
        let provisioner = AccountProvisioner::new(&identity, &profiles);

        let err = provisioner
            .create_user(&NewUserRequest::new("abc", "pw"))
            .unwrap_err();
        assert!(matches!(err, ProvisionError::Unexpected(_)));
    }

    #[test]
    fn test_invalid_request_contacts_no_store() {
        let identity = InMemoryIdentityStore::new();
        let profiles = InMemoryProfileStore::new();
        let provisioner = AccountProvisioner::new(&identity, &profiles);

        for request in [NewUserRequest::new("", "pw"), NewUserRequest::new("abc", "")] {
            let err = provisioner.create_user(&request).unwrap_err();
            assert!(matches!(err, ProvisionError::InvalidRequest(_)));
        }
        assert!(identity.credentials().is_empty());
    }

    #[test]
    fn test_custom_domain() {
        let identity = InMemoryIdentityStore::new();
        let profiles = InMemoryProfileStore::new();
        let provisioner =
            AccountProvisioner::new(&identity, &profiles).with_email_domain("fleet.example");
        let account = provisioner
            .create_user(&NewUserRequest::new("Ops", "pw"))
            .unwrap();
        assert_eq!(account.email, "ops@fleet.example");
    }

    #[test]
    fn test_into_workspace_error() {
        let err: carrier_types::Error = ProvisionError::IdentityCreation("taken".into()).into();
        assert!(matches!(err, carrier_types::Error::IdentityCreationFailure(ref m) if m == "taken"));
    }
}
