//! User-visible notification content

use serde::{Deserialize, Serialize};

use carrier_domain::model::{FilterOutcome, RESULT_LIMIT};
use carrier_domain::service::ProvisionError;

pub const UNEXPECTED_FILTER_MESSAGE: &str = "An unexpected error occurred while filtering carriers.";
pub const UNEXPECTED_PROVISION_MESSAGE: &str =
    "An unexpected error occurred while creating the user.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Destructive,
}

/// Title and message shown after an action completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }

    /// Notification for a completed filter action
    pub fn for_filter(outcome: &FilterOutcome) -> Self {
        if let Some(message) = &outcome.error {
            let message = if message.trim().is_empty() {
                UNEXPECTED_FILTER_MESSAGE
            } else {
                message.as_str()
            };
            return Self::new("Error", message, Severity::Destructive);
        }

        match outcome.count {
            0 => Self::new(
                "No Results",
                "No carriers found matching your criteria.",
                Severity::Info,
            ),
            count => {
                let mut message = format!("Found {} carriers", count);
                if count > RESULT_LIMIT {
                    message.push_str(&format!(" (showing first {})", RESULT_LIMIT));
                }
                Self::new("Success", message, Severity::Success)
            }
        }
    }

    /// Notification for a completed create-user action
    pub fn for_provisioning<T>(result: &Result<T, ProvisionError>, username: &str) -> Self {
        match result {
            Ok(_) => Self::new(
                "User Created Successfully",
                format!("{} has been added to the system.", username),
                Severity::Success,
            ),
            Err(ProvisionError::InvalidRequest(message)) => {
                Self::new("Error", message.as_str(), Severity::Destructive)
            }
            Err(ProvisionError::IdentityCreation(message)) => {
                Self::new("Error Creating User", message.as_str(), Severity::Destructive)
            }
            Err(ProvisionError::ProfileCreation { message, .. }) => {
                Self::new("Error Creating Profile", message.as_str(), Severity::Destructive)
            }
            Err(ProvisionError::Unexpected(_)) => {
                Self::new("Error", UNEXPECTED_PROVISION_MESSAGE, Severity::Destructive)
            }
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
