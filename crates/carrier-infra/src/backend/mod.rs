//! REST clients for the hosted backend
//!
//! The backend exposes a PostgREST-style table API under `/rest/v1` and a
//! GoTrue-style admin API under `/auth/v1`. All calls are blocking and run
//! with the configured request timeout.

mod carrier_query;
mod http_csv_source;
mod identity;
mod profiles;

pub use carrier_query::RestCarrierSource;
pub use http_csv_source::HttpCsvSource;
pub use identity::RestIdentityStore;
pub use profiles::RestProfileStore;

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde_json::Value;

use carrier_domain::repository::StoreError;
use carrier_types::Error;

/// Build a blocking HTTP client with a request timeout
pub fn http_client(timeout: Duration) -> Result<Client, Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("carrier-dashboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::UnexpectedFailure(format!("Failed to build HTTP client: {}", e)))
}

/// Connection to the hosted backend, authenticated with a service key
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    service_key: String,
    timeout: Duration,
    http: Client,
}

impl BackendClient {
    pub fn new(
        base_url: impl Into<String>,
        service_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::InvalidInput("Backend URL is empty".to_string()));
        }
        Ok(Self {
            base_url,
            service_key: service_key.into(),
            timeout,
            http: http_client(timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for a path below the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.get(self.url(path)))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.post(self.url(path)))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.delete(self.url(path)))
    }
}

/// Describe a transport-level failure for a user
pub(crate) fn transport_message(err: &reqwest::Error, timeout: Duration) -> String {
    if err.is_timeout() {
        format!("Request timed out after {}s", timeout.as_secs())
    } else if err.is_connect() {
        "Could not connect to the backend".to_string()
    } else {
        format!("Request failed: {}", err)
    }
}

/// Extract the error message from a backend error body.
///
/// GoTrue and PostgREST use different keys; fall back to the status line.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|key| json.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

/// Turn a non-2xx store response into a rejection with the body's message
pub(crate) fn rejected(response: reqwest::blocking::Response) -> StoreError {
    let status = response.status();
    let body = response.text().unwrap_or_default();
    StoreError::Rejected(error_message(status, &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client =
            BackendClient::new("https://x.supabase.co/", "key", Duration::from_secs(5)).unwrap();
        assert_eq!(client.url("/rest/v1/profiles"), "https://x.supabase.co/rest/v1/profiles");
        assert_eq!(client.url("auth/v1/admin/users"), "https://x.supabase.co/auth/v1/admin/users");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        assert!(BackendClient::new("", "key", Duration::from_secs(5)).is_err());
    }

    #[test]
    fn test_error_message_keys() {
        let status = StatusCode::UNPROCESSABLE_ENTITY;
        assert_eq!(
            error_message(status, r#"{"code":422,"msg":"Email address already registered"}"#),
            "Email address already registered"
        );
        assert_eq!(
            error_message(status, r#"{"message":"duplicate key value"}"#),
            "duplicate key value"
        );
        assert_eq!(
            error_message(status, r#"{"error":"invalid_grant","error_description":"bad"}"#),
            "bad"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "<html>"), "HTTP 502");
        assert_eq!(error_message(status, r#"{"msg":""}"#), "HTTP 422");
    }
}
