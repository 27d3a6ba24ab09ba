//! Static CSV dataset fetched over HTTP

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use carrier_domain::model::CarrierRecord;
use carrier_domain::repository::CarrierSource;
use carrier_types::Error;

use super::{http_client, transport_message};
use crate::csv_loader::parse_carriers;

/// Carrier dataset downloaded and parsed on every query
pub struct HttpCsvSource {
    url: String,
    timeout: Duration,
    http: Client,
}

impl HttpCsvSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        Ok(Self {
            url: url.into(),
            timeout,
            http: http_client(timeout)?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CarrierSource for HttpCsvSource {
    fn describe(&self) -> String {
        format!("http {}", self.url)
    }

    fn load_all(&self) -> Result<Vec<CarrierRecord>, Error> {
        debug!(url = %self.url, "fetching carrier dataset");
        let response = self.http.get(&self.url).send().map_err(|e| {
            warn!(url = %self.url, "dataset fetch failed: {}", e);
            Error::DataSourceUnavailable(transport_message(&e, self.timeout))
        })?;

        if !response.status().is_success() {
            warn!(url = %self.url, status = %response.status(), "dataset fetch rejected");
            return Err(Error::DataSourceUnavailable("Failed to fetch CSV file".to_string()));
        }

        let body = response
            .bytes()
            .map_err(|e| Error::DataSourceUnavailable(transport_message(&e, self.timeout)))?;
        let records = parse_carriers(body.as_ref())?;
        info!(count = records.len(), "loaded carrier dataset");
        Ok(records)
    }
}
