//! File-based implementation of CarrierSource

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use carrier_domain::model::CarrierRecord;
use carrier_domain::repository::CarrierSource;
use carrier_types::Error;

use crate::csv_loader::load_carriers;

/// Carrier dataset read from a CSV file on every query
pub struct FileCarrierSource {
    csv_path: PathBuf,
}

impl FileCarrierSource {
    pub fn new(csv_path: PathBuf) -> Self {
        Self { csv_path }
    }

    /// Get the CSV path
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

impl CarrierSource for FileCarrierSource {
    fn describe(&self) -> String {
        format!("file {}", self.csv_path.display())
    }

    fn load_all(&self) -> Result<Vec<CarrierRecord>, Error> {
        if !self.csv_path.exists() {
            return Err(Error::DataSourceUnavailable(format!(
                "Dataset file not found: {}",
                self.csv_path.display()
            )));
        }
        debug!(path = %self.csv_path.display(), "loading carrier dataset");
        let records = load_carriers(&self.csv_path)?;
        info!(count = records.len(), "loaded carrier dataset");
        Ok(records)
    }
}
