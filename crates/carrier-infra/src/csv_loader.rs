//! CSV loader for the carrier dataset
//!
//! Header names are trimmed and upper-cased before lookup, so `carrier_op`
//! and ` Carrier_Op ` both resolve to `CARRIER_OP`. Extra columns are
//! ignored and column order does not matter. Rows carrying an operation,
//! class or state outside the known values are skipped with a warning.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use carrier_domain::model::{coerce_count, CarrierRecord, UnknownLabel};

/// Columns every dataset must provide
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "CARRIER_OP",
    "POWER_UNITS",
    "TOTAL_DRIVERS",
    "CLASS_DEF",
    "STATE",
];

#[derive(Error, Debug)]
pub enum CsvLoaderError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Invalid value in row {row}, column {column}: {source}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        source: UnknownLabel,
    },
}

impl From<CsvLoaderError> for carrier_types::Error {
    fn from(err: CsvLoaderError) -> Self {
        match err {
            CsvLoaderError::IoError(e) => {
                carrier_types::Error::DataSourceUnavailable(format!("Failed to read dataset: {}", e))
            }
            other => carrier_types::Error::ParseFailure(other.to_string()),
        }
    }
}

/// Positions of the required columns in the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    carrier_op: usize,
    power_units: usize,
    total_drivers: usize,
    class_def: usize,
    state: usize,
}

impl ColumnIndex {
    fn locate(headers: &csv::StringRecord) -> Result<Self, CsvLoaderError> {
        let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_uppercase()).collect();
        let find = |name: &'static str| {
            normalized
                .iter()
                .position(|h| h == name)
                .ok_or(CsvLoaderError::MissingColumn(name))
        };
        Ok(Self {
            carrier_op: find("CARRIER_OP")?,
            power_units: find("POWER_UNITS")?,
            total_drivers: find("TOTAL_DRIVERS")?,
            class_def: find("CLASS_DEF")?,
            state: find("STATE")?,
        })
    }
}

/// Load carrier records from a CSV file
pub fn load_carriers<P: AsRef<Path>>(path: P) -> Result<Vec<CarrierRecord>, CsvLoaderError> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    parse_carriers(bytes.as_slice())
}

/// Parse carrier records from CSV text with a header row.
///
/// Completely empty input is an empty dataset. Rows whose field count
/// differs from the header are rejected; rows with unrecognised labels are
/// left out.
pub fn parse_carriers<R: Read>(input: R) -> Result<Vec<CarrierRecord>, CsvLoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Ok(Vec::new());
    }
    let columns = ColumnIndex::locate(&headers)?;

    let mut carriers = Vec::new();
    let mut skipped = 0usize;
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row_num = row_idx + 2; // header is row 1
        match parse_record(&record, &columns, row_num) {
            Ok(carrier) => carriers.push(carrier),
            Err(CsvLoaderError::InvalidValue { row, column, source }) => {
                debug!(row, column, "skipping row: {}", source);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if skipped > 0 {
        warn!(skipped, kept = carriers.len(), "skipped rows with unrecognised values");
    }
    Ok(carriers)
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &ColumnIndex,
    row: usize,
) -> Result<CarrierRecord, CsvLoaderError> {
    let cell = |idx: usize| record.get(idx).unwrap_or("");

    Ok(CarrierRecord {
        carrier_op: parse_label(cell(columns.carrier_op), row, "CARRIER_OP")?,
        power_units: coerce_count(cell(columns.power_units)),
        total_drivers: coerce_count(cell(columns.total_drivers)),
        class_def: parse_label(cell(columns.class_def), row, "CLASS_DEF")?,
        state: parse_label(cell(columns.state), row, "STATE")?,
    })
}

fn parse_label<T>(value: &str, row: usize, column: &'static str) -> Result<T, CsvLoaderError>
where
    T: std::str::FromStr<Err = UnknownLabel>,
{
    value
        .parse()
        .map_err(|source| CsvLoaderError::InvalidValue { row, column, source })
}
