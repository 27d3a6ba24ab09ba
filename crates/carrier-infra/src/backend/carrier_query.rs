//! Server-side carrier filtering through the backend's table API
//!
//! Criteria are translated into PostgREST filters that reproduce the
//! in-memory semantics: text criteria are resolved to their canonical label
//! first and sent as `ilike` without wildcards (case-insensitive equality),
//! minimums above zero as `gte`. The exact total comes from the
//! `Content-Range` header, so only the capped page crosses the wire.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use carrier_domain::model::{
    coerce_count, CarrierRecord, FilterCriteria, FilterResult, TextConstraint, UnknownLabel,
    RESULT_LIMIT,
};
use carrier_domain::repository::CarrierSource;
use carrier_types::Error;

use super::{error_message, transport_message, BackendClient};

const SELECT_COLUMNS: &str = "carrier_op,power_units,total_drivers,class_def,state";

/// Row shape returned by the backend (lowercase keys)
#[derive(Debug, Deserialize)]
struct CarrierRow {
    #[serde(default)]
    carrier_op: Option<String>,
    #[serde(default)]
    power_units: Value,
    #[serde(default)]
    total_drivers: Value,
    #[serde(default)]
    class_def: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

impl CarrierRow {
    /// Normalize to a record; a missing or unrecognised label is an error
    /// naming the offending value
    fn into_record(self) -> Result<CarrierRecord, UnknownLabel> {
        fn label<T>(value: Option<String>) -> Result<T, UnknownLabel>
        where
            T: std::str::FromStr<Err = UnknownLabel>,
        {
            value.unwrap_or_default().parse()
        }

        Ok(CarrierRecord {
            carrier_op: label(self.carrier_op)?,
            power_units: numeric_count(&self.power_units),
            total_drivers: numeric_count(&self.total_drivers),
            class_def: label(self.class_def)?,
            state: label(self.state)?,
        })
    }
}

/// Coerce a JSON cell to a count with the same rules as the CSV path
fn numeric_count(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                u32::try_from(i.max(0)).unwrap_or(u32::MAX)
            } else if let Some(u) = n.as_u64() {
                u32::try_from(u).unwrap_or(u32::MAX)
            } else {
                n.as_f64().map_or(0, |f| f.max(0.0).min(u32::MAX as f64) as u32)
            }
        }
        Value::String(s) => coerce_count(s),
        _ => 0,
    }
}

/// Build the PostgREST query parameters for `criteria`.
///
/// Returns `None` when a text criterion names no known value, in which case
/// nothing can match and no request is needed.
fn query_params(criteria: &FilterCriteria, limit: Option<usize>) -> Option<Vec<(String, String)>> {
    let mut params = vec![("select".to_string(), SELECT_COLUMNS.to_string())];

    fn text<T: std::fmt::Display>(
        params: &mut Vec<(String, String)>,
        column: &str,
        constraint: TextConstraint<T>,
    ) -> Option<()> {
        match constraint {
            TextConstraint::Any => Some(()),
            TextConstraint::Exactly(value) => {
                params.push((column.to_string(), format!("ilike.{}", value)));
                Some(())
            }
            TextConstraint::Unmatchable => None,
        }
    }

    text(&mut params, "carrier_op", criteria.carrier_op_constraint())?;
    if let Some(min) = criteria.power_units_floor() {
        params.push(("power_units".to_string(), format!("gte.{}", min)));
    }
    if let Some(min) = criteria.total_drivers_floor() {
        params.push(("total_drivers".to_string(), format!("gte.{}", min)));
    }
    text(&mut params, "class_def", criteria.class_def_constraint())?;
    text(&mut params, "state", criteria.state_constraint())?;

    if let Some(limit) = limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    Some(params)
}

/// Total from a `Content-Range` header such as `0-49/1234` or `*/0`
fn total_from_content_range(header: &str) -> Option<usize> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}

/// Carrier table queried with server-side filtering
pub struct RestCarrierSource {
    client: BackendClient,
    table: String,
}

impl RestCarrierSource {
    pub fn new(client: BackendClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    fn path(&self) -> String {
        format!("rest/v1/{}", self.table)
    }

    fn fetch(
        &self,
        params: &[(String, String)],
        count: bool,
    ) -> Result<(Vec<CarrierRecord>, Option<usize>), Error> {
        let mut request = self.client.get(&self.path()).query(params);
        if count {
            request = request.header("Prefer", "count=exact");
        }
        debug!(table = %self.table, ?params, "querying carrier table");

        let response = request.send().map_err(|e| {
            Error::DataSourceUnavailable(transport_message(&e, self.client.timeout()))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::DataSourceUnavailable(error_message(status, &body)));
        }

        let total = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(total_from_content_range);

        let rows: Vec<CarrierRow> = response
            .json()
            .map_err(|e| Error::ParseFailure(format!("Unreadable carrier rows: {}", e)))?;
        let returned = rows.len();
        let records: Vec<CarrierRecord> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(i, row)| match row.into_record() {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(row = i + 1, "skipping row: {}", e);
                    None
                }
            })
            .collect();
        if records.len() < returned {
            warn!(
                skipped = returned - records.len(),
                kept = records.len(),
                "skipped rows with unrecognised values"
            );
        }

        Ok((records, total))
    }
}

impl CarrierSource for RestCarrierSource {
    fn describe(&self) -> String {
        format!("backend {}/{}", self.client.base_url(), self.path())
    }

    fn load_all(&self) -> Result<Vec<CarrierRecord>, Error> {
        let params = vec![("select".to_string(), SELECT_COLUMNS.to_string())];
        let (records, _) = self.fetch(&params, false)?;
        Ok(records)
    }

    fn query(&self, criteria: &FilterCriteria) -> Result<FilterResult, Error> {
        let Some(params) = query_params(criteria, Some(RESULT_LIMIT)) else {
            debug!("criteria name an unknown value, skipping backend query");
            return Ok(FilterResult::empty());
        };

        let (mut page, total) = self.fetch(&params, true)?;
        page.truncate(RESULT_LIMIT);
        let total_count = match total {
            Some(total) => total.max(page.len()),
            None => {
                warn!("backend omitted Content-Range, total limited to returned rows");
                page.len()
            }
        };

        info!(total = total_count, returned = page.len(), "backend filter complete");
        Ok(FilterResult { total_count, page })
    }
}
