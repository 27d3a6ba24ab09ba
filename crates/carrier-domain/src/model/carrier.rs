//! Carrier record type definitions

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// The 50 two-letter US state codes, in display order
pub const US_STATES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA",
    "HI", "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME", "MD",
    "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC",
    "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
];

/// A categorical value that is not part of its enumeration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownLabel {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Operation category (CARRIER_OP)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarrierOperation {
    Interstate,
    Intrastate,
}

impl CarrierOperation {
    pub const ALL: [CarrierOperation; 2] = [CarrierOperation::Interstate, CarrierOperation::Intrastate];

    pub fn label(&self) -> &'static str {
        match self {
            CarrierOperation::Interstate => "Interstate",
            CarrierOperation::Intrastate => "Intrastate",
        }
    }
}

impl FromStr for CarrierOperation {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLabel::new("carrier operation", s))
    }
}

impl fmt::Display for CarrierOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Class definition (CLASS_DEF)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassDefinition {
    #[serde(rename = "For-hire")]
    ForHire,
    Private,
}

impl ClassDefinition {
    pub const ALL: [ClassDefinition; 2] = [ClassDefinition::ForHire, ClassDefinition::Private];

    pub fn label(&self) -> &'static str {
        match self {
            ClassDefinition::ForHire => "For-hire",
            ClassDefinition::Private => "Private",
        }
    }
}

impl FromStr for ClassDefinition {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|class| class.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLabel::new("class definition", s))
    }
}

impl fmt::Display for ClassDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the fixed US state codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct StateCode(&'static str);

impl StateCode {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// All state codes in display order
    pub fn all() -> impl Iterator<Item = StateCode> {
        US_STATES.into_iter().map(StateCode)
    }
}

impl FromStr for StateCode {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        US_STATES
            .into_iter()
            .find(|code| code.eq_ignore_ascii_case(s))
            .map(StateCode)
            .ok_or_else(|| UnknownLabel::new("state code", s))
    }
}

impl<'de> Deserialize<'de> for StateCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}

impl From<StateCode> for String {
    fn from(code: StateCode) -> Self {
        code.0.to_string()
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One motor-carrier row of the dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierRecord {
    pub carrier_op: CarrierOperation,
    pub power_units: u32,
    pub total_drivers: u32,
    pub class_def: ClassDefinition,
    pub state: StateCode,
}

/// Coerce a raw numeric cell to a non-negative count.
///
/// Reads an optional sign and the leading run of digits, so `"12.7"` is 12
/// and `"15 units"` is 15. No leading digits gives 0, negatives clamp to 0,
/// and oversized values saturate at `u32::MAX`.
pub fn coerce_count(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() || negative {
        return 0;
    }
    digits.parse::<u64>().map_or(u32::MAX, |n| {
        u32::try_from(n).unwrap_or(u32::MAX)
    })
}
