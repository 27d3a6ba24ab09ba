//! Filter criteria and results

use serde::{Deserialize, Serialize};

use super::carrier::{CarrierOperation, CarrierRecord, ClassDefinition, StateCode};

/// Maximum number of records returned in a filter result page
pub const RESULT_LIMIT: usize = 50;

/// Sparse set of optional predicates over carrier records.
///
/// Text fields hold whatever the user typed; an empty string imposes no
/// constraint, and a value outside the enumeration matches nothing.
/// Numeric minimums of zero or below impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_op: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_power_units: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_total_drivers: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_def: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// A text criterion after normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextConstraint<T> {
    /// No constraint on this field
    Any,
    /// Field must equal this value
    Exactly(T),
    /// The supplied text names no known value, so nothing can match
    Unmatchable,
}

impl<T: Copy + PartialEq> TextConstraint<T> {
    pub fn admits(&self, value: T) -> bool {
        match self {
            TextConstraint::Any => true,
            TextConstraint::Exactly(expected) => *expected == value,
            TextConstraint::Unmatchable => false,
        }
    }
}

fn text_constraint<T: std::str::FromStr>(raw: Option<&str>) -> TextConstraint<T> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => TextConstraint::Any,
        Some(s) => s
            .parse()
            .map_or(TextConstraint::Unmatchable, TextConstraint::Exactly),
    }
}

fn positive_minimum(raw: Option<i64>) -> Option<u32> {
    raw.filter(|n| *n > 0)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
}

impl FilterCriteria {
    /// Criteria with no constraints
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_carrier_op(mut self, op: impl Into<String>) -> Self {
        self.carrier_op = Some(op.into());
        self
    }

    pub fn with_min_power_units(mut self, min: i64) -> Self {
        self.min_power_units = Some(min);
        self
    }

    pub fn with_min_total_drivers(mut self, min: i64) -> Self {
        self.min_total_drivers = Some(min);
        self
    }

    pub fn with_class_def(mut self, class: impl Into<String>) -> Self {
        self.class_def = Some(class.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn carrier_op_constraint(&self) -> TextConstraint<CarrierOperation> {
        text_constraint(self.carrier_op.as_deref())
    }

    pub fn class_def_constraint(&self) -> TextConstraint<ClassDefinition> {
        text_constraint(self.class_def.as_deref())
    }

    pub fn state_constraint(&self) -> TextConstraint<StateCode> {
        text_constraint(self.state.as_deref())
    }

    /// Effective power-unit minimum, `None` when unconstrained
    pub fn power_units_floor(&self) -> Option<u32> {
        positive_minimum(self.min_power_units)
    }

    /// Effective driver minimum, `None` when unconstrained
    pub fn total_drivers_floor(&self) -> Option<u32> {
        positive_minimum(self.min_total_drivers)
    }

    /// True when no field constrains the match set
    pub fn is_unconstrained(&self) -> bool {
        self.carrier_op_constraint() == TextConstraint::Any
            && self.class_def_constraint() == TextConstraint::Any
            && self.state_constraint() == TextConstraint::Any
            && self.power_units_floor().is_none()
            && self.total_drivers_floor().is_none()
    }

    /// True when some text criterion names a value outside its enumeration
    pub fn is_unsatisfiable(&self) -> bool {
        self.carrier_op_constraint() == TextConstraint::Unmatchable
            || self.class_def_constraint() == TextConstraint::Unmatchable
            || self.state_constraint() == TextConstraint::Unmatchable
    }

    /// Resolve the text fields once so a dataset scan does not reparse them
    pub fn compile(&self) -> CarrierPredicate {
        CarrierPredicate {
            carrier_op: self.carrier_op_constraint(),
            min_power_units: self.power_units_floor(),
            min_total_drivers: self.total_drivers_floor(),
            class_def: self.class_def_constraint(),
            state: self.state_constraint(),
        }
    }

    /// Whether a single record satisfies every present predicate
    pub fn matches(&self, record: &CarrierRecord) -> bool {
        self.compile().matches(record)
    }
}

/// Normalized, ready-to-evaluate form of [`FilterCriteria`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarrierPredicate {
    pub carrier_op: TextConstraint<CarrierOperation>,
    pub min_power_units: Option<u32>,
    pub min_total_drivers: Option<u32>,
    pub class_def: TextConstraint<ClassDefinition>,
    pub state: TextConstraint<StateCode>,
}

impl CarrierPredicate {
    pub fn matches(&self, record: &CarrierRecord) -> bool {
        self.carrier_op.admits(record.carrier_op)
            && self
                .min_power_units
                .map_or(true, |min| record.power_units >= min)
            && self
                .min_total_drivers
                .map_or(true, |min| record.total_drivers >= min)
            && self.class_def.admits(record.class_def)
            && self.state.admits(record.state)
    }
}

/// Total match count plus the first page of matches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResult {
    pub total_count: usize,
    pub page: Vec<CarrierRecord>,
}

impl FilterResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether more records matched than fit in the page
    pub fn is_truncated(&self) -> bool {
        self.total_count > self.page.len()
    }
}

/// Filter result or a human-readable error, never both
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOutcome {
    pub count: usize,
    pub data: Vec<CarrierRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FilterOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            count: 0,
            data: Vec::new(),
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl From<FilterResult> for FilterOutcome {
    fn from(result: FilterResult) -> Self {
        Self {
            count: result.total_count,
            data: result.page,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, power_units: u32) -> CarrierRecord {
        CarrierRecord {
            carrier_op: CarrierOperation::Interstate,
            power_units,
            total_drivers: 1,
            class_def: ClassDefinition::Private,
            state: state.parse().unwrap(),
        }
    }

    #[test]
    fn test_blank_text_is_unconstrained() {
        let criteria = FilterCriteria::any().with_state("  ").with_carrier_op("");
        assert!(criteria.is_unconstrained());
        assert!(criteria.matches(&record("WY", 0)));
    }

    #[test]
    fn test_non_positive_minimums_ignored() {
        let criteria = FilterCriteria::any()
            .with_min_power_units(0)
            .with_min_total_drivers(-4);
        assert_eq!(criteria.power_units_floor(), None);
        assert_eq!(criteria.total_drivers_floor(), None);
        assert!(criteria.matches(&record("CA", 0)));
    }

    #[test]
    fn test_unknown_label_matches_nothing() {
        let criteria = FilterCriteria::any().with_state("Atlantis");
        assert!(criteria.is_unsatisfiable());
        assert!(!criteria.matches(&record("CA", 5)));
    }

    #[test]
    fn test_power_units_floor_inclusive() {
        let criteria = FilterCriteria::any().with_min_power_units(5);
        assert!(criteria.matches(&record("CA", 5)));
        assert!(!criteria.matches(&record("CA", 4)));
    }

    #[test]
    fn test_outcome_from_result() {
        let outcome: FilterOutcome = FilterResult {
            total_count: 3,
            page: vec![record("CA", 1)],
        }
        .into();
        assert_eq!(outcome.count, 3);
        assert_eq!(outcome.data.len(), 1);
        assert!(!outcome.is_error());

        let failed = FilterOutcome::failed("Error parsing CSV file");
        assert_eq!(failed.count, 0);
        assert!(failed.data.is_empty());
    }
}
