//! Carrier filter engine

use tracing::debug;

use crate::model::{CarrierRecord, FilterCriteria, FilterResult, RESULT_LIMIT};

/// Select the records matching `criteria`.
///
/// Predicates are ANDed and source order is kept. `total_count` counts every
/// match; `page` holds at most [`RESULT_LIMIT`] of them.
pub fn filter_carriers(dataset: &[CarrierRecord], criteria: &FilterCriteria) -> FilterResult {
    let predicate = criteria.compile();
    let mut total_count = 0;
    let mut page = Vec::with_capacity(RESULT_LIMIT.min(dataset.len()));

    for record in dataset.iter().filter(|r| predicate.matches(r)) {
        total_count += 1;
        if page.len() < RESULT_LIMIT {
            page.push(record.clone());
        }
    }

    debug!(
        scanned = dataset.len(),
        matched = total_count,
        returned = page.len(),
        "filtered carriers"
    );

    FilterResult { total_count, page }
}

/// Number of records matching `criteria`, without building a page
pub fn count_matching(dataset: &[CarrierRecord], criteria: &FilterCriteria) -> usize {
    let predicate = criteria.compile();
    dataset.iter().filter(|r| predicate.matches(r)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CarrierOperation, ClassDefinition};

    fn record(
        op: CarrierOperation,
        power_units: u32,
        total_drivers: u32,
        class_def: ClassDefinition,
        state: &str,
    ) -> CarrierRecord {
        CarrierRecord {
            carrier_op: op,
            power_units,
            total_drivers,
            class_def,
            state: state.parse().unwrap(),
        }
    }

    fn two_carriers() -> Vec<CarrierRecord> {
        vec![
            record(CarrierOperation::Interstate, 5, 2, ClassDefinition::ForHire, "CA"),
            record(CarrierOperation::Intrastate, 10, 20, ClassDefinition::Private, "TX"),
        ]
    }

    fn many(n: u32) -> Vec<CarrierRecord> {
        (0..n)
            .map(|i| record(CarrierOperation::Interstate, i, i % 7, ClassDefinition::ForHire, "OH"))
            .collect()
    }

    #[test]
    fn test_state_scenario() {
        let dataset = two_carriers();
        let result = filter_carriers(&dataset, &FilterCriteria::any().with_state("CA"));
        assert_eq!(result.total_count, 1);
        assert_eq!(result.page, vec![dataset[0].clone()]);
    }

    #[test]
    fn test_state_case_insensitive() {
        let dataset = two_carriers();
        let lower = filter_carriers(&dataset, &FilterCriteria::any().with_state("ca"));
        let upper = filter_carriers(&dataset, &FilterCriteria::any().with_state("CA"));
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_no_criteria_counts_everything_and_caps_page() {
        let dataset = many(75);
        let result = filter_carriers(&dataset, &FilterCriteria::any());
        assert_eq!(result.total_count, 75);
        assert_eq!(result.page.len(), 50);
        assert_eq!(result.page[..], dataset[..50]);
        assert!(result.is_truncated());
    }

    #[test]
    fn test_empty_dataset() {
        let result = filter_carriers(&[], &FilterCriteria::any().with_state("CA"));
        assert_eq!(result, FilterResult::empty());
    }

    #[test]
    fn test_minimums_are_inclusive() {
        let dataset = two_carriers();
        let result = filter_carriers(
            &dataset,
            &FilterCriteria::any().with_min_power_units(5).with_min_total_drivers(2),
        );
        assert_eq!(result.total_count, 2);

        let result = filter_carriers(&dataset, &FilterCriteria::any().with_min_power_units(6));
        assert_eq!(result.page, vec![dataset[1].clone()]);
    }

    #[test]
    fn test_zero_minimum_is_no_constraint() {
        let mut dataset = two_carriers();
        dataset.push(record(CarrierOperation::Interstate, 0, 0, ClassDefinition::Private, "NY"));
        let result = filter_carriers(&dataset, &FilterCriteria::any().with_min_power_units(0));
        assert_eq!(result.total_count, 3);
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let dataset = two_carriers();
        let criteria = FilterCriteria::any()
            .with_carrier_op("intrastate")
            .with_class_def("PRIVATE")
            .with_state("tx");
        assert_eq!(filter_carriers(&dataset, &criteria).total_count, 1);

        let criteria = FilterCriteria::any().with_carrier_op("Interstate").with_state("TX");
        assert_eq!(filter_carriers(&dataset, &criteria).total_count, 0);
    }

    #[test]
    fn test_source_order_preserved() {
        let dataset = many(60);
        let criteria = FilterCriteria::any().with_min_total_drivers(3);
        let result = filter_carriers(&dataset, &criteria);
        let expected: Vec<_> = dataset
            .iter()
            .filter(|r| r.total_drivers >= 3)
            .take(RESULT_LIMIT)
            .cloned()
            .collect();
        assert_eq!(result.page, expected);
        assert_eq!(result.total_count, count_matching(&dataset, &criteria));
    }

    #[test]
    fn test_page_length_invariant() {
        let dataset = many(130);
        for min in [0, 1, 40, 80, 100, 129, 130] {
            let criteria = FilterCriteria::any().with_min_power_units(min);
            let result = filter_carriers(&dataset, &criteria);
            assert_eq!(
                result.page.len(),
                count_matching(&dataset, &criteria).min(RESULT_LIMIT)
            );
        }
    }

    #[test]
    fn test_idempotent() {
        let dataset = many(80);
        let criteria = FilterCriteria::any().with_min_total_drivers(2);
        assert_eq!(
            filter_carriers(&dataset, &criteria),
            filter_carriers(&dataset, &criteria)
        );
    }
}
