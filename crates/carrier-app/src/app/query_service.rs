//! Carrier filter action

use tracing::{debug, info, warn};

use carrier_domain::model::{FilterCriteria, FilterOutcome};
use carrier_domain::repository::CarrierSource;
use carrier_types::Error;

use super::notification::UNEXPECTED_FILTER_MESSAGE;
use super::view_state::{FilterAction, FilterViewState};

/// Run `criteria` against `source`, folding any failure into the outcome
pub fn run_filter<S>(source: &S, criteria: &FilterCriteria) -> FilterOutcome
where
    S: CarrierSource + ?Sized,
{
    debug!(source = %source.describe(), ?criteria, "filtering carriers");
    match source.query(criteria) {
        Ok(result) => {
            info!(
                total = result.total_count,
                shown = result.page.len(),
                "filter complete"
            );
            result.into()
        }
        Err(Error::UnexpectedFailure(detail)) => {
            warn!("filter failed unexpectedly: {}", detail);
            FilterOutcome::failed(UNEXPECTED_FILTER_MESSAGE)
        }
        Err(e) => {
            warn!("filter failed: {}", e);
            FilterOutcome::failed(e.user_message())
        }
    }
}

/// Submit the state's criteria and apply the outcome.
///
/// A state that is already loading is returned unchanged.
pub fn submit_filter<S>(state: FilterViewState, source: &S) -> FilterViewState
where
    S: CarrierSource + ?Sized,
{
    if !state.can_submit() {
        return state;
    }
    let state = state.reduce(FilterAction::Submit);
    let outcome = run_filter(source, &state.criteria);
    state.reduce(FilterAction::Completed(outcome))
}
