//! Immutable view state for the filter panel and the admin form
//!
//! Each state is a plain value; `reduce` consumes it with an action and
//! returns the next state. In-flight flags refuse a second submit until the
//! running action completes.

use serde::Serialize;

use carrier_domain::model::{
    CarrierRecord, FilterCriteria, FilterOutcome, NewUserRequest, ProvisionedAccount,
    RESULT_LIMIT,
};
use carrier_domain::service::{Pagination, ProvisionError, DEFAULT_ITEMS_PER_PAGE};

use super::notification::Notification;

#[derive(Debug, Clone)]
pub enum FilterAction {
    EditCriteria(FilterCriteria),
    Submit,
    Completed(FilterOutcome),
    NextPage,
    PreviousPage,
    GoToPage(usize),
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterViewState {
    pub criteria: FilterCriteria,
    pub results: Vec<CarrierRecord>,
    pub total_count: usize,
    pub loading: bool,
    pub has_searched: bool,
    pub pagination: Pagination,
    pub notification: Option<Notification>,
}

impl Default for FilterViewState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl FilterViewState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            results: Vec::new(),
            total_count: 0,
            loading: false,
            has_searched: false,
            pagination: Pagination::new(0, items_per_page),
            notification: None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    pub fn reduce(self, action: FilterAction) -> Self {
        match action {
            FilterAction::EditCriteria(criteria) => Self { criteria, ..self },
            FilterAction::Submit if self.loading => self,
            FilterAction::Submit => Self {
                loading: true,
                has_searched: true,
                notification: None,
                ..self
            },
            FilterAction::Completed(outcome) => {
                let notification = Some(Notification::for_filter(&outcome));
                let pagination =
                    Pagination::new(outcome.data.len(), self.pagination.items_per_page());
                Self {
                    results: outcome.data,
                    total_count: outcome.count,
                    loading: false,
                    pagination,
                    notification,
                    ..self
                }
            }
            FilterAction::NextPage => Self {
                pagination: self.pagination.next(),
                ..self
            },
            FilterAction::PreviousPage => Self {
                pagination: self.pagination.previous(),
                ..self
            },
            FilterAction::GoToPage(page) => Self {
                pagination: self.pagination.go_to(page),
                ..self
            },
            // An in-flight query still completes into the reset state
            FilterAction::Reset => Self {
                loading: self.loading,
                ..Self::new(self.pagination.items_per_page())
            },
        }
    }

    /// Rows on the current page
    pub fn current_rows(&self) -> &[CarrierRecord] {
        self.pagination.slice(&self.results)
    }

    /// Heading above the results table, e.g. "Results (120 found, showing first 50)"
    pub fn results_heading(&self) -> String {
        if self.total_count > RESULT_LIMIT {
            format!(
                "Results ({} found, showing first {})",
                self.total_count, RESULT_LIMIT
            )
        } else {
            format!("Results ({} found)", self.total_count)
        }
    }
}

#[derive(Debug, Clone)]
pub enum AdminAction {
    Edit(NewUserRequest),
    UseGeneratedPassword(String),
    Submit,
    Completed(Result<ProvisionedAccount, ProvisionError>),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AdminFormState {
    pub request: NewUserRequest,
    pub creating: bool,
    pub notification: Option<Notification>,
    pub last_created: Option<ProvisionedAccount>,
}

impl AdminFormState {
    pub fn can_submit(&self) -> bool {
        !self.creating && self.request.is_complete()
    }

    pub fn reduce(self, action: AdminAction) -> Self {
        match action {
            AdminAction::Edit(request) => Self { request, ..self },
            AdminAction::UseGeneratedPassword(password) => Self {
                request: NewUserRequest {
                    password,
                    ..self.request
                },
                ..self
            },
            AdminAction::Submit if !self.can_submit() => self,
            AdminAction::Submit => Self {
                creating: true,
                notification: None,
                ..self
            },
            AdminAction::Completed(result) => {
                let notification = Notification::for_provisioning(&result, &self.request.username);
                match result {
                    Ok(account) => Self {
                        request: NewUserRequest::default(),
                        creating: false,
                        notification: Some(notification),
                        last_created: Some(account),
                    },
                    Err(_) => Self {
                        creating: false,
                        notification: Some(notification),
                        ..self
                    },
                }
            }
            AdminAction::Clear => Self {
                creating: self.creating,
                ..Self::default()
            },
        }
    }
}
