//! Filter and provisioning flows through the application layer

use std::io::Write;

use carrier_app::app::{
    submit_filter, submit_new_user, AdminAction, AdminFormState, FilterAction, FilterViewState,
    Severity,
};
use carrier_app::config::{Config, DataSourceKind};
use carrier_app::repository::open_carrier_source;
use carrier_domain::model::{FilterCriteria, NewUserRequest, Role};
use carrier_domain::repository::{InMemoryIdentityStore, InMemoryProfileStore, StoreError};
use carrier_domain::service::AccountProvisioner;
use tempfile::NamedTempFile;

/// 120 Texas carriers with 1..=120 power units, plus one Ohio carrier
fn write_dataset() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, " carrier_op , power_units , total_drivers , class_def , state ").unwrap();
    for units in 1..=120 {
        writeln!(file, "Interstate,{},{},For-hire,TX", units, units / 2).unwrap();
    }
    writeln!(file).unwrap();
    writeln!(file, "Intrastate,n/a,3,Private,OH").unwrap();
    file
}

fn file_config(dataset: &NamedTempFile) -> Config {
    Config {
        data_source: DataSourceKind::File,
        dataset_path: dataset.path().to_path_buf(),
        items_per_page: 20,
        ..Config::default()
    }
}

#[test]
fn file_source_caps_page_and_keeps_total() {
    let dataset = write_dataset();
    let config = file_config(&dataset);
    let source = open_carrier_source(&config).unwrap();

    let state = FilterViewState::new(config.items_per_page)
        .reduce(FilterAction::EditCriteria(FilterCriteria::any().with_state("tx")));
    let state = submit_filter(state, source.as_ref());

    assert_eq!(state.total_count, 120);
    assert_eq!(state.results.len(), 50);
    assert_eq!(state.results[0].power_units, 1);
    assert_eq!(state.pagination.total_pages(), 3);
    assert_eq!(
        state.notification.as_ref().unwrap().message,
        "Found 120 carriers (showing first 50)"
    );

    let state = state.reduce(FilterAction::NextPage).reduce(FilterAction::NextPage);
    assert_eq!(state.pagination.summary(), "Showing 41 to 50 of 50 results");
    let state = state.reduce(FilterAction::NextPage);
    assert_eq!(state.pagination.current_page(), 3);
}

#[test]
fn unparsable_counts_are_zero_not_dropped() {
    let dataset = write_dataset();
    let source = open_carrier_source(&file_config(&dataset)).unwrap();

    let state = FilterViewState::default()
        .reduce(FilterAction::EditCriteria(FilterCriteria::any().with_state("OH")));
    let state = submit_filter(state, source.as_ref());
    assert_eq!(state.total_count, 1);
    assert_eq!(state.results[0].power_units, 0);

    let state = state
        .reduce(FilterAction::EditCriteria(
            FilterCriteria::any().with_state("OH").with_min_power_units(1),
        ));
    let state = submit_filter(state, source.as_ref());
    assert_eq!(state.total_count, 0);
    let notification = state.notification.unwrap();
    assert_eq!(notification.title, "No Results");
    assert_eq!(notification.severity, Severity::Info);
}

#[test]
fn missing_dataset_becomes_error_notification() {
    let config = Config {
        dataset_path: std::env::temp_dir().join("carrier-dashboard-absent.csv"),
        ..Config::default()
    };
    let source = open_carrier_source(&config).unwrap();
    let state = submit_filter(FilterViewState::default(), source.as_ref());

    assert!(state.results.is_empty());
    assert_eq!(state.total_count, 0);
    let notification = state.notification.unwrap();
    assert_eq!(notification.title, "Error");
    assert!(notification.message.starts_with("Dataset file not found"));
}

#[test]
fn profile_failure_rolls_back_credential() {
    let identity = InMemoryIdentityStore::new();
    let profiles = InMemoryProfileStore::failing_with(StoreError::Rejected(
        "new row violates row-level security policy".to_string(),
    ));
    let provisioner = AccountProvisioner::new(&identity, &profiles);

    let form = AdminFormState::default().reduce(AdminAction::Edit(
        NewUserRequest::new("Fleet Admin", "Secret!23").with_role(Role::Admin),
    ));
    let form = submit_new_user(form, &provisioner);

    let created = identity.deleted();
    assert_eq!(created.len(), 1);
    assert!(identity.credentials().is_empty());
    assert_eq!(form.request.username, "Fleet Admin");
    let notification = form.notification.unwrap();
    assert_eq!(notification.title, "Error Creating Profile");
    assert_eq!(notification.message, "new row violates row-level security policy");
}

#[test]
fn duplicate_username_is_identity_failure() {
    let identity = InMemoryIdentityStore::new();
    let profiles = InMemoryProfileStore::new();
    let provisioner =
        AccountProvisioner::new(&identity, &profiles).with_email_domain("fleet.test");

    let request = NewUserRequest::new("Dispatch One", "pw");
    let first = submit_new_user(
        AdminFormState::default().reduce(AdminAction::Edit(request.clone())),
        &provisioner,
    );
    assert_eq!(
        first.last_created.unwrap().email,
        "dispatchone@fleet.test"
    );

    let second = submit_new_user(
        AdminFormState::default().reduce(AdminAction::Edit(NewUserRequest::new("dispatch one", "pw"))),
        &provisioner,
    );
    assert_eq!(second.notification.unwrap().title, "Error Creating User");
    assert_eq!(profiles.profiles().len(), 1);
}

#[test]
fn unrecognised_rows_do_not_fail_unfiltered_queries() {
    let mut dataset = NamedTempFile::new().unwrap();
    writeln!(dataset, "CARRIER_OP,POWER_UNITS,TOTAL_DRIVERS,CLASS_DEF,STATE").unwrap();
    writeln!(dataset, "Interstate,4,4,For-hire,DC").unwrap();
    writeln!(dataset, "Interstate,5,5,For-hire,MD").unwrap();
    let source = open_carrier_source(&file_config(&dataset)).unwrap();

    let state = submit_filter(FilterViewState::default(), source.as_ref());
    assert_eq!(state.total_count, 1);
    assert_eq!(state.results[0].state.as_str(), "MD");
    assert_eq!(state.notification.unwrap().title, "Success");
}
