//! Output formatting module

use serde::Serialize;

use carrier_app::app::{AdminFormState, FilterViewState, Notification, Severity};
use carrier_domain::model::{CarrierRecord, ProvisionedAccount, StateCode};
use carrier_types::{OutputFormat, Result};

#[derive(Serialize)]
struct FilterReport<'a> {
    total_count: usize,
    returned: usize,
    page: usize,
    total_pages: usize,
    items_per_page: usize,
    summary: String,
    records: &'a [CarrierRecord],
    notification: Option<&'a Notification>,
}

#[derive(Serialize)]
struct ProvisioningReport<'a> {
    account: Option<&'a ProvisionedAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_password: Option<&'a str>,
    notification: Option<&'a Notification>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

/// Destructive notifications go to stderr, the rest to stdout
fn print_notification(notification: &Notification) {
    match notification.severity {
        Severity::Destructive => eprintln!("{}", notification),
        Severity::Success | Severity::Info => println!("{}", notification),
    }
}

pub fn print_filter(output_format: OutputFormat, state: &FilterViewState) -> Result<()> {
    let rows = state.current_rows();

    if output_format == OutputFormat::Json {
        return print_json(&FilterReport {
            total_count: state.total_count,
            returned: state.results.len(),
            page: state.pagination.current_page(),
            total_pages: state.pagination.total_pages(),
            items_per_page: state.pagination.items_per_page(),
            summary: state.pagination.summary(),
            records: rows,
            notification: state.notification.as_ref(),
        });
    }

    if let Some(notification) = &state.notification {
        print_notification(notification);
        if notification.is_destructive() {
            return Ok(());
        }
    }

    if state.results.is_empty() {
        return Ok(());
    }

    println!("\n{}", state.results_heading());
    println!(
        "{:<12} {:>11} {:>13} {:<10} {:<5}",
        "Operation", "Power Units", "Total Drivers", "Class", "State"
    );
    println!("{}", "-".repeat(55));
    for record in rows {
        println!(
            "{:<12} {:>11} {:>13} {:<10} {:<5}",
            record.carrier_op.label(),
            record.power_units,
            record.total_drivers,
            record.class_def.label(),
            record.state
        );
    }
    println!();
    println!(
        "{} (page {} of {})",
        state.pagination.summary(),
        state.pagination.current_page(),
        state.pagination.total_pages().max(1)
    );

    Ok(())
}

pub fn print_provisioning(
    output_format: OutputFormat,
    form: &AdminFormState,
    generated_password: Option<&str>,
) -> Result<()> {
    let account = form.last_created.as_ref();

    if output_format == OutputFormat::Json {
        return print_json(&ProvisioningReport {
            account,
            generated_password: account.and(generated_password),
            notification: form.notification.as_ref(),
        });
    }

    if let Some(notification) = &form.notification {
        print_notification(notification);
    }

    if let Some(account) = account {
        println!("\nUser ID:         {}", account.user_id);
        println!("Login email:     {}", account.email);
        println!("Role:            {}", account.role);
        println!("Created:         {}", account.created_at.to_rfc3339());
        if let Some(password) = generated_password {
            println!("Password:        {}", password);
        }
    }

    Ok(())
}

pub fn print_password(output_format: OutputFormat, password: &str) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&serde_json::json!({ "password": password }));
    }
    println!("{}", password);
    Ok(())
}

pub fn print_states(
    output_format: OutputFormat,
    states: impl Iterator<Item = StateCode>,
) -> Result<()> {
    let codes: Vec<&str> = states.map(|s| s.as_str()).collect();
    if output_format == OutputFormat::Json {
        return print_json(&codes);
    }
    for line in codes.chunks(10) {
        println!("{}", line.join(" "));
    }
    Ok(())
}
