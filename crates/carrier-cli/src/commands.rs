//! Command handlers

use std::path::{Path, PathBuf};

use carrier_app::app::{
    submit_filter, submit_new_user, AdminAction, AdminFormState, FilterAction, FilterViewState,
};
use carrier_app::config::{Config, DataSourceKind};
use carrier_app::repository::{open_carrier_source_as, open_provisioner};
use carrier_domain::model::{FilterCriteria, NewUserRequest, Role, StateCode};
use carrier_domain::service::generate_password;
use carrier_types::{Error, OutputFormat, Result};

use crate::cli::{Cli, Commands};
use crate::output::{print_filter, print_password, print_provisioning, print_states};

/// Whether the requested action succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// The action ran and its failure was already reported
    Failed,
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<Status> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };

    let mut config = Config::load_from(&config_path)?;
    config.apply_env();
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Filter {
            op,
            min_power_units,
            min_drivers,
            class,
            state,
            page,
            per_page,
            source,
        } => {
            let criteria = FilterCriteria {
                carrier_op: op,
                min_power_units,
                min_total_drivers: min_drivers,
                class_def: class,
                state,
            };
            let options = FilterOptions {
                page,
                per_page: per_page.unwrap_or(config.items_per_page),
                source: source.unwrap_or(config.data_source),
            };
            cmd_filter(&config, criteria, options, output_format)
        }

        Commands::CreateUser {
            username,
            password,
            generate_password,
            full_name,
            role,
        } => cmd_create_user(
            &config,
            username,
            password,
            generate_password,
            full_name,
            role,
            output_format,
        ),

        Commands::GeneratePassword => {
            print_password(output_format, &generate_password())?;
            Ok(Status::Success)
        }

        Commands::States => {
            print_states(output_format, StateCode::all())?;
            Ok(Status::Success)
        }

        Commands::Config {
            show,
            set_source,
            set_dataset_path,
            set_dataset_url,
            set_backend_url,
            set_email_domain,
            set_timeout,
            set_per_page,
            set_output,
            reset,
        } => {
            let updates = ConfigUpdates {
                source: set_source,
                dataset_path: set_dataset_path,
                dataset_url: set_dataset_url,
                backend_url: set_backend_url,
                email_domain: set_email_domain,
                timeout: set_timeout,
                per_page: set_per_page,
                output: set_output,
            };
            cmd_config(&config_path, show, updates, reset)?;
            Ok(Status::Success)
        }
    }
}

struct FilterOptions {
    page: usize,
    per_page: usize,
    source: DataSourceKind,
}

fn cmd_filter(
    config: &Config,
    criteria: FilterCriteria,
    options: FilterOptions,
    output_format: OutputFormat,
) -> Result<Status> {
    let source = open_carrier_source_as(config, options.source)?;

    let state = FilterViewState::new(options.per_page).reduce(FilterAction::EditCriteria(criteria));
    let state = submit_filter(state, source.as_ref()).reduce(FilterAction::GoToPage(options.page));

    print_filter(output_format, &state)?;

    Ok(match &state.notification {
        Some(notification) if notification.is_destructive() => Status::Failed,
        _ => Status::Success,
    })
}

fn cmd_create_user(
    config: &Config,
    username: String,
    password: Option<String>,
    generate: bool,
    full_name: Option<String>,
    role: Role,
    output_format: OutputFormat,
) -> Result<Status> {
    let generated = generate.then(generate_password);
    let password = generated.clone().or(password).unwrap_or_default();

    let mut request = NewUserRequest::new(username, password).with_role(role);
    if let Some(full_name) = full_name {
        request = request.with_full_name(full_name);
    }

    let form = AdminFormState::default().reduce(AdminAction::Edit(request));
    if !form.can_submit() {
        return Err(Error::InvalidInput(
            "Username and password are required".to_string(),
        ));
    }

    let provisioner = open_provisioner(config)?;
    let form = submit_new_user(form, &provisioner);

    print_provisioning(output_format, &form, generated.as_deref())?;

    Ok(if form.last_created.is_some() {
        Status::Success
    } else {
        Status::Failed
    })
}

struct ConfigUpdates {
    source: Option<DataSourceKind>,
    dataset_path: Option<PathBuf>,
    dataset_url: Option<String>,
    backend_url: Option<String>,
    email_domain: Option<String>,
    timeout: Option<u64>,
    per_page: Option<usize>,
    output: Option<OutputFormat>,
}

fn cmd_config(config_path: &Path, show: bool, updates: ConfigUpdates, reset: bool) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save_to(config_path)?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    // Reload without env overrides so they are never persisted
    let mut config = Config::load_from(config_path)?;
    let mut modified = false;

    if let Some(source) = updates.source {
        config.data_source = source;
        modified = true;
    }

    if let Some(path) = updates.dataset_path {
        config.dataset_path = path;
        modified = true;
    }

    if let Some(url) = updates.dataset_url {
        config.dataset_url = Some(url);
        modified = true;
    }

    if let Some(url) = updates.backend_url {
        config.backend_url = Some(url);
        modified = true;
    }

    if let Some(domain) = updates.email_domain {
        config.email_domain = domain;
        modified = true;
    }

    if let Some(timeout) = updates.timeout {
        config.request_timeout_secs = timeout;
        modified = true;
    }

    if let Some(per_page) = updates.per_page {
        config.items_per_page = per_page;
        modified = true;
    }

    if let Some(output_format) = updates.output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save_to(config_path)?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
