//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use carrier_app::config::DataSourceKind;
use carrier_domain::model::Role;
use carrier_types::OutputFormat;

#[derive(Parser)]
#[command(name = "carrier-dashboard")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Filter motor-carrier records and provision dashboard users")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter carrier records
    Filter {
        /// Carrier operation (Interstate, Intrastate)
        #[arg(long)]
        op: Option<String>,

        /// Minimum power units (0 or less = no minimum)
        #[arg(long, allow_negative_numbers = true)]
        min_power_units: Option<i64>,

        /// Minimum total drivers (0 or less = no minimum)
        #[arg(long, allow_negative_numbers = true)]
        min_drivers: Option<i64>,

        /// Classification (For-hire, Private)
        #[arg(long)]
        class: Option<String>,

        /// Two-letter state code
        #[arg(long)]
        state: Option<String>,

        /// Page of the results table to show (1-based)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Rows per page. Uses config value if not specified.
        #[arg(long)]
        per_page: Option<usize>,

        /// Dataset source. Uses config value if not specified.
        #[arg(long)]
        source: Option<DataSourceKind>,
    },

    /// Create a dashboard user
    CreateUser {
        /// Username (login email is derived from it)
        #[arg(long)]
        username: String,

        /// Password for the new user
        #[arg(
            long,
            conflicts_with = "generate_password",
            required_unless_present = "generate_password"
        )]
        password: Option<String>,

        /// Generate a random password and print it
        #[arg(long)]
        generate_password: bool,

        /// Full name
        #[arg(long)]
        full_name: Option<String>,

        /// Role
        #[arg(long, value_enum, default_value_t = Role::User)]
        role: Role,
    },

    /// Print a random password
    GeneratePassword,

    /// List the state codes accepted by the filter
    States,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set dataset source
        #[arg(long)]
        set_source: Option<DataSourceKind>,

        /// Set CSV path for the file source
        #[arg(long)]
        set_dataset_path: Option<PathBuf>,

        /// Set CSV URL for the http source
        #[arg(long)]
        set_dataset_url: Option<String>,

        /// Set backend base URL
        #[arg(long)]
        set_backend_url: Option<String>,

        /// Set domain for generated login emails
        #[arg(long)]
        set_email_domain: Option<String>,

        /// Set request timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Set default rows per page
        #[arg(long)]
        set_per_page: Option<usize>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
