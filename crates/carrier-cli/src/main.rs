//! Carrier Dashboard - motor-carrier filtering and user provisioning
//!
//! A CLI tool that filters a carrier dataset by operation, fleet size, class
//! and state, and creates dashboard user accounts.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use commands::Status;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match commands::execute(cli) {
        Ok(Status::Success) => {}
        Ok(Status::Failed) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
