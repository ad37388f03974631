//! platform-api: raw calls against the Platform REST API
//!
//! Entry point for the platform-api application.

use platform_api::client::Client;
use std::process::ExitCode;

mod app;
mod cli;

use app::{Invocation, build_client, exit_code, print_config_hint, setup_tracing};
use cli::Cli;

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    let invocation = match Invocation::from_cli(&cli) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("Error: {e}");
            return exit_code::CONFIG_ERROR;
        }
    };

    let client = match build_client(&cli) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    run_application(&client, invocation)
}

/// Runs the call on a Tokio runtime and prints the result.
///
/// Excluded from coverage - requires async runtime and network.
#[cfg(not(tarpaulin_include))]
fn run_application(client: &Client, invocation: Invocation) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(app::execute(client, invocation)) {
        Ok(Some(value)) => {
            let rendered =
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            println!("{rendered}");
            exit_code::SUCCESS
        }
        Ok(None) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("Request failed: {e}");
            exit_code::runtime_error()
        }
    }
}
