//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, client construction from
//! CLI arguments, and the single call the binary performs.

use std::time::Duration;

use http::Method;
use platform_api::client::{Client, Error};
use platform_api::config::{ClientBuilder, ConfigError, defaults};
use platform_api::transport::HttpClient;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - missing token, bad arguments, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - network failure, API error, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Invalid command-line input, detected before any client is built.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    /// The method is not a valid HTTP method.
    #[error("Invalid HTTP method '{0}'")]
    InvalidMethod(String),

    /// The request body is not valid JSON.
    #[error("Invalid JSON in --data: {0}")]
    InvalidData(#[source] serde_json::Error),
}

/// One API call, parsed from the command line.
#[derive(Debug)]
pub struct Invocation {
    /// HTTP method
    pub method: Method,
    /// Endpoint path or absolute URL
    pub path: String,
    /// Request payload
    pub body: Option<serde_json::Value>,
    /// Whether to decode and print the response
    pub wants_output: bool,
}

impl Invocation {
    /// Parses and validates the call described by `cli`.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError`] for an unknown method or malformed JSON body.
    pub fn from_cli(cli: &Cli) -> Result<Self, UsageError> {
        let method = Method::from_bytes(cli.method.to_ascii_uppercase().as_bytes())
            .map_err(|_| UsageError::InvalidMethod(cli.method.clone()))?;

        let body = cli
            .data
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(UsageError::InvalidData)?;

        Ok(Self {
            method,
            path: cli.path.clone(),
            body,
            wants_output: !cli.no_output,
        })
    }
}

/// Builds the client from CLI overrides, the environment and defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] if the client cannot be built.
pub fn build_client(cli: &Cli) -> Result<Client, ConfigError> {
    let mut builder = ClientBuilder::new();

    if let Some(token) = &cli.token {
        builder = builder.with_token(token);
    }
    if let Some(base_url) = &cli.base_url {
        builder = builder.with_base_url(base_url);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.with_timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Performs the call, returning the decoded response when one is wanted.
///
/// # Errors
///
/// Returns the dispatcher's [`Error`] unchanged.
pub async fn execute<H: HttpClient>(
    client: &Client<H>,
    invocation: Invocation,
) -> Result<Option<serde_json::Value>, Error> {
    let Invocation {
        method,
        path,
        body,
        wants_output,
    } = invocation;

    if wants_output {
        client.dispatch(method, &path, body.as_ref()).await.map(Some)
    } else {
        client
            .dispatch_empty(method, &path, body.as_ref())
            .await
            .map(|()| None)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    if matches!(error, ConfigError::MissingToken) {
        eprintln!(
            "\nPass --token or export {}=<token>.",
            defaults::TOKEN_ENV_VAR
        );
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
