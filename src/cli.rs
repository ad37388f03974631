//! CLI argument parsing using clap.

use clap::Parser;

/// platform-api: issue one raw call against the Platform REST API
///
/// Resolves the path against the API base URL, sends the request through the
/// same dispatcher the generated endpoint methods use, and prints the JSON
/// response.
#[derive(Debug, Parser)]
#[command(name = "platform-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Endpoint path, relative to the base URL (e.g. /apps)
    pub path: String,

    /// HTTP method
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// JSON request body
    #[arg(long, short)]
    pub data: Option<String>,

    /// API token (defaults to the PLATFORM_API_TOKEN environment variable)
    #[arg(long)]
    pub token: Option<String>,

    /// Base URL override
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Do not read or print the response body
    #[arg(long = "no-output")]
    pub no_output: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
