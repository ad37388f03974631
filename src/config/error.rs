//! Error types for client construction.

use thiserror::Error;

use crate::transport::HttpError;

use super::defaults;

/// Error type for building a [`Client`](crate::client::Client).
///
/// All of these are raised before any network use.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No token was set and none was found in the environment.
    #[error(
        "No API token configured: set the {} environment variable or call ClientBuilder::with_token. See {}",
        defaults::TOKEN_ENV_VAR,
        defaults::AUTH_DOCS_URL
    )]
    MissingToken,

    /// The token contains characters that cannot be sent in a header.
    #[error("Invalid API token: {0}")]
    InvalidToken(#[source] http::header::InvalidHeaderValue),

    /// The base URL override could not be parsed.
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        /// The rejected URL string
        url: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// The default transport could not be created.
    #[error("Failed to create default transport: {0}")]
    Transport(#[from] HttpError),
}
