//! Default values for client configuration.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Base URL every endpoint path is resolved against.
pub const BASE_URL: &str = "https://api.platform.io/v1";

/// Environment variable read when no token is set explicitly.
pub const TOKEN_ENV_VAR: &str = "PLATFORM_API_TOKEN";

/// Where to learn how to obtain an API token.
pub const AUTH_DOCS_URL: &str = "https://docs.platform.io/api/authentication";

/// Request timeout of the default transport, in seconds.
pub const TIMEOUT_SECS: u64 = 120;

/// Request timeout of the default transport as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
