//! Client construction: overrides, defaults, then validation.

use std::fmt;
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use crate::client::Client;
use crate::transport::{HttpClient, ReqwestClient};

use super::defaults;
use super::env::{Environment, ProcessEnvironment};
use super::error::ConfigError;

/// Resolved, immutable client configuration.
///
/// Holds the API token (if any), the pre-built `Authorization` header value
/// derived from it, and the transport every request goes through.
#[derive(Clone)]
pub struct Config<H> {
    token: Option<String>,
    authorization: Option<HeaderValue>,
    transport: H,
}

impl<H> Config<H> {
    /// Returns the API token, if one was configured.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the `Authorization` header value sent with every request.
    #[must_use]
    pub const fn authorization(&self) -> Option<&HeaderValue> {
        self.authorization.as_ref()
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &H {
        &self.transport
    }
}

impl<H: fmt::Debug> fmt::Debug for Config<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("transport", &self.transport)
            .finish()
    }
}

/// Transport slot of a [`ClientBuilder`] that no override has filled.
///
/// Resolves to a [`ReqwestClient`] bounded by the builder's timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTransport;

/// Transport slot filled by [`ClientBuilder::with_transport`].
#[derive(Debug)]
pub struct CustomTransport<H>(H);

/// Turns a builder's transport slot into the transport the client will use.
pub trait TransportSlot {
    /// The resolved transport type.
    type Transport: HttpClient;

    /// Resolves the slot, creating the default transport if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the default transport cannot be created.
    fn resolve(self, timeout: Duration) -> Result<Self::Transport, ConfigError>;
}

impl TransportSlot for DefaultTransport {
    type Transport = ReqwestClient;

    fn resolve(self, timeout: Duration) -> Result<ReqwestClient, ConfigError> {
        Ok(ReqwestClient::with_timeout(timeout)?)
    }
}

impl<H: HttpClient> TransportSlot for CustomTransport<H> {
    type Transport = H;

    fn resolve(self, _timeout: Duration) -> Result<H, ConfigError> {
        Ok(self.0)
    }
}

/// Builder for [`Client`].
///
/// Overrides apply in call order; [`build`](Self::build) then fills in what
/// is still missing and validates the result:
///
/// 1. Apply overrides (`with_*` calls)
/// 2. No transport set: use a [`ReqwestClient`] with the configured timeout
///    (default: [`defaults::TIMEOUT_SECS`])
/// 3. No token set: read [`defaults::TOKEN_ENV_VAR`] from the environment
/// 4. Still no token: fail, unless the transport is a test double
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use platform_api::config::ClientBuilder;
/// use platform_api::transport::MockTransport;
///
/// let client = ClientBuilder::new()
///     .with_environment(HashMap::<String, String>::new())
///     .with_transport(MockTransport::new())
///     .build()
///     .unwrap();
/// assert!(client.config().token().is_none());
/// ```
pub struct ClientBuilder<T = DefaultTransport> {
    token: Option<String>,
    transport: T,
    environment: Box<dyn Environment>,
    base_url: Option<String>,
    timeout: Duration,
}

impl ClientBuilder {
    /// Creates a builder with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: None,
            transport: DefaultTransport,
            environment: Box::new(ProcessEnvironment),
            base_url: None,
            timeout: defaults::timeout(),
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ClientBuilder<T> {
    /// Sets the API token explicitly.
    ///
    /// An empty token counts as unset.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the transport, replacing the default one.
    #[must_use]
    pub fn with_transport<H: HttpClient>(self, transport: H) -> ClientBuilder<CustomTransport<H>> {
        ClientBuilder {
            token: self.token,
            transport: CustomTransport(transport),
            environment: self.environment,
            base_url: self.base_url,
            timeout: self.timeout,
        }
    }

    /// Sets the environment the token is looked up in.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Box::new(environment);
        self
    }

    /// Overrides the base URL endpoint paths are resolved against.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout of the default transport.
    ///
    /// Has no effect when a transport is set with [`with_transport`](Self::with_transport).
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl<T: TransportSlot> ClientBuilder<T> {
    /// Resolves the configuration and creates the client.
    ///
    /// Reads the environment; performs no network I/O.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingToken`] if no token is available and the
    ///   transport is not a test double
    /// - [`ConfigError::InvalidToken`] if the token cannot be sent in a header
    /// - [`ConfigError::InvalidBaseUrl`] if the base URL override does not parse
    /// - [`ConfigError::Transport`] if the default transport cannot be created
    pub fn build(self) -> Result<Client<T::Transport>, ConfigError> {
        let transport = self.transport.resolve(self.timeout)?;

        let token = match self.token.filter(|t| !t.is_empty()) {
            Some(token) => Some(token),
            None => {
                let token = self
                    .environment
                    .var(defaults::TOKEN_ENV_VAR)
                    .filter(|t| !t.is_empty());
                if token.is_some() {
                    tracing::debug!("Using API token from {}", defaults::TOKEN_ENV_VAR);
                }
                token
            }
        };

        if token.is_none() && !transport.is_test_double() {
            return Err(ConfigError::MissingToken);
        }

        let authorization = token.as_deref().map(bearer).transpose()?;
        let base_url = parse_base_url(self.base_url.as_deref().unwrap_or(defaults::BASE_URL))?;

        let config = Config {
            token,
            authorization,
            transport,
        };

        Ok(Client::from_config(config, base_url))
    }
}

impl<T: fmt::Debug> fmt::Debug for ClientBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("transport", &self.transport)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Builds the sensitive `Authorization: Bearer <token>` header value.
fn bearer(token: &str) -> Result<HeaderValue, ConfigError> {
    let mut value =
        HeaderValue::from_str(&format!("Bearer {token}")).map_err(ConfigError::InvalidToken)?;
    value.set_sensitive(true);
    Ok(value)
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })
}
