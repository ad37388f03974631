//! The client and its request dispatcher.

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{ClientBuilder, Config, ConfigError};
use crate::transport::{Body, HttpClient, HttpRequest, ReqwestClient};

use super::error::{ApiError, Error};

/// GET responses reporting success with a body shorter than this many bytes
/// are turned into a 404 [`ApiError`].
///
/// The service answers lookups of missing objects this way instead of with
/// a 404.
pub const NOT_FOUND_BODY_THRESHOLD: usize = 10;

/// Client for the Platform REST API.
///
/// Holds the resolved [`Config`] and the base URL, and nothing mutable: one
/// client can serve any number of concurrent calls as long as its transport
/// can.
///
/// Generated endpoint methods call [`dispatch`](Self::dispatch) or
/// [`dispatch_empty`](Self::dispatch_empty) with their path, verb and
/// payload, and return the result unchanged.
///
/// # Example
///
/// ```no_run
/// use platform_api::client::Client;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new()?;
/// let app: serde_json::Value = client
///     .dispatch(http::Method::GET, "/apps/my-app", None::<&()>)
///     .await?;
/// println!("{app}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client<H = ReqwestClient> {
    config: Config<H>,
    base_url: Url,
}

impl Client {
    /// Creates a client from defaults and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] if the token environment
    /// variable is unset, or another [`ConfigError`] if resolution fails.
    pub fn new() -> Result<Self, ConfigError> {
        ClientBuilder::new().build()
    }

    /// Returns a builder for a customized client.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl<H> Client<H> {
    pub(crate) const fn from_config(config: Config<H>, base_url: Url) -> Self {
        Self { config, base_url }
    }

    /// Returns the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config<H> {
        &self.config
    }

    /// Returns the base URL endpoint paths are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint path against the base URL.
    ///
    /// Absolute `http`/`https` URLs are used as they are.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the result is not a valid URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let raw = if path.starts_with("https://") || path.starts_with("http://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.as_str().trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };

        Url::parse(&raw).map_err(|source| Error::InvalidUrl { url: raw, source })
    }

    /// Builds the outgoing request with the JSON and auth headers set.
    fn build_request(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> HttpRequest {
        let mut request = HttpRequest::new(method, url)
            .with_header(ACCEPT, HeaderValue::from_static("application/json"))
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(authorization) = self.config.authorization() {
            request = request.with_header(AUTHORIZATION, authorization.clone());
        }

        request.body = body;
        request
    }
}

/// What is left of a successful response once the dispatcher is done with it.
enum Payload {
    /// Body already read by the not-found check
    Read(Vec<u8>),
    /// Body not touched yet
    Unread(Body),
}

impl<H: HttpClient> Client<H> {
    /// Sends one API call and decodes the JSON response into `T`.
    ///
    /// `body`, if given, is sent as JSON. Pass `None::<&()>` for calls
    /// without a payload.
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] for any status above 299, or for a GET answered with
    ///   success and a body under [`NOT_FOUND_BODY_THRESHOLD`] bytes
    /// - [`Error::Encode`] if `body` cannot be serialized
    /// - [`Error::Transport`] if no response was received
    /// - [`Error::Body`] if the response body cannot be read
    /// - [`Error::Decode`] if the response body is not a valid `T`
    /// - [`Error::InvalidUrl`] if `path` does not form a valid URL
    pub async fn dispatch<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = match self.send(method, path, body).await? {
            Payload::Read(bytes) => bytes,
            Payload::Unread(body) => body.read_all().await?,
        };

        serde_json::from_slice(&bytes).map_err(Error::Decode)
    }

    /// Sends one API call whose response body is of no interest.
    ///
    /// The body of a successful non-GET response is released unread.
    ///
    /// # Errors
    ///
    /// Same as [`dispatch`](Self::dispatch), except that the response is
    /// never decoded.
    pub async fn dispatch_empty<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, path, body).await.map(drop)
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Payload, Error>
    where
        B: Serialize + ?Sized,
    {
        let encoded = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(Error::Encode)?;
        let url = self.endpoint(path)?;
        let is_get = method == Method::GET;

        let request = self.build_request(method, url, encoded);
        tracing::debug!("Dispatching {} {}", request.method, request.url);

        let response = self.config.transport().request(request).await?;
        tracing::debug!("Received {} for {path}", response.status);

        if response.status.as_u16() > 299 {
            return Err(ApiError::from_response(response).await.into());
        }

        if !is_get {
            return Ok(Payload::Unread(response.body));
        }

        let bytes = response.body.read_all().await?;
        if bytes.len() < NOT_FOUND_BODY_THRESHOLD {
            tracing::debug!(
                "GET {path} returned {} with a {}-byte body, reporting not found",
                response.status,
                bytes.len()
            );
            return Err(ApiError::object_not_found().into());
        }

        Ok(Payload::Read(bytes))
    }
}
