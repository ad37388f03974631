//! HTTP request/response types and client trait.

use std::fmt;

use super::{BodyError, HttpError};

/// An HTTP request to be sent.
///
/// This is a value type that can be constructed and passed to any
/// [`HttpClient`] implementation. It uses standard `http` crate types
/// for method and headers, ensuring compatibility with the broader ecosystem.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a new HTTP request with the given method and URL.
    ///
    /// Headers are initialized to an empty map and body is `None`.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a GET request to the given URL.
    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::new(http::Method::GET, url)
    }

    /// Creates a POST request to the given URL.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self::new(http::Method::POST, url)
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header, replacing any previous values under the same name.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// The body of an [`HttpResponse`].
///
/// A body is consumed by value, so it can be read at most once; dropping an
/// unread body releases the underlying connection.
pub struct Body {
    kind: BodyKind,
}

enum BodyKind {
    Buffered(Vec<u8>),
    Streaming(reqwest::Response),
    Failing(String),
}

impl Body {
    /// Creates an empty body.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            kind: BodyKind::Buffered(Vec::new()),
        }
    }

    /// Creates a body whose read always fails with the given reason.
    ///
    /// Lets test transports simulate a connection dropping mid-body.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            kind: BodyKind::Failing(reason.into()),
        }
    }

    /// Wraps a live reqwest response whose body has not been read yet.
    pub(super) const fn streaming(response: reqwest::Response) -> Self {
        Self {
            kind: BodyKind::Streaming(response),
        }
    }

    /// Reads the whole body into memory.
    ///
    /// # Errors
    ///
    /// Returns [`BodyError::Read`] if the body stream fails before its end.
    pub async fn read_all(self) -> Result<Vec<u8>, BodyError> {
        match self.kind {
            BodyKind::Buffered(bytes) => Ok(bytes),
            BodyKind::Streaming(response) => response
                .bytes()
                .await
                .map(|bytes| bytes.to_vec())
                .map_err(|e| BodyError::Read(Box::new(e))),
            BodyKind::Failing(reason) => Err(BodyError::read(reason)),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            kind: BodyKind::Buffered(bytes),
        }
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::from(text.into_bytes())
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            BodyKind::Buffered(bytes) => f.debug_tuple("Body::Buffered").field(&bytes.len()).finish(),
            BodyKind::Streaming(_) => f.write_str("Body::Streaming"),
            BodyKind::Failing(reason) => f.debug_tuple("Body::Failing").field(reason).finish(),
        }
    }
}

/// An HTTP response received from a server.
///
/// Contains the status, headers, and a not-yet-consumed body.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Status-line text, when it differs from the canonical reason phrase
    pub reason: Option<String>,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body
    pub body: Body,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub fn new(status: http::StatusCode, headers: http::HeaderMap, body: impl Into<Body>) -> Self {
        Self {
            status,
            reason: None,
            headers,
            body: body.into(),
        }
    }

    /// Sets the status-line text.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the status-line text: the explicit reason if set,
    /// otherwise the canonical reason phrase.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason
            .as_deref()
            .or_else(|| self.status.canonical_reason())
    }
}

/// Trait for making HTTP requests.
///
/// This is the transport capability the dispatcher sends through. Any
/// concrete HTTP client, and any test double, implements it.
///
/// Implementations must be safe to share between concurrent callers; the
/// [`Client`](crate::client::Client) relies on that and adds no locking.
///
/// # Example
///
/// ```ignore
/// use platform_api::transport::{HttpClient, HttpRequest, HttpResponse, HttpError};
///
/// struct StaticClient;
///
/// impl HttpClient for StaticClient {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), "{}"))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when:
    /// - Network connection fails ([`HttpError::Connection`])
    /// - Request times out ([`HttpError::Timeout`])
    /// - URL is invalid ([`HttpError::InvalidUrl`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;

    /// Whether this client is the designated test double.
    ///
    /// A test double lets a client be built without any credential.
    fn is_test_double(&self) -> bool {
        false
    }
}

impl<H: HttpClient> HttpClient for std::sync::Arc<H> {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).request(req)
    }

    fn is_test_double(&self) -> bool {
        (**self).is_test_double()
    }
}
