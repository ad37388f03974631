//! Error types for API calls.

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::transport::{BodyError, HttpError, HttpResponse};

/// Message of the [`ApiError`] synthesized for effectively empty GET responses.
pub const OBJECT_NOT_FOUND: &str = "object not found";

/// Message of the [`ApiError`] returned when an error body cannot be read.
pub const CANNOT_READ_BODY: &str = "cannot read response bytes";

/// Wire shape of the body the service sends with every non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Service-defined error code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// An error reported by the API, carrying the HTTP status.
///
/// Renders as `[HTTP Code: <status>][Error Code: <code>] <message>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[HTTP Code: {}][Error Code: {}] {}", .http_status.as_u16(), .code, .message)]
pub struct ApiError {
    /// HTTP status of the response
    pub http_status: StatusCode,
    /// Service-defined error code (may be empty)
    pub code: String,
    /// Human-readable message (may be empty)
    pub message: String,
}

impl ApiError {
    /// Creates an API error.
    #[must_use]
    pub fn new(
        http_status: StatusCode,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            http_status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// The 404 reported for a GET the service answered with an empty success.
    #[must_use]
    pub fn object_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "", OBJECT_NOT_FOUND)
    }

    /// Converts a failing response into an API error.
    ///
    /// The body is read once and released afterwards. An unreadable body
    /// yields [`CANNOT_READ_BODY`]; a body that is not an [`ErrorBody`]
    /// yields the JSON parser's own error text as the message.
    pub async fn from_response(response: HttpResponse) -> Self {
        let status = response.status;

        let bytes = match response.body.read_all().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("Failed to read error body of {status} response: {e}");
                return Self::new(status, "", CANNOT_READ_BODY);
            }
        };

        match serde_json::from_slice::<ErrorBody>(&bytes) {
            Ok(body) => Self::new(
                status,
                body.code.unwrap_or_default(),
                body.message.unwrap_or_default(),
            ),
            Err(e) => Self::new(status, "", e.to_string()),
        }
    }

    /// Re-presents this error as the HTTP response the service would send.
    ///
    /// The status-line text is the error code and the body is the JSON
    /// [`ErrorBody`]. [`from_response`](Self::from_response) turns it back
    /// into an equal `ApiError`.
    #[must_use]
    pub fn to_http_response(&self) -> HttpResponse {
        let body = serde_json::json!({
            "code": self.code,
            "message": self.message,
        });

        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );

        HttpResponse::new(self.http_status, headers, body.to_string()).with_reason(&self.code)
    }

    /// Returns the wire body of this error.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: Some(self.code.clone()),
            message: Some(self.message.clone()),
        }
    }
}

/// Error type returned by the dispatcher.
///
/// Only [`Error::Api`] carries an HTTP status; every other variant is a
/// local failure that happened before a usable response existed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API reported an error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request payload could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// No response was received.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The response body could not be read.
    #[error(transparent)]
    Body(#[from] BodyError),

    /// A successful response body did not match the expected type.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The endpoint path does not form a valid URL.
    #[error("Invalid endpoint URL '{url}': {source}")]
    InvalidUrl {
        /// The rejected URL string
        url: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },
}

impl Error {
    /// Returns the API error, if the API reported one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the HTTP status of an API error.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(e) => Some(e.http_status),
            _ => None,
        }
    }

    /// Returns true if the API reported the object as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
