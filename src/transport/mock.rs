//! Canned-response transport for tests.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Body, HttpClient, HttpError, HttpRequest, HttpResponse};

/// The designated test double for [`HttpClient`].
///
/// Replays a queue of canned results in order and records every request it
/// receives. A client built on it needs no credential.
///
/// Once the queue is drained, further requests fail with
/// [`HttpError::Connection`].
///
/// # Example
///
/// ```
/// use platform_api::transport::MockTransport;
///
/// let transport = MockTransport::new().with_json(http::StatusCode::OK, r#"{"id":"42"}"#);
/// assert_eq!(transport.pending(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Creates a mock with an empty response queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    #[must_use]
    pub fn with_response(self, response: HttpResponse) -> Self {
        self.push(Ok(response));
        self
    }

    /// Queues a response with the given status and body.
    #[must_use]
    pub fn with_json(self, status: http::StatusCode, body: impl Into<Body>) -> Self {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        self.with_response(HttpResponse::new(status, headers, body))
    }

    /// Queues a transport-level failure.
    #[must_use]
    pub fn with_error(self, error: HttpError) -> Self {
        self.push(Err(error));
        self
    }

    /// Queues a result.
    pub fn push(&self, result: Result<HttpResponse, HttpError>) {
        lock(&self.responses).push_back(result);
    }

    /// Returns the number of queued results not yet replayed.
    #[must_use]
    pub fn pending(&self) -> usize {
        lock(&self.responses).len()
    }

    /// Returns copies of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Returns the most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl HttpClient for MockTransport {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        lock(&self.requests).push(req);
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Connection("no canned response left".into())))
    }

    fn is_test_double(&self) -> bool {
        true
    }
}
