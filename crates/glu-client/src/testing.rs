//! Test doubles.
//!
//! [`RecordingTransport`] answers from a queue of canned results and records
//! every request it receives, so tests can assert on what was sent (or that
//! nothing was).

use async_trait::async_trait;
use glu_core::traits::Transport;
use glu_core::{Error, HttpRequest, HttpResult, HttpStatus, Result, Value};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A transport that replays canned results and records requests.
///
/// Results are handed out in the order they were queued. Status
/// expectations on requests are enforced just like the HTTP transport does.
/// Sending with an empty queue is a transport error.
///
/// # Examples
///
/// ```
/// use glu_client::testing::RecordingTransport;
/// use glu_core::traits::Transport;
/// use glu_core::HttpRequest;
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let transport = RecordingTransport::new();
/// transport.push_ok(json!({"Combiner": {"desc": "d", "uri": "/code/Combiner"}}));
///
/// let result = transport.send(HttpRequest::get("/code")).await.unwrap();
/// assert_eq!(result.status, 200);
/// assert_eq!(transport.requests()[0].uri, "/code");
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<HttpResult>>,
    requests: Mutex<Vec<HttpRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RecordingTransport {
    /// Creates a transport with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a result.
    pub fn push(&self, result: HttpResult) -> &Self {
        lock(&self.responses).push_back(result);
        self
    }

    /// Queues a result with the given status and payload.
    pub fn push_response(&self, status: u16, data: Value) -> &Self {
        self.push(HttpResult::new(status, data))
    }

    /// Queues a 200 result.
    pub fn push_ok(&self, data: Value) -> &Self {
        self.push_response(HttpStatus::OK, data)
    }

    /// Returns a copy of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Returns the number of requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Returns the most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Returns the number of queued results not yet handed out.
    #[must_use]
    pub fn pending(&self) -> usize {
        lock(&self.responses).len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResult> {
        let expected = request.expected_status;
        let uri = request.uri.clone();
        lock(&self.requests).push(request);

        let result = lock(&self.responses)
            .pop_front()
            .ok_or_else(|| Error::Transport {
                uri,
                source: "no canned response queued".into(),
            })?;
        result.check_expected(expected)
    }
}
