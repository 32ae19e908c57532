//! Mock implementations for testing.
//!
//! [`MockHttpClient`] records every request and replays queued responses, so
//! tests can inspect the exact wire payload without a network.

use async_trait::async_trait;
use http::StatusCode;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::{MailgunError, MailgunResult};
use crate::http::{HttpClient, HttpResponse, MessagesRequest};

/// Mock HTTP client for testing.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Recorded requests.
    requests: Arc<Mutex<Vec<MessagesRequest>>>,
    /// Queued responses.
    responses: Arc<Mutex<VecDeque<HttpResponse>>>,
    /// Simulated transport failure for the next call.
    fail_next: Arc<Mutex<Option<MailgunError>>>,
}

impl MockHttpClient {
    /// Creates a new mock client.
    pub fn new() -> Self {
        Self::default()
    }

    /// The response returned when nothing is queued.
    pub fn default_response() -> HttpResponse {
        HttpResponse::new(
            StatusCode::OK,
            br#"{"id":"<mock@localhost>","message":"Queued. Thank you."}"#.to_vec(),
        )
    }

    /// Queues a response.
    pub fn queue_response(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(status, body.into()));
        self
    }

    /// Queues a JSON response.
    pub fn queue_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.queue_response(status, body.to_string())
    }

    /// Makes the next call fail without a response.
    pub fn fail_next_with(&self, error: MailgunError) -> &Self {
        *self.fail_next.lock().unwrap() = Some(error);
        self
    }

    /// Returns recorded requests.
    pub fn recorded_requests(&self) -> Vec<MessagesRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<MessagesRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Clears recorded data.
    pub fn clear(&self) {
        self.requests.lock().unwrap().clear();
        self.responses.lock().unwrap().clear();
        *self.fail_next.lock().unwrap() = None;
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post(&self, request: MessagesRequest) -> MailgunResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(error) = self.fail_next.lock().unwrap().take() {
            return Err(error);
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(Self::default_response))
    }
}
