//! HTTP module for Mailgun API communication.
//!
//! ```text
//! ┌───────────────────┐
//! │ MailgunTransport  │  - encodes the message
//! │                   │  - maps the response
//! └─────────┬─────────┘
//!           │ MessagesRequest (url, basic auth, WirePayload)
//!           ▼
//! ┌───────────────────┐
//! │    HttpClient     │  - single POST capability
//! └─────────┬─────────┘
//!           ▼
//! ┌───────────────────┐
//! │ ReqwestHttpClient │  - multipart form, file streaming
//! └───────────────────┘
//! ```

mod client;
mod response;

pub use client::ReqwestHttpClient;
pub use response::HttpResponse;

use std::fmt;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::encoder::WirePayload;
use crate::error::MailgunResult;

/// A multipart POST to the Mailgun messages resource.
#[derive(Clone)]
pub struct MessagesRequest {
    /// Full URL, `{endpoint}/{domain}/messages`.
    pub url: String,
    /// Basic auth username (always `api` for Mailgun).
    pub username: String,
    /// Basic auth password (the API key).
    pub password: SecretString,
    /// Form fields in order.
    pub payload: WirePayload,
}

impl fmt::Debug for MessagesRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessagesRequest")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("payload", &self.payload)
            .finish()
    }
}

/// Trait for HTTP clients that can post Mailgun messages.
///
/// Implementations return any received response, whatever its status;
/// only failures to obtain a response are errors.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send the request and return the response.
    ///
    /// # Errors
    ///
    /// Returns [`MailgunError::Api`](crate::error::MailgunError) with no
    /// status when the request cannot be built or sent.
    async fn post(&self, request: MessagesRequest) -> MailgunResult<HttpResponse>;
}
