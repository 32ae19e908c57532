//! Mailgun transport: one send, one request.
//!
//! [`MailgunTransport::send`] checks the credentials, encodes the message
//! into the transport's payload buffer, posts it to
//! `{endpoint}/{domain}/messages` with basic auth (`api` / API key) and maps
//! the response. The buffer is cleared on every exit path, so a transport is
//! reusable after a failed send. `send` takes `&mut self`: a transport
//! serves one send at a time.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use secrecy::SecretString;
use serde_json::Value;

use crate::config::MailgunConfig;
use crate::encoder::{MessageEncoder, WirePayload};
use crate::error::{MailgunError, MailgunResult};
use crate::http::{HttpClient, MessagesRequest, ReqwestHttpClient};
use crate::types::{Message, SendResult};

/// Error message raised when no API key is configured.
pub const MISSING_API_KEY_MESSAGE: &str = "Api Key for Mailgun could not found.";

/// Error message raised when no sending domain is configured.
pub const MISSING_DOMAIN_MESSAGE: &str = "Domain for Mailgun could not found.";

/// Basic auth username Mailgun expects.
pub const API_USERNAME: &str = "api";

/// Clears the payload buffer when dropped.
struct PayloadBuffer<'a>(&'a mut WirePayload);

impl Drop for PayloadBuffer<'_> {
    fn drop(&mut self) {
        self.0.clear();
    }
}

impl Deref for PayloadBuffer<'_> {
    type Target = WirePayload;

    fn deref(&self) -> &WirePayload {
        self.0
    }
}

impl DerefMut for PayloadBuffer<'_> {
    fn deref_mut(&mut self) -> &mut WirePayload {
        self.0
    }
}

/// Sends messages through the Mailgun messages API.
///
/// # Examples
///
/// ```rust,no_run
/// use integrations_mailgun::config::MailgunConfig;
/// use integrations_mailgun::transport::MailgunTransport;
/// use integrations_mailgun::types::Message;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = MailgunConfig::builder()
///     .api_key("key-123")
///     .domain("mg.example.com")
///     .build()?;
/// let mut transport = MailgunTransport::new(config)?;
///
/// let message = Message::new()
///     .from("noreply@mg.example.com")
///     .to("user@example.com")
///     .subject("Welcome")
///     .html("<p>Hello!</p>");
///
/// let result = transport.send(&message).await?;
/// println!("Queued as {:?}", result.id());
/// # Ok(())
/// # }
/// ```
pub struct MailgunTransport {
    config: MailgunConfig,
    http_client: Arc<dyn HttpClient>,
    encoder: MessageEncoder,
    payload: WirePayload,
}

impl MailgunTransport {
    /// Create a transport backed by reqwest.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: MailgunConfig) -> MailgunResult<Self> {
        let http_client = ReqwestHttpClient::from_config(&config)?;
        Ok(Self::with_http_client(config, Arc::new(http_client)))
    }

    /// Create a transport from `MAILGUN_*` environment variables.
    pub fn from_env() -> MailgunResult<Self> {
        Self::new(MailgunConfig::from_env()?)
    }

    /// Create a transport with a custom HTTP client.
    ///
    /// This is useful for testing or alternative HTTP implementations.
    pub fn with_http_client(config: MailgunConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
            encoder: MessageEncoder::new(),
            payload: WirePayload::new(),
        }
    }

    /// The transport configuration.
    pub fn config(&self) -> &MailgunConfig {
        &self.config
    }

    /// Parts buffered for the send in progress. Always empty between sends.
    pub fn pending_payload(&self) -> &WirePayload {
        &self.payload
    }

    /// Send a message.
    ///
    /// # Errors
    ///
    /// - [`MailgunError::Configuration`] if the API key, the domain (checked
    ///   in that order) or the From address is missing
    /// - [`MailgunError::Validation`] if a provider header holds malformed data
    /// - [`MailgunError::Api`] on a non-2xx response or a transport failure
    pub async fn send(&mut self, message: &Message) -> MailgunResult<SendResult> {
        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| MailgunError::configuration(MISSING_API_KEY_MESSAGE))?
            .to_string();
        let url = self
            .config
            .messages_url()
            .map_err(|_| MailgunError::configuration(MISSING_DOMAIN_MESSAGE))?;

        let mut buffer = PayloadBuffer(&mut self.payload);
        buffer.extend(self.encoder.encode(message)?.into_parts());

        let debug_payload = self.config.debug.then(|| buffer.clone());
        let request = MessagesRequest {
            url,
            username: API_USERNAME.to_string(),
            password: SecretString::new(api_key),
            payload: buffer.clone(),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            url = %request.url,
            parts = request.payload.len(),
            "Sending message to Mailgun"
        );

        let response = self.http_client.post(request).await?;
        let response_code = response.status().as_u16();

        if !response.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(status = response_code, "Mailgun rejected message");

            return Err(response.into_error());
        }

        let api_response: Value = response.json()?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            status = response_code,
            id = api_response.get("id").and_then(Value::as_str).unwrap_or_default(),
            "Mailgun accepted message"
        );

        Ok(SendResult {
            api_response,
            response_code,
            payload: debug_payload,
        })
    }
}

impl std::fmt::Debug for MailgunTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailgunTransport")
            .field("config", &self.config)
            .field("pending_parts", &self.payload.len())
            .finish()
    }
}
