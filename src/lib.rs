//! Mailgun Integration Module
//!
//! Sends email through the Mailgun messages API: a [`Message`] is encoded
//! into an ordered list of multipart fields and posted to
//! `{endpoint}/{domain}/messages` with basic auth.
//!
//! # Features
//!
//! - **Multipart encoding**: addresses, bodies, custom headers, provider
//!   options, variables and attachments mapped to Mailgun field names
//! - **Provider options**: tags, DKIM, tracking, scheduled delivery and test
//!   mode through the chainable [`MailgunOptions`] trait
//! - **Streaming attachments**: files are streamed from disk at send time
//! - **Reusable transport**: the payload buffer is reset after every send,
//!   successful or not
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use integrations_mailgun::{MailgunConfig, MailgunOptions, MailgunTransport, Message, Tags};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MailgunConfig::builder()
//!         .api_key("key-123")
//!         .domain("mg.example.com")
//!         .build()?;
//!     let mut transport = MailgunTransport::new(config)?;
//!
//!     let message = Message::new()
//!         .from(("noreply@mg.example.com", "Example"))
//!         .to("user@example.com")
//!         .subject("Hello from Mailgun")
//!         .html("<p>Hello!</p>")
//!         .set_tags(Tags::new(["welcome"])?)
//!         .track_clicks(None);
//!
//!     let result = transport.send(&message).await?;
//!     println!("Queued: {:?}", result.id());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! ```rust,no_run
//! use integrations_mailgun::{MailgunError, MailgunTransport, Message};
//!
//! # async fn example(transport: &mut MailgunTransport, message: Message) {
//! match transport.send(&message).await {
//!     Ok(result) => println!("Sent: {:?}", result.id()),
//!     Err(MailgunError::Configuration { message }) => eprintln!("Config: {}", message),
//!     Err(MailgunError::Validation { message, .. }) => eprintln!("Invalid: {}", message),
//!     Err(err) => eprintln!("Mailgun returned {:?}: {}", err.status(), err),
//! }
//! # }
//! ```
//!
//! # Testing
//!
//! [`mocks::MockHttpClient`] records every request and replays queued
//! responses, so the wire payload can be inspected without a network:
//!
//! ```rust
//! use std::sync::Arc;
//! use integrations_mailgun::mocks::MockHttpClient;
//! use integrations_mailgun::{MailgunConfig, MailgunTransport, Message};
//!
//! # async fn example() -> integrations_mailgun::Result<()> {
//! let mock = MockHttpClient::new();
//! let config = MailgunConfig::builder().api_key("key").domain("mg.example.com").build()?;
//! let mut transport = MailgunTransport::with_http_client(config, Arc::new(mock.clone()));
//!
//! transport.send(&Message::new().from("a@example.com").to("b@example.com")).await?;
//! assert_eq!(mock.last_request().unwrap().payload.get("to"), Some("b@example.com <b@example.com>"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod encoder;
pub mod error;
pub mod http;
pub mod mailer;
pub mod mocks;
pub mod options;
pub mod transport;
pub mod types;

pub use config::{ConfigError, MailgunConfig, MailgunConfigBuilder, MailgunRegion};
pub use encoder::{MessageEncoder, PartBody, WirePart, WirePayload};
pub use error::{MailgunError, MailgunResult};
pub use http::{HttpClient, HttpResponse, MessagesRequest, ReqwestHttpClient};
pub use mailer::MailgunMailer;
pub use options::{DeliveryTime, MailgunOptions, Tags};
pub use transport::MailgunTransport;
pub use types::{
    Attachment, AttachmentSource, EmailAddress, EmailFormat, HeaderValue, Headers, Message,
    SendResult,
};

/// Create a transport from `MAILGUN_*` environment variables.
///
/// # Errors
///
/// Returns `MailgunError` if the environment holds invalid values or the
/// HTTP client cannot be created.
pub fn create_transport_from_env() -> Result<MailgunTransport> {
    MailgunTransport::from_env()
}

/// Result type alias for Mailgun operations.
pub type Result<T> = std::result::Result<T, MailgunError>;
