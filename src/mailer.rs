//! A reusable mailer bound to one transport.

use std::mem;

use crate::config::MailgunConfig;
use crate::error::MailgunResult;
use crate::options::MailgunOptions;
use crate::transport::MailgunTransport;
use crate::types::{Headers, Message, SendResult};

/// Owns a [`MailgunTransport`] and the message being composed.
///
/// Options set on the mailer go to the current message. After
/// [`deliver`](Self::deliver) the message is reset, whatever the outcome.
///
/// # Examples
///
/// ```rust,no_run
/// use integrations_mailgun::config::MailgunConfig;
/// use integrations_mailgun::mailer::MailgunMailer;
/// use integrations_mailgun::options::MailgunOptions;
/// use integrations_mailgun::types::Message;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = MailgunConfig::from_env()?;
/// let mut mailer = MailgunMailer::new(config)?.track_opens(true);
///
/// mailer.set_message(
///     Message::new()
///         .from("noreply@mg.example.com")
///         .to("user@example.com")
///         .subject("Your receipt")
///         .html("<p>Thanks!</p>"),
/// );
/// let result = mailer.deliver().await?;
/// println!("{:?}", result.message());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MailgunMailer {
    transport: MailgunTransport,
    message: Message,
}

impl MailgunMailer {
    /// Create a mailer with a reqwest-backed transport.
    pub fn new(config: MailgunConfig) -> MailgunResult<Self> {
        Ok(Self::with_transport(MailgunTransport::new(config)?))
    }

    /// Create a mailer around an existing transport.
    pub fn with_transport(transport: MailgunTransport) -> Self {
        Self {
            transport,
            message: Message::new(),
        }
    }

    /// The message being composed.
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Mutable access to the message being composed.
    pub fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }

    /// Replace the message being composed.
    ///
    /// Options already set on the mailer are carried over; headers of the
    /// new message win on conflicts.
    pub fn set_message(&mut self, message: Message) -> &mut Self {
        let options = mem::take(self.message.headers_mut());
        self.message = message;
        let mut headers = options;
        headers.merge(mem::take(self.message.headers_mut()));
        *self.message.headers_mut() = headers;
        self
    }

    /// The underlying transport.
    pub fn transport(&self) -> &MailgunTransport {
        &self.transport
    }

    /// Send the current message and start a fresh one.
    pub async fn deliver(&mut self) -> MailgunResult<SendResult> {
        let message = mem::take(&mut self.message);
        self.transport.send(&message).await
    }
}

impl MailgunOptions for MailgunMailer {
    fn option_headers(&mut self) -> &mut Headers {
        self.message.headers_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::TRACK_OPENS_HEADER;
    use crate::mocks::MockHttpClient;
    use crate::options::Tags;
    use std::sync::Arc;

    fn mailer() -> (MailgunMailer, MockHttpClient) {
        let config = MailgunConfig::builder()
            .api_key("key-test")
            .domain("mg.example.com")
            .build()
            .unwrap();
        let mock = MockHttpClient::new();
        let transport = MailgunTransport::with_http_client(config, Arc::new(mock.clone()));
        (MailgunMailer::with_transport(transport), mock)
    }

    fn message() -> Message {
        Message::new()
            .from("from@example.com")
            .to("to@example.com")
            .subject("S")
            .html("Hi")
    }

    #[tokio::test]
    async fn test_deliver_resets_message() {
        let (mut mailer, mock) = mailer();
        mailer.set_message(message());

        let result = mailer.deliver().await.unwrap();
        assert_eq!(result.response_code, 200);
        assert_eq!(mock.request_count(), 1);
        assert!(mailer.message().get_from().is_none());
        assert!(mailer.message().headers().is_empty());
    }

    #[tokio::test]
    async fn test_deliver_resets_message_on_failure() {
        let (mut mailer, mock) = mailer();
        mock.queue_response(400, r#"{"message":"'to' parameter is missing"}"#);
        *mailer.message_mut() = message();

        let err = mailer.deliver().await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(mailer.message().get_from().is_none());
    }

    #[tokio::test]
    async fn test_options_apply_to_current_message() {
        let (mailer, mock) = mailer();
        let mut mailer = mailer
            .track_opens(true)
            .set_tags(Tags::parse("receipt").unwrap());
        mailer.set_message(message());

        assert!(mailer.message().headers().get(TRACK_OPENS_HEADER).is_some());

        mailer.deliver().await.unwrap();
        let request = mock.last_request().unwrap();
        assert_eq!(request.payload.get("o:tracking-opens"), Some("yes"));
        assert_eq!(request.payload.get("o:tag[0]"), Some("receipt"));
    }

    #[tokio::test]
    async fn test_rejected_tags_leave_mailer_usable() {
        let (mailer, mock) = mailer();
        let mut mailer = mailer.enable_dkim(true);
        mailer.set_message(message());

        let err = Tags::parse("a,b,c,d").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(mailer.message().get_subject(), "S");

        mailer.deliver().await.unwrap();
        let request = mock.last_request().unwrap();
        assert_eq!(request.payload.get("subject"), Some("S"));
        assert_eq!(request.payload.get("o:dkim"), Some("yes"));
        assert_eq!(request.payload.count("o:tag[0]"), 0);
    }
}
