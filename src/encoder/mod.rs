//! Message-to-wire translation.
//!
//! [`MessageEncoder`] turns a [`Message`] into a [`WirePayload`]: the ordered
//! list of multipart fields the Mailgun messages API expects. Encoding is pure
//! and deterministic; encoding the same message twice yields identical parts.
//!
//! Part order is: addresses, subject, body, headers, attachments.
//!
//! | Message data | Field name |
//! |---|---|
//! | from / to / cc / bcc | `from`, `to`, `cc`, `bcc` |
//! | sender / reply-to | `h:Sender`, `h:Reply-To` |
//! | body | `html`, `text` |
//! | `X-Mailgun-*` option headers | `o:<option>`, `o:tag[i]` |
//! | `X-Mailgun-Variables` | `v:<name>` |
//! | `X-Mailgun-Recipient-Variables` | `recipient-variables` |
//! | other headers | `h:<header>` |
//! | attachments | `attachment`, `inline` |

mod attachments;
mod headers;
mod payload;

pub use attachments::{ATTACHMENT_FIELD, INLINE_FIELD};
pub use headers::{
    option_token, CUSTOM_HEADER_MARKER, DELIVER_BY_HEADER, DKIM_HEADER, DROP_MESSAGE_HEADER,
    OPTION_MARKER, RECIPIENT_VARIABLES_FIELD, RECIPIENT_VARIABLES_HEADER, REQUIRE_TLS_HEADER,
    RESERVED_PREFIX, SKIP_VERIFICATION_HEADER, TAG_HEADER, TRACK_CLICKS_HEADER, TRACK_HEADER,
    TRACK_OPENS_HEADER, VARIABLES_HEADER, VARIABLE_MARKER,
};
pub use payload::{PartBody, WirePart, WirePayload};

use crate::error::{MailgunError, MailgunResult};
use crate::types::{EmailAddress, Message};

/// RFC 2822 date format Mailgun accepts for `o:deliverytime`,
/// e.g. `Thu, 13 Oct 2011 18:02:00 +0000`.
pub const DELIVERY_TIME_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Error message raised when a message has no From address.
pub const MISSING_FROM_MESSAGE: &str = "From address for Mailgun could not found.";

/// Converts messages into Mailgun wire payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageEncoder;

impl MessageEncoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self
    }

    /// Encode a whole message.
    ///
    /// # Errors
    ///
    /// - [`MailgunError::Configuration`] if the message has no From address
    /// - [`MailgunError::Validation`] if a provider header or inline
    ///   attachment holds malformed data
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_mailgun::encoder::MessageEncoder;
    /// use integrations_mailgun::types::Message;
    ///
    /// let message = Message::new()
    ///     .from("from@example.com")
    ///     .to("to@example.com")
    ///     .subject("S")
    ///     .html("Hi");
    ///
    /// let payload = MessageEncoder::new().encode(&message).unwrap();
    /// assert_eq!(payload.get("from"), Some("from@example.com <from@example.com>"));
    /// assert_eq!(payload.get("html"), Some("Hi"));
    /// ```
    pub fn encode(&self, message: &Message) -> MailgunResult<WirePayload> {
        let mut payload = WirePayload::new();
        payload.extend(self.encode_addresses(message)?);
        payload.push(WirePart::text("subject", message.get_subject()));
        payload.extend(self.encode_body(message));
        payload.extend(self.encode_headers(message)?);
        payload.extend(self.encode_attachments(message)?);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            parts = payload.len(),
            recipients = message.recipients().count(),
            attachments = message.attachments().len(),
            "Encoded Mailgun payload"
        );

        Ok(payload)
    }

    /// Encode address fields: `from`, `h:Sender`, `to`, `cc`, `bcc`, `h:Reply-To`.
    ///
    /// Each address becomes its own part formatted as `Name <email>`.
    ///
    /// # Errors
    ///
    /// Returns [`MailgunError::Configuration`] when no From address is set.
    pub fn encode_addresses(&self, message: &Message) -> MailgunResult<Vec<WirePart>> {
        let from = message
            .get_from()
            .filter(|address| !address.email.trim().is_empty())
            .ok_or_else(|| MailgunError::configuration(MISSING_FROM_MESSAGE))?;

        let mut parts = vec![WirePart::text("from", from.format())];
        let roles: [(&str, &[EmailAddress]); 5] = [
            ("h:Sender", message.get_sender().map(std::slice::from_ref).unwrap_or(&[])),
            ("to", message.get_to()),
            ("cc", message.get_cc()),
            ("bcc", message.get_bcc()),
            ("h:Reply-To", message.get_reply_to()),
        ];
        for (field, addresses) in roles {
            parts.extend(
                addresses
                    .iter()
                    .map(|address| WirePart::text(field, address.format())),
            );
        }
        Ok(parts)
    }

    /// Encode body fields.
    ///
    /// `html` is always present (trimmed, possibly empty). `text` is added
    /// when the message format includes plain text.
    pub fn encode_body(&self, message: &Message) -> Vec<WirePart> {
        let mut parts = vec![WirePart::text(
            "html",
            message.html_body().unwrap_or_default().trim(),
        )];
        if message.get_format().includes_text() {
            parts.push(WirePart::text(
                "text",
                message.text_body().unwrap_or_default().trim(),
            ));
        }
        parts
    }

    /// Encode the header bag in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`MailgunError::Validation`] for malformed tag or variable values.
    pub fn encode_headers(&self, message: &Message) -> MailgunResult<Vec<WirePart>> {
        let mut parts = Vec::new();
        for (name, value) in message.headers().iter() {
            headers::encode_header(name, value, &mut parts)?;
        }
        Ok(parts)
    }

    /// Encode attachments as `attachment` or `inline` file parts.
    ///
    /// # Errors
    ///
    /// Returns [`MailgunError::Validation`] if inline data is not valid base64.
    pub fn encode_attachments(&self, message: &Message) -> MailgunResult<Vec<WirePart>> {
        message
            .attachments()
            .iter()
            .map(attachments::encode_attachment)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attachment, EmailFormat};

    fn basic_message() -> Message {
        Message::new()
            .from("from@example.com")
            .to("to@example.com")
            .subject("S")
            .html("Hi")
    }

    #[test]
    fn test_basic_payload() {
        let payload = MessageEncoder::new().encode(&basic_message()).unwrap();

        assert_eq!(payload.names(), vec!["from", "to", "subject", "html"]);
        assert_eq!(payload.get("from"), Some("from@example.com <from@example.com>"));
        assert_eq!(payload.get("to"), Some("to@example.com <to@example.com>"));
        assert_eq!(payload.get("subject"), Some("S"));
        assert_eq!(payload.get("html"), Some("Hi"));
    }

    #[test]
    fn test_missing_from() {
        let message = Message::new().to("to@example.com");
        let err = MessageEncoder::new().encode(&message).unwrap_err();

        assert!(err.is_configuration());
        assert_eq!(err.to_string(), MISSING_FROM_MESSAGE);
    }

    #[test]
    fn test_blank_from_is_missing() {
        let message = Message::new().from("  ").to("to@example.com");
        assert!(MessageEncoder::new().encode(&message).unwrap_err().is_configuration());
    }

    #[test]
    fn test_all_address_roles() {
        let message = Message::new()
            .from(("from@example.com", "From Name"))
            .sender("sender@example.com")
            .to("Jane <jane@example.com>")
            .to("joe@example.com")
            .cc("cc@example.com")
            .bcc("bcc@example.com")
            .reply_to(("reply@example.com", "Support"));

        let parts = MessageEncoder::new().encode_addresses(&message).unwrap();
        let pairs: Vec<_> = parts
            .iter()
            .map(|part| (part.name.as_str(), part.as_text().unwrap()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("from", "From Name <from@example.com>"),
                ("h:Sender", "sender@example.com <sender@example.com>"),
                ("to", "Jane <jane@example.com>"),
                ("to", "joe@example.com <joe@example.com>"),
                ("cc", "cc@example.com <cc@example.com>"),
                ("bcc", "bcc@example.com <bcc@example.com>"),
                ("h:Reply-To", "Support <reply@example.com>"),
            ]
        );
    }

    #[test]
    fn test_body_is_trimmed_and_html_always_present() {
        let message = Message::new().from("f@example.com").text("  plain  ");
        let parts = MessageEncoder::new().encode_body(&message);

        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name, "html");
        assert_eq!(parts[0].as_text(), Some(""));
    }

    #[test]
    fn test_text_part_follows_format() {
        let message = basic_message()
            .text("\n plain body \n")
            .format(EmailFormat::Both);
        let payload = MessageEncoder::new().encode(&message).unwrap();

        assert_eq!(payload.count("html"), 1);
        assert_eq!(payload.count("text"), 1);
        assert_eq!(payload.get("text"), Some("plain body"));

        let text_only = basic_message().format(EmailFormat::Text);
        let payload = MessageEncoder::new().encode(&text_only).unwrap();
        assert_eq!(payload.get("text"), Some(""));
        assert_eq!(payload.get("html"), Some("Hi"));
    }

    #[test]
    fn test_headers_follow_attachments_order() {
        let message = basic_message()
            .header("X-Campaign", "spring")
            .header(TAG_HEADER, r#"["a","b"]"#)
            .header(DKIM_HEADER, "yes")
            .attachment(Attachment::data("a.txt", "aGk=", "text/plain"));

        let payload = MessageEncoder::new().encode(&message).unwrap();
        assert_eq!(
            payload.names(),
            vec![
                "from",
                "to",
                "subject",
                "html",
                "h:X-Campaign",
                "o:tag[0]",
                "o:tag[1]",
                "o:dkim",
                "attachment",
            ]
        );
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let message = basic_message()
            .cc("cc@example.com")
            .header(VARIABLES_HEADER, serde_json::Map::from_iter([(
                "k".to_string(),
                serde_json::json!({"nested": true}),
            )]))
            .attachment(Attachment::file("a.pdf", "/tmp/a.pdf"));

        let encoder = MessageEncoder::new();
        assert_eq!(encoder.encode(&message).unwrap(), encoder.encode(&message).unwrap());
    }

    #[test]
    fn test_delivery_time_format() {
        use chrono::{FixedOffset, TimeZone};

        let time = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2011, 10, 3, 18, 2, 0)
            .unwrap();
        assert_eq!(
            time.format(DELIVERY_TIME_FORMAT).to_string(),
            "Mon, 03 Oct 2011 18:02:00 +0200"
        );
    }
}
