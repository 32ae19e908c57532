//! The email message model consumed by the encoder.

use serde::{Deserialize, Serialize};

use super::{Attachment, EmailAddress, HeaderValue, Headers};

/// Which body parts a message carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailFormat {
    /// HTML only.
    #[default]
    Html,
    /// Plain text only.
    Text,
    /// HTML and plain text.
    Both,
}

impl EmailFormat {
    /// Returns true if the plain-text part should be sent.
    pub fn includes_text(&self) -> bool {
        matches!(self, EmailFormat::Text | EmailFormat::Both)
    }
}

/// An email to send through Mailgun.
///
/// Built per send with chainable setters and discarded afterwards.
///
/// # Examples
///
/// ```rust
/// use integrations_mailgun::types::{EmailFormat, Message};
///
/// let message = Message::new()
///     .from(("sender@example.com", "Sender"))
///     .to("one@example.com")
///     .to("Two <two@example.com>")
///     .subject("Hello")
///     .html("<p>Hello</p>")
///     .text("Hello")
///     .format(EmailFormat::Both);
///
/// assert_eq!(message.recipients().count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    from: Option<EmailAddress>,
    sender: Option<EmailAddress>,
    to: Vec<EmailAddress>,
    cc: Vec<EmailAddress>,
    bcc: Vec<EmailAddress>,
    reply_to: Vec<EmailAddress>,
    subject: String,
    html_body: Option<String>,
    text_body: Option<String>,
    format: EmailFormat,
    attachments: Vec<Attachment>,
    headers: Headers,
}

impl Message {
    /// Create an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the From address.
    pub fn from(mut self, address: impl Into<EmailAddress>) -> Self {
        self.from = Some(address.into());
        self
    }

    /// Set the Sender address (distinct from From).
    pub fn sender(mut self, address: impl Into<EmailAddress>) -> Self {
        self.sender = Some(address.into());
        self
    }

    /// Add a "To" recipient.
    pub fn to(mut self, address: impl Into<EmailAddress>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Add a "CC" recipient.
    pub fn cc(mut self, address: impl Into<EmailAddress>) -> Self {
        self.cc.push(address.into());
        self
    }

    /// Add a "BCC" recipient.
    pub fn bcc(mut self, address: impl Into<EmailAddress>) -> Self {
        self.bcc.push(address.into());
        self
    }

    /// Add a Reply-To address.
    pub fn reply_to(mut self, address: impl Into<EmailAddress>) -> Self {
        self.reply_to.push(address.into());
        self
    }

    /// Set the subject.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the HTML body.
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.html_body = Some(body.into());
        self
    }

    /// Set the plain-text body. Sent only when the format includes text.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.text_body = Some(body.into());
        self
    }

    /// Select which body parts are sent.
    pub fn format(mut self, format: EmailFormat) -> Self {
        self.format = format;
        self
    }

    /// Add an attachment. An existing attachment with the same filename is replaced.
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        match self
            .attachments
            .iter_mut()
            .find(|existing| existing.filename == attachment.filename)
        {
            Some(existing) => *existing = attachment,
            None => self.attachments.push(attachment),
        }
        self
    }

    /// Set a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// The From address.
    pub fn get_from(&self) -> Option<&EmailAddress> {
        self.from.as_ref()
    }

    /// The Sender address.
    pub fn get_sender(&self) -> Option<&EmailAddress> {
        self.sender.as_ref()
    }

    /// "To" recipients in the order they were added.
    pub fn get_to(&self) -> &[EmailAddress] {
        &self.to
    }

    /// "CC" recipients.
    pub fn get_cc(&self) -> &[EmailAddress] {
        &self.cc
    }

    /// "BCC" recipients.
    pub fn get_bcc(&self) -> &[EmailAddress] {
        &self.bcc
    }

    /// Reply-To addresses.
    pub fn get_reply_to(&self) -> &[EmailAddress] {
        &self.reply_to
    }

    /// All recipients: to, then cc, then bcc.
    pub fn recipients(&self) -> impl Iterator<Item = &EmailAddress> {
        self.to.iter().chain(&self.cc).chain(&self.bcc)
    }

    /// The subject.
    pub fn get_subject(&self) -> &str {
        &self.subject
    }

    /// The HTML body, if set.
    pub fn html_body(&self) -> Option<&str> {
        self.html_body.as_deref()
    }

    /// The plain-text body, if set.
    pub fn text_body(&self) -> Option<&str> {
        self.text_body.as_deref()
    }

    /// The body format.
    pub fn get_format(&self) -> EmailFormat {
        self.format
    }

    /// Attachments in the order they were added.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// The header bag.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Mutable access to the header bag.
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }
}
