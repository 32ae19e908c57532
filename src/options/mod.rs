//! Chainable Mailgun options.
//!
//! [`MailgunOptions`] writes provider options into a header bag under the
//! reserved `X-Mailgun-` prefix, where the encoder picks them up and turns
//! them into `o:`, `v:` and `recipient-variables` fields. It is implemented
//! for [`Message`] and for [`MailgunMailer`](crate::mailer::MailgunMailer).
//!
//! Options with limits are checked when their value is built ([`Tags`],
//! [`DeliveryTime`]), so the setters themselves never fail and a rejected
//! value leaves the message or mailer untouched.
//!
//! ```rust
//! use integrations_mailgun::options::{MailgunOptions, Tags};
//! use integrations_mailgun::types::Message;
//!
//! # fn example() -> integrations_mailgun::error::MailgunResult<()> {
//! let message = Message::new()
//!     .from("noreply@mg.example.com")
//!     .to("user@example.com")
//!     .set_tags("welcome,onboarding".parse::<Tags>()?)
//!     .track_clicks(None)
//!     .enable_dkim(true);
//! # Ok(())
//! # }
//! ```

use std::str::FromStr;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::encoder::{
    DELIVERY_TIME_FORMAT, DELIVER_BY_HEADER, DKIM_HEADER, DROP_MESSAGE_HEADER,
    RECIPIENT_VARIABLES_HEADER, REQUIRE_TLS_HEADER, SKIP_VERIFICATION_HEADER, TAG_HEADER,
    TRACK_CLICKS_HEADER, TRACK_HEADER, TRACK_OPENS_HEADER, VARIABLES_HEADER,
};
use crate::error::{MailgunError, MailgunResult};
use crate::types::{Headers, Message};

/// Maximum number of tags Mailgun accepts per message.
pub const MAX_TAGS: usize = 3;

/// How far ahead a delivery can be scheduled.
pub const MAX_DELIVERY_DAYS: i64 = 3;

/// Error message raised by [`Tags::new`] and [`Tags::parse`].
pub const TOO_MANY_TAGS_MESSAGE: &str = "You can only set a max of 3 tags.";

/// Error message raised by [`DeliveryTime::new`].
pub const DELIVERY_TOO_FAR_MESSAGE: &str =
    "Delivery date can only be max of 3 days in the future.";

/// At most three message tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Tags from a list, in order.
    ///
    /// # Errors
    ///
    /// Returns [`MailgunError::Validation`] with the message
    /// `"You can only set a max of 3 tags."` for more than three tags.
    pub fn new<I, S>(tags: I) -> MailgunResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        if tags.len() > MAX_TAGS {
            return Err(MailgunError::invalid_field(TAG_HEADER, TOO_MANY_TAGS_MESSAGE));
        }
        Ok(Tags(tags))
    }

    /// Tags from one comma-separated string.
    ///
    /// Pieces are kept exactly as split, so `"a, b"` yields `"a"` and `" b"`.
    ///
    /// # Errors
    ///
    /// Same as [`Tags::new`].
    pub fn parse(tags: &str) -> MailgunResult<Self> {
        Self::new(tags.split(','))
    }

    /// The tags in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn to_json(&self) -> String {
        Value::Array(self.0.iter().cloned().map(Value::String).collect()).to_string()
    }
}

impl FromStr for Tags {
    type Err = MailgunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tags::parse(s)
    }
}

/// A delivery time no more than three days ahead, already formatted for
/// `o:deliverytime`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryTime(String);

impl DeliveryTime {
    /// Check `time` against the current moment.
    ///
    /// # Errors
    ///
    /// Returns [`MailgunError::Validation`] with the message
    /// `"Delivery date can only be max of 3 days in the future."` when `time`
    /// is further ahead.
    pub fn new<Tz>(time: DateTime<Tz>) -> MailgunResult<Self>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self::relative_to(time, Utc::now())
    }

    /// Check `time` against `now`. Past times are accepted.
    ///
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use integrations_mailgun::options::DeliveryTime;
    ///
    /// let now = Utc.with_ymd_and_hms(2011, 10, 12, 0, 0, 0).unwrap();
    /// let time = Utc.with_ymd_and_hms(2011, 10, 13, 18, 2, 0).unwrap();
    /// let delivery = DeliveryTime::relative_to(time, now).unwrap();
    /// assert_eq!(delivery.as_str(), "Thu, 13 Oct 2011 18:02:00 +0000");
    /// ```
    pub fn relative_to<Tz>(time: DateTime<Tz>, now: DateTime<Utc>) -> MailgunResult<Self>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        if time.with_timezone(&Utc) - now > Duration::days(MAX_DELIVERY_DAYS) {
            return Err(MailgunError::invalid_field(
                DELIVER_BY_HEADER,
                DELIVERY_TOO_FAR_MESSAGE,
            ));
        }
        Ok(DeliveryTime(time.format(DELIVERY_TIME_FORMAT).to_string()))
    }

    /// The formatted time.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn true_false(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Chainable Mailgun options for anything that owns a header bag.
///
/// Every method stores its value as a header, replacing a previous value of
/// the same option.
pub trait MailgunOptions: Sized {
    /// The header bag options are written to.
    fn option_headers(&mut self) -> &mut Headers;

    /// Tag the message. The tags are stored as a JSON array.
    fn set_tags(mut self, tags: Tags) -> Self {
        self.option_headers().set(TAG_HEADER, tags.to_json());
        self
    }

    /// Schedule delivery.
    fn deliver_by(mut self, time: DeliveryTime) -> Self {
        self.option_headers().set(DELIVER_BY_HEADER, time.0);
        self
    }

    /// Enable or disable DKIM signatures.
    fn enable_dkim(mut self, enable: bool) -> Self {
        self.option_headers().set(DKIM_HEADER, yes_no(enable));
        self
    }

    /// Enable or disable tracking.
    fn enable_tracking(mut self, track: bool) -> Self {
        self.option_headers().set(TRACK_HEADER, yes_no(track));
        self
    }

    /// Track clicks: `Some(true)`, `Some(false)`, or `None` for HTML links only.
    fn track_clicks(mut self, track: Option<bool>) -> Self {
        let value = track.map(yes_no).unwrap_or("htmlonly");
        self.option_headers().set(TRACK_CLICKS_HEADER, value);
        self
    }

    /// Track opens.
    fn track_opens(mut self, track: bool) -> Self {
        self.option_headers().set(TRACK_OPENS_HEADER, yes_no(track));
        self
    }

    /// Require TLS, or allow falling back to plain text.
    fn require_tls(mut self, tls: bool) -> Self {
        self.option_headers().set(REQUIRE_TLS_HEADER, true_false(tls));
        self
    }

    /// Skip certificate and hostname verification over TLS.
    fn skip_verification(mut self, skip: bool) -> Self {
        self.option_headers()
            .set(SKIP_VERIFICATION_HEADER, true_false(skip));
        self
    }

    /// Test mode: Mailgun accepts the message but drops it.
    fn test_mode(mut self, drop: bool) -> Self {
        self.option_headers().set(DROP_MESSAGE_HEADER, yes_no(drop));
        self
    }

    /// Attach custom data. Each entry becomes a `v:<name>` field.
    fn set_mailgun_vars(mut self, vars: Map<String, Value>) -> Self {
        self.option_headers().set(VARIABLES_HEADER, vars);
        self
    }

    /// Per-recipient substitution data keyed by recipient address.
    fn set_recipient_vars(mut self, vars: Map<String, Value>) -> Self {
        self.option_headers()
            .set(RECIPIENT_VARIABLES_HEADER, Value::Object(vars).to_string());
        self
    }
}

impl MailgunOptions for Message {
    fn option_headers(&mut self) -> &mut Headers {
        self.headers_mut()
    }
}
