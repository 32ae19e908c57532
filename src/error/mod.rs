//! Error types for the Mailgun integration module.
//!
//! Errors fall into three categories, each surfaced to the caller as-is:
//! - Configuration errors (missing API key, domain, or sender address)
//! - Validation errors (too many tags, delivery window, malformed JSON values)
//! - API errors (non-2xx responses and network failures)
//!
//! No error is retried. A send either succeeds once or fails once.
//!
//! # Examples
//!
//! ```rust
//! use integrations_mailgun::error::MailgunError;
//!
//! fn describe(error: &MailgunError) {
//!     if let Some(status) = error.status() {
//!         println!("Mailgun answered {}: {:?}", status, error.body());
//!     }
//! }
//! ```

mod mapping;

pub use mapping::map_response_error;

use thiserror::Error;

/// Top-level error type for the Mailgun integration.
#[derive(Debug, Error)]
pub enum MailgunError {
    /// Configuration-related errors.
    ///
    /// Raised before any network call when the API key, the sending domain,
    /// or the sender address is missing.
    #[error("{message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// Validation errors.
    ///
    /// Raised at the point an offending value is set (tags, delivery time)
    /// or encoded (malformed JSON, undecodable attachment data).
    #[error("{message}")]
    Validation {
        /// Description of the validation error.
        message: String,
        /// Optional name of the field or header that failed validation.
        field: Option<String>,
    },

    /// Mailgun API errors.
    ///
    /// Covers both non-2xx responses (with `status` set) and transport-level
    /// failures (with `status` unset and the underlying error as `source`).
    #[error("{message}")]
    Api {
        /// Human-readable description.
        message: String,
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// Raw response body text, if a response was received.
        body: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl MailgunError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a validation error tied to a specific field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an API error from a received HTTP response.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_mailgun::error::MailgunError;
    ///
    /// let error = MailgunError::api(403, "Forbidden");
    /// assert_eq!(error.status(), Some(403));
    /// assert_eq!(error.body(), Some("Forbidden"));
    /// ```
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::Api {
            message: format!("Mailgun API error ({}): {}", status, body),
            status: Some(status),
            body,
            source: None,
        }
    }

    /// Create an API error for a transport-level failure.
    pub fn transport(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Api {
            message: message.into(),
            status: None,
            body: String::new(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the HTTP status code, if the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            MailgunError::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns the raw response body, if the error came from the API.
    pub fn body(&self) -> Option<&str> {
        match self {
            MailgunError::Api { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Returns the field name for validation errors, if known.
    pub fn field(&self) -> Option<&str> {
        match self {
            MailgunError::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Returns true for configuration errors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, MailgunError::Configuration { .. })
    }

    /// Returns true for validation errors.
    pub fn is_validation(&self) -> bool {
        matches!(self, MailgunError::Validation { .. })
    }

    /// Returns true for API and transport errors.
    pub fn is_api(&self) -> bool {
        matches!(self, MailgunError::Api { .. })
    }
}

impl From<reqwest::Error> for MailgunError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("Request to Mailgun timed out: {}", err)
        } else if err.is_connect() {
            format!("Failed to connect to Mailgun: {}", err)
        } else {
            format!("HTTP request to Mailgun failed: {}", err)
        };
        MailgunError::transport(message, err)
    }
}

impl From<crate::config::ConfigError> for MailgunError {
    fn from(err: crate::config::ConfigError) -> Self {
        MailgunError::configuration(err.to_string())
    }
}

/// Result type alias for Mailgun operations.
pub type MailgunResult<T> = Result<T, MailgunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display_is_bare_message() {
        let error = MailgunError::configuration("Domain for Mailgun could not found.");
        assert_eq!(error.to_string(), "Domain for Mailgun could not found.");
        assert!(error.is_configuration());
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_validation_field() {
        let error = MailgunError::invalid_field("X-Mailgun-Tag", "bad tags");
        assert!(error.is_validation());
        assert_eq!(error.field(), Some("X-Mailgun-Tag"));
        assert_eq!(error.to_string(), "bad tags");
    }

    #[test]
    fn test_api_error_carries_status_and_body() {
        let error = MailgunError::api(403, "Forbidden");
        assert!(error.is_api());
        assert_eq!(error.status(), Some(403));
        assert_eq!(error.body(), Some("Forbidden"));
        assert_eq!(error.to_string(), "Mailgun API error (403): Forbidden");
    }

    #[test]
    fn test_transport_error_has_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = MailgunError::transport("Failed to connect to Mailgun", io);

        assert!(error.is_api());
        assert_eq!(error.status(), None);
        assert_eq!(error.body(), Some(""));
        assert!(std::error::Error::source(&error).is_some());
    }
}
