//! Mailgun error response mapping.
//!
//! Mailgun answers failed requests either with a JSON body such as
//!
//! ```json
//! { "message": "'from' parameter is missing" }
//! ```
//!
//! or with plain text (`Forbidden` for a bad API key). The raw body is always
//! kept on the error; the JSON `message` field, when present, is used for the
//! human-readable description.

use serde::Deserialize;

use super::MailgunError;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map a non-2xx Mailgun response to a [`MailgunError::Api`].
///
/// # Examples
///
/// ```rust
/// use integrations_mailgun::error::map_response_error;
///
/// let error = map_response_error(400, r#"{"message": "'to' parameter is missing"}"#);
/// assert_eq!(error.status(), Some(400));
/// assert_eq!(error.to_string(), "Mailgun API error (400): 'to' parameter is missing");
/// ```
pub fn map_response_error(status: u16, body: &str) -> MailgunError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.message)
        .unwrap_or_else(|_| body.trim().to_string());

    MailgunError::Api {
        message: format!("Mailgun API error ({}): {}", status, detail),
        status: Some(status),
        body: body.to_string(),
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_body() {
        let error = map_response_error(403, "Forbidden");
        assert_eq!(error.status(), Some(403));
        assert_eq!(error.body(), Some("Forbidden"));
        assert_eq!(error.to_string(), "Mailgun API error (403): Forbidden");
    }

    #[test]
    fn test_json_body_message_is_extracted() {
        let body = r#"{"message": "Domain not found: example.com"}"#;
        let error = map_response_error(404, body);

        assert_eq!(error.body(), Some(body));
        assert_eq!(
            error.to_string(),
            "Mailgun API error (404): Domain not found: example.com"
        );
    }

    #[test]
    fn test_json_without_message_falls_back_to_body() {
        let error = map_response_error(500, r#"{"error": "boom"}"#);
        assert_eq!(error.to_string(), r#"Mailgun API error (500): {"error": "boom"}"#);
    }
}
