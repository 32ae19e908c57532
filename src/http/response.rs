//! HTTP response handling.

use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{map_response_error, MailgunError, MailgunResult};

/// A response from the Mailgun API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new response.
    ///
    /// ```rust
    /// use http::StatusCode;
    /// use integrations_mailgun::http::HttpResponse;
    ///
    /// let response = HttpResponse::new(StatusCode::OK, br#"{"id":"X"}"#.to_vec());
    /// assert!(response.is_success());
    /// ```
    pub fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Create a response from a reqwest response, reading the whole body.
    pub async fn from_reqwest(response: reqwest::Response) -> MailgunResult<Self> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| MailgunError::transport(format!("Failed to read response body: {}", e), e))?
            .to_vec();
        Ok(Self::new(status, body))
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns true for 2xx responses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The raw body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body as text (lossy UTF-8).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MailgunError::Api`] carrying the status and body when the
    /// body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> MailgunResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| MailgunError::Api {
            message: format!(
                "Failed to parse Mailgun response ({}): {}",
                self.status.as_u16(),
                e
            ),
            status: Some(self.status.as_u16()),
            body: self.text(),
            source: Some(Box::new(e)),
        })
    }

    /// Convert a non-2xx response into an error.
    pub fn into_error(self) -> MailgunError {
        map_response_error(self.status.as_u16(), &self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json() {
        let response = HttpResponse::new(
            StatusCode::OK,
            br#"{"id":"X","message":"Queued"}"#.to_vec(),
        );
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["id"], "X");
    }

    #[test]
    fn test_json_failure_keeps_body() {
        let response = HttpResponse::new(StatusCode::OK, b"<html>oops</html>".to_vec());
        let err = response.json::<serde_json::Value>().unwrap_err();

        assert_eq!(err.status(), Some(200));
        assert_eq!(err.body(), Some("<html>oops</html>"));
    }

    #[test]
    fn test_into_error() {
        let response = HttpResponse::new(StatusCode::FORBIDDEN, b"Forbidden".to_vec());
        assert!(!response.is_success());

        let err = response.into_error();
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.body(), Some("Forbidden"));
    }
}
