//! Send result type.

use serde::Serialize;
use serde_json::Value;

use crate::encoder::WirePayload;

/// Outcome of a successful send.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendResult {
    /// Parsed JSON body of the Mailgun response.
    pub api_response: Value,
    /// HTTP status code.
    pub response_code: u16,
    /// The encoded request payload, only present in debug mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<WirePayload>,
}

impl SendResult {
    /// The queued message ID (`id` field), if present.
    pub fn id(&self) -> Option<&str> {
        self.api_response.get("id").and_then(Value::as_str)
    }

    /// The provider's status message (`message` field), if present.
    pub fn message(&self) -> Option<&str> {
        self.api_response.get("message").and_then(Value::as_str)
    }
}
