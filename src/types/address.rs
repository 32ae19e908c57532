//! Email address type.

use serde::{Deserialize, Serialize};

/// An email address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress {
    /// Email address (e.g., "user@example.com").
    pub email: String,
    /// Display name (e.g., "John Doe").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl EmailAddress {
    /// Create a new email address without a display name.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
        }
    }

    /// Create a new email address with a display name.
    pub fn with_name(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: Some(display_name.into()),
        }
    }

    /// Format the address the way Mailgun expects it in address fields.
    ///
    /// The address doubles as its own display name when none is set, so the
    /// result always has the `Name <email>` shape.
    ///
    /// ```
    /// use integrations_mailgun::types::EmailAddress;
    ///
    /// assert_eq!(
    ///     EmailAddress::with_name("a@example.com", "Name").format(),
    ///     "Name <a@example.com>"
    /// );
    /// assert_eq!(
    ///     EmailAddress::new("a@example.com").format(),
    ///     "a@example.com <a@example.com>"
    /// );
    /// ```
    pub fn format(&self) -> String {
        let name = self
            .display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email);
        format!("{} <{}>", name, self.email)
    }

    /// Parse `"Name <email>"` or a bare `"email"`.
    fn parse(input: &str) -> Self {
        let input = input.trim();
        if let (Some(open), true) = (input.rfind('<'), input.ends_with('>')) {
            let email = input[open + 1..input.len() - 1].trim();
            let name = input[..open].trim().trim_matches('"').trim();
            if name.is_empty() {
                return Self::new(email);
            }
            return Self::with_name(email, name);
        }
        Self::new(input)
    }
}

impl From<String> for EmailAddress {
    fn from(email: String) -> Self {
        Self::parse(&email)
    }
}

impl From<&str> for EmailAddress {
    fn from(email: &str) -> Self {
        Self::parse(email)
    }
}

impl From<(&str, &str)> for EmailAddress {
    fn from((email, name): (&str, &str)) -> Self {
        Self::with_name(email, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_name() {
        let addr = EmailAddress::with_name("a@example.com", "Name");
        assert_eq!(addr.format(), "Name <a@example.com>");
    }

    #[test]
    fn test_format_without_name_repeats_address() {
        let addr = EmailAddress::new("a@example.com");
        assert_eq!(addr.format(), "a@example.com <a@example.com>");
    }

    #[test]
    fn test_blank_name_is_ignored() {
        let addr = EmailAddress::with_name("a@example.com", "  ");
        assert_eq!(addr.format(), "a@example.com <a@example.com>");
    }

    #[test]
    fn test_parse_angle_form() {
        let addr = EmailAddress::from("\"Jane Doe\" <jane@example.com>");
        assert_eq!(addr.email, "jane@example.com");
        assert_eq!(addr.display_name.as_deref(), Some("Jane Doe"));

        let addr = EmailAddress::from("<bare@example.com>");
        assert_eq!(addr, EmailAddress::new("bare@example.com"));
    }

    #[test]
    fn test_parse_bare_address() {
        let addr = EmailAddress::from(" plain@example.com ");
        assert_eq!(addr, EmailAddress::new("plain@example.com"));
    }

    #[test]
    fn test_tuple_conversion() {
        let addr = EmailAddress::from(("a@example.com", "Name"));
        assert_eq!(addr.format(), "Name <a@example.com>");
    }
}
