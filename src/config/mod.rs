//! Configuration for the Mailgun transport.
//!
//! The recognized options are:
//!
//! - `api_key`: the Mailgun private API key (never logged or printed)
//! - `domain`: the sending domain
//! - `endpoint`: the API base URL, defaulting to the US v3 endpoint
//!
//! API key and domain may be left unset here; the transport checks them on
//! every send so that a misconfigured transport fails with a
//! [`MailgunError::Configuration`](crate::error::MailgunError) before any
//! network traffic happens.

use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

pub mod error;

pub use error::ConfigError;

/// Base URL of the US Mailgun v3 API.
pub const DEFAULT_ENDPOINT: &str = "https://api.mailgun.net/v3";

/// Base URL of the EU Mailgun v3 API.
pub const EU_ENDPOINT: &str = "https://api.eu.mailgun.net/v3";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Mailgun API region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MailgunRegion {
    /// US region.
    #[default]
    Us,
    /// EU region.
    Eu,
}

impl MailgunRegion {
    /// Base URL of the region's v3 API.
    pub fn endpoint(&self) -> &'static str {
        match self {
            MailgunRegion::Us => DEFAULT_ENDPOINT,
            MailgunRegion::Eu => EU_ENDPOINT,
        }
    }
}

impl std::str::FromStr for MailgunRegion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(MailgunRegion::Us),
            "eu" => Ok(MailgunRegion::Eu),
            other => Err(ConfigError::Invalid {
                message: format!("unknown Mailgun region '{}'", other),
            }),
        }
    }
}

/// Configuration for the Mailgun transport.
#[derive(Clone)]
pub struct MailgunConfig {
    /// Mailgun private API key.
    pub api_key: Option<SecretString>,

    /// Sending domain (e.g., "mg.example.com").
    pub domain: Option<String>,

    /// API base URL without a trailing slash.
    pub endpoint: String,

    /// Timeout for the entire request.
    pub timeout: Duration,

    /// Timeout for establishing connections.
    pub connect_timeout: Duration,

    /// Custom user agent string.
    pub user_agent: Option<String>,

    /// Attach the encoded payload to every [`SendResult`](crate::types::SendResult).
    pub debug: bool,
}

impl MailgunConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_mailgun::config::MailgunConfig;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = MailgunConfig::builder()
    ///     .api_key("key-123")
    ///     .domain("mg.example.com")
    ///     .build()?;
    ///
    /// assert_eq!(
    ///     config.messages_url()?,
    ///     "https://api.mailgun.net/v3/mg.example.com/messages"
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> MailgunConfigBuilder {
        MailgunConfigBuilder::default()
    }

    /// Create a configuration from environment variables.
    ///
    /// Reads `MAILGUN_API_KEY`, `MAILGUN_DOMAIN`, `MAILGUN_ENDPOINT`,
    /// `MAILGUN_REGION` (`us` or `eu`) and `MAILGUN_DEBUG`. Missing key or
    /// domain are reported at send time, not here.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Ok(key) = std::env::var("MAILGUN_API_KEY") {
            builder = builder.api_key(key);
        }
        if let Ok(domain) = std::env::var("MAILGUN_DOMAIN") {
            builder = builder.domain(domain);
        }
        if let Ok(region) = std::env::var("MAILGUN_REGION") {
            builder = builder.region(region.parse()?);
        }
        if let Ok(endpoint) = std::env::var("MAILGUN_ENDPOINT") {
            builder = builder.endpoint(endpoint);
        }
        if let Ok(debug) = std::env::var("MAILGUN_DEBUG") {
            let debug = match debug.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "" | "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(ConfigError::Environment {
                        message: format!("MAILGUN_DEBUG has unsupported value '{}'", other),
                    })
                }
            };
            builder = builder.debug(debug);
        }

        builder.build()
    }

    /// Returns the API key, if one is configured and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
            .filter(|key| !key.is_empty())
    }

    /// Returns the sending domain, if one is configured and non-empty.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref().filter(|domain| !domain.is_empty())
    }

    /// URL of the messages resource: `{endpoint}/{domain}/messages`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when no domain is configured.
    pub fn messages_url(&self) -> Result<String, ConfigError> {
        let domain = self.domain().ok_or_else(|| ConfigError::MissingField {
            field: "domain".to_string(),
        })?;
        Ok(format!("{}/{}/messages", self.endpoint, domain))
    }
}

impl Default for MailgunConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            domain: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: None,
            debug: false,
        }
    }
}

impl fmt::Debug for MailgunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailgunConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("domain", &self.domain)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Builder for [`MailgunConfig`].
#[derive(Default)]
pub struct MailgunConfigBuilder {
    api_key: Option<SecretString>,
    domain: Option<String>,
    region: MailgunRegion,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    debug: bool,
}

impl MailgunConfigBuilder {
    /// Set the Mailgun private API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(key.into()));
        self
    }

    /// Set the sending domain.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Select the API region. Ignored when a custom endpoint is set.
    pub fn region(mut self, region: MailgunRegion) -> Self {
        self.region = region;
        self
    }

    /// Set a custom API base URL (e.g., a mock server in tests).
    ///
    /// ```
    /// use integrations_mailgun::config::MailgunConfig;
    ///
    /// let config = MailgunConfig::builder()
    ///     .endpoint("http://localhost:8080/v3/")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.endpoint, "http://localhost:8080/v3");
    /// ```
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Attach the encoded payload to send results.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the endpoint is not an absolute
    /// http(s) URL or a timeout is zero.
    pub fn build(self) -> Result<MailgunConfig, ConfigError> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| self.region.endpoint().to_string());
        let endpoint = endpoint.trim_end_matches('/').to_string();

        let parsed = url::Url::parse(&endpoint).map_err(|e| ConfigError::Invalid {
            message: format!("invalid endpoint URL '{}': {}", endpoint, e),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                message: format!("endpoint must use http or https, got '{}'", parsed.scheme()),
            });
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let connect_timeout = self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT);
        if timeout.is_zero() || connect_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                message: "timeouts must be greater than zero".to_string(),
            });
        }

        Ok(MailgunConfig {
            api_key: self.api_key,
            domain: self.domain,
            endpoint,
            timeout,
            connect_timeout,
            user_agent: self.user_agent,
            debug: self.debug,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MailgunConfig::builder().build().unwrap();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.api_key().is_none());
        assert!(config.domain().is_none());
        assert!(!config.debug);
    }

    #[test]
    fn test_eu_region() {
        let config = MailgunConfig::builder()
            .region(MailgunRegion::Eu)
            .domain("mg.example.eu")
            .build()
            .unwrap();

        assert_eq!(
            config.messages_url().unwrap(),
            "https://api.eu.mailgun.net/v3/mg.example.eu/messages"
        );
    }

    #[test]
    fn test_custom_endpoint_overrides_region() {
        let config = MailgunConfig::builder()
            .region(MailgunRegion::Eu)
            .endpoint("http://127.0.0.1:9000/")
            .build()
            .unwrap();

        assert_eq!(config.endpoint, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_endpoint() {
        let result = MailgunConfig::builder().endpoint("not a url").build();
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));

        let result = MailgunConfig::builder().endpoint("ftp://mailgun.net").build();
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = MailgunConfig::builder().timeout(Duration::ZERO).build();
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_empty_values_are_treated_as_unset() {
        let config = MailgunConfig::builder()
            .api_key("")
            .domain("")
            .build()
            .unwrap();

        assert!(config.api_key().is_none());
        assert!(config.domain().is_none());
        assert!(matches!(
            config.messages_url(),
            Err(ConfigError::MissingField { .. })
        ));
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let config = MailgunConfig::builder()
            .api_key("key-super-secret")
            .domain("mg.example.com")
            .build()
            .unwrap();

        let printed = format!("{:?}", config);
        assert!(!printed.contains("key-super-secret"));
        assert!(printed.contains("[REDACTED]"));
    }

    #[test]
    fn test_region_from_str() {
        assert_eq!("EU".parse::<MailgunRegion>().unwrap(), MailgunRegion::Eu);
        assert_eq!("us".parse::<MailgunRegion>().unwrap(), MailgunRegion::Us);
        assert!("mars".parse::<MailgunRegion>().is_err());
    }
}
