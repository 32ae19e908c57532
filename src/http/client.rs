//! reqwest-based implementation of [`HttpClient`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use secrecy::ExposeSecret;

use super::{HttpClient, HttpResponse, MessagesRequest};
use crate::config::MailgunConfig;
use crate::encoder::{PartBody, WirePart, WirePayload};
use crate::error::{MailgunError, MailgunResult};

/// HTTP client backed by reqwest.
///
/// Wire parts become a `multipart/form-data` body; reqwest generates the
/// boundary and the matching `Content-Type` header. File parts are opened at
/// send time and streamed, not read into memory.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a client with the given timeouts and optional user agent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use integrations_mailgun::http::ReqwestHttpClient;
    ///
    /// let client = ReqwestHttpClient::new(
    ///     Duration::from_secs(30),
    ///     Duration::from_secs(10),
    ///     None,
    /// );
    /// assert!(client.is_ok());
    /// ```
    pub fn new(
        timeout: Duration,
        connect_timeout: Duration,
        user_agent: Option<&str>,
    ) -> MailgunResult<Self> {
        let mut builder = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout);
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent.to_string());
        }

        let client = builder.build().map_err(|e| {
            MailgunError::transport(format!("Failed to create HTTP client: {}", e), e)
        })?;

        Ok(Self { client })
    }

    /// Create a client from the timeouts and user agent of a configuration.
    pub fn from_config(config: &MailgunConfig) -> MailgunResult<Self> {
        Self::new(
            config.timeout,
            config.connect_timeout,
            config.user_agent.as_deref(),
        )
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn build_form(payload: WirePayload) -> MailgunResult<Form> {
        let mut form = Form::new();
        for part in payload.into_parts() {
            let WirePart {
                name,
                body,
                content_type,
                filename,
                content_id,
            } = part;

            let mut file_part = match body {
                PartBody::Text(value) => {
                    form = form.text(name, value);
                    continue;
                }
                PartBody::Bytes(bytes) => Part::bytes(bytes),
                PartBody::File(path) => {
                    let file = tokio::fs::File::open(&path).await.map_err(|e| {
                        MailgunError::transport(
                            format!("Failed to open attachment '{}': {}", path.display(), e),
                            e,
                        )
                    })?;
                    Part::stream(Body::from(file))
                }
            };

            if let Some(filename) = filename {
                file_part = file_part.file_name(filename);
            }
            if let Some(content_type) = content_type {
                file_part = file_part.mime_str(&content_type).map_err(|e| {
                    MailgunError::invalid_field(
                        name.as_str(),
                        format!("Invalid content type '{}': {}", content_type, e),
                    )
                })?;
            }
            if let Some(content_id) = content_id {
                let mut headers = reqwest::header::HeaderMap::new();
                let value = format!("<{}>", content_id).parse().map_err(|_| {
                    MailgunError::invalid_field(
                        name.as_str(),
                        format!("Invalid content id '{}'", content_id),
                    )
                })?;
                headers.insert("content-id", value);
                file_part = file_part.headers(headers);
            }

            form = form.part(name, file_part);
        }
        Ok(form)
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post(&self, request: MessagesRequest) -> MailgunResult<HttpResponse> {
        let MessagesRequest {
            url,
            username,
            password,
            payload,
        } = request;

        let form = Self::build_form(payload).await?;

        let response = self
            .client
            .post(&url)
            .basic_auth(username, Some(password.expose_secret()))
            .multipart(form)
            .send()
            .await?;

        #[cfg(feature = "tracing")]
        tracing::debug!(url = %url, status = response.status().as_u16(), "Received Mailgun response");

        HttpResponse::from_reqwest(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_config() {
        let config = MailgunConfig::builder()
            .user_agent("mailgun-tests/1.0")
            .build()
            .unwrap();
        assert!(ReqwestHttpClient::from_config(&config).is_ok());
    }

    #[tokio::test]
    async fn test_build_form_with_text_and_bytes() {
        let mut payload = WirePayload::new();
        payload.push(WirePart::text("from", "a <a@example.com>"));
        payload.push(
            WirePart::file("inline", PartBody::Bytes(vec![1, 2]), "logo.png", "image/png")
                .with_content_id("logo"),
        );

        let form = ReqwestHttpClient::build_form(payload).await.unwrap();
        assert!(!form.boundary().is_empty());
    }

    #[tokio::test]
    async fn test_build_form_missing_file() {
        let mut payload = WirePayload::new();
        payload.push(WirePart::file(
            "attachment",
            PartBody::File("/definitely/not/here.pdf".into()),
            "here.pdf",
            "application/pdf",
        ));

        let err = ReqwestHttpClient::build_form(payload).await.unwrap_err();
        assert!(err.is_api());
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_build_form_invalid_mime() {
        let mut payload = WirePayload::new();
        payload.push(WirePart::file(
            "attachment",
            PartBody::Bytes(vec![0]),
            "a.bin",
            "not a mime",
        ));

        let err = ReqwestHttpClient::build_form(payload).await.unwrap_err();
        assert!(err.is_validation());
    }
}
