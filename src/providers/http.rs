use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use std::time::Duration;

use crate::app_config::PunctuationConfig;
use crate::errors::ProviderError;
use crate::providers::PunctuationService;

/// Client for a remote punctuation restoration service
#[derive(Debug, Clone)]
pub struct HttpPunctuator {
    /// HTTP client for service requests
    client: Client,
    /// Service endpoint URL
    endpoint: String,
    /// Form field carrying the text
    form_field: String,
    /// Request timeout in seconds
    timeout_secs: u64,
}

impl HttpPunctuator {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>, form_field: impl Into<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self::with_client(client, endpoint, form_field, timeout_secs)
    }

    /// Create a client around an existing HTTP client
    pub fn with_client(
        client: Client,
        endpoint: impl Into<String>,
        form_field: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            form_field: form_field.into(),
            timeout_secs,
        }
    }

    /// Create a client from configuration
    pub fn from_config(config: &PunctuationConfig) -> Self {
        Self::new(&config.endpoint, &config.form_field, config.timeout_secs)
    }

    /// Endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ProviderError::ConnectionError(e.to_string())
        } else {
            ProviderError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl PunctuationService for HttpPunctuator {
    async fn restore(&self, text: &str) -> Result<String, ProviderError> {
        debug!("Requesting punctuation for {} chars", text.len());

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[(self.form_field.as_str(), text)])
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Punctuation service error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(self.timeout_secs)
            } else {
                ProviderError::ParseError(e.to_string())
            }
        })?;

        Ok(body.trim().to_string())
    }
}
