use std::error::Error as _;

use crate::{
    backend::traits::AdBackend,
    config::ClientConfig,
    error::{AdError, Result},
    models::{GenerateRequest, GenerateResponse},
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// JSON-over-HTTP backend, `POST <backend_url><endpoint>`.
#[derive(Clone)]
pub struct HttpAdBackend {
    client: Client,
    base_url: String,
    generate_url: String,
}

impl HttpAdBackend {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .build()
            .map_err(|e| AdError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
            generate_url: config.generate_url(),
        })
    }

    pub fn generate_url(&self) -> &str {
        &self.generate_url
    }
}

#[async_trait]
impl AdBackend for HttpAdBackend {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        log::debug!(
            "POST {} (template: {}, payload: {} base64 chars)",
            self.generate_url,
            request.template,
            request.image.len()
        );

        let response = self
            .client
            .post(&self.generate_url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        log::debug!("Backend response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                log::warn!("Unable to read error details: {}", e);
                String::new()
            });
            return Err(AdError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(transport_error)?;
        let body: Value = serde_json::from_str(&text).map_err(|e| {
            AdError::InvalidResponse(format!("backend did not return JSON: {}", e))
        })?;

        Ok(GenerateResponse::new(body))
    }

    /// `Ok(false)` on a 5xx answer, `Ok(true)` on any other status.
    /// An unreachable server is a `NetworkUnreachable` error, not `false`.
    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        log::debug!("Health check {} -> {}", self.base_url, status);
        Ok(!status.is_server_error())
    }

    fn name(&self) -> &str {
        "http"
    }
}

// reqwest's top-level message hides the cause ("connection refused" etc.)
// in the source chain.
fn transport_error(err: reqwest::Error) -> AdError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    AdError::NetworkUnreachable(message)
}
