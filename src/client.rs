use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::{
    backend::{AdBackend, HttpAdBackend},
    config::ClientConfig,
    error::{AdError, Result},
    image::{encode_base64, SelectedImage},
    logger,
    models::{AdContent, GenerateRequest, GeneratedAd, Template},
};

/// Sends one image + template to the backend per call. No retries.
#[derive(Clone)]
pub struct AdClient {
    backend: Arc<dyn AdBackend>,
    timeout: Duration,
}

impl AdClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let backend = HttpAdBackend::new(config)?;
        log::info!("Ad backend ({}): {}", backend.name(), backend.generate_url());
        Ok(Self::with_backend(Arc::new(backend), config.timeout))
    }

    pub fn with_backend(backend: Arc<dyn AdBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the generated content as plain text (copy, URL, or raw JSON).
    pub async fn submit(&self, image: &SelectedImage, template: Template) -> Result<String> {
        self.generate(image, template)
            .await
            .map(|ad| ad.content.into_string())
    }

    /// Reads, encodes and sends `image`, all under the configured timeout.
    ///
    /// When the timeout fires the in-flight request is dropped and whatever
    /// was received so far is discarded.
    pub async fn generate(&self, image: &SelectedImage, template: Template) -> Result<GeneratedAd> {
        let request_id = Uuid::new_v4().to_string();
        let timer = logger::timer(&format!("generate_ad {}", request_id));

        log::info!(
            "Generating ad [req:{}] image={} template={}",
            request_id,
            image.name(),
            template
        );

        let outcome = match tokio::time::timeout(self.timeout, self.run(image, template)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(AdError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(content) => {
                let elapsed = timer.elapsed();
                log::info!(
                    "Ad generated [req:{}] in {}ms",
                    request_id,
                    elapsed.as_millis()
                );
                Ok(GeneratedAd {
                    request_id,
                    template,
                    content,
                    elapsed,
                })
            }
            Err(e) => {
                log::error!("Ad generation failed [req:{}]: {}", request_id, e);
                Err(e)
            }
        }
    }

    pub async fn health_check(&self) -> Result<bool> {
        tokio::time::timeout(self.timeout, self.backend.health_check())
            .await
            .unwrap_or(Err(AdError::Timeout(self.timeout)))
    }

    async fn run(&self, image: &SelectedImage, template: Template) -> Result<AdContent> {
        let bytes = image.read().await?;
        let encoded = encode_base64(&bytes)?;
        log::debug!(
            "Encoded {} image bytes into {} base64 chars",
            bytes.len(),
            encoded.len()
        );
        drop(bytes);

        let request = GenerateRequest::new(encoded, template)?;
        let response = self.backend.generate(&request).await?;

        if let Some(message) = response.error_message() {
            return Err(AdError::ApplicationError { message });
        }
        Ok(response.content())
    }
}
