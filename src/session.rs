use crate::{
    client::AdClient,
    error::{AdError, Result},
    image::SelectedImage,
    models::{GeneratedAd, Template},
};

#[derive(Debug, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(GeneratedAd),
    Failed(AdError),
}

impl SubmissionState {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded(_) => "succeeded",
            SubmissionState::Failed(_) => "failed",
        }
    }
}

/// State of one generate screen: the picked image, the picked template and
/// the outcome of the last submission. Changing either input discards the
/// previous outcome.
#[derive(Debug, Default)]
pub struct AdSession {
    image: Option<SelectedImage>,
    template: Option<Template>,
    state: SubmissionState,
}

impl AdSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(template: Template) -> Self {
        Self {
            template: Some(template),
            ..Self::default()
        }
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    pub fn template(&self) -> Option<Template> {
        self.template
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn select_image(&mut self, image: SelectedImage) {
        log::debug!("Image selected: {}", image.name());
        self.image = Some(image);
        self.state = SubmissionState::Idle;
    }

    pub fn clear_image(&mut self) {
        self.image = None;
        self.state = SubmissionState::Idle;
    }

    pub fn select_template(&mut self, template: Template) {
        log::debug!("Template selected: {}", template);
        self.template = Some(template);
        self.state = SubmissionState::Idle;
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting)
    }

    pub fn can_submit(&self) -> bool {
        self.image.is_some() && self.template.is_some() && !self.is_submitting()
    }

    /// Back to idle. Needed if a submit future was dropped mid-flight.
    pub fn reset(&mut self) {
        self.state = SubmissionState::Idle;
    }

    pub fn into_state(self) -> SubmissionState {
        self.state
    }

    pub fn result(&self) -> Option<&GeneratedAd> {
        match &self.state {
            SubmissionState::Succeeded(ad) => Some(ad),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AdError> {
        match &self.state {
            SubmissionState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Runs one submission and records its outcome.
    ///
    /// Missing inputs and an already running submission are returned as
    /// errors and leave the state untouched; everything the client reports
    /// ends up in [`SubmissionState::Failed`].
    pub async fn submit(&mut self, client: &AdClient) -> Result<&SubmissionState> {
        if self.is_submitting() {
            return Err(AdError::SubmissionInProgress);
        }
        let image = self.image.as_ref().ok_or(AdError::MissingImage)?;
        let template = self.template.ok_or(AdError::MissingTemplate)?;

        self.state = SubmissionState::Submitting;
        self.state = match client.generate(image, template).await {
            Ok(ad) => SubmissionState::Succeeded(ad),
            Err(err) => SubmissionState::Failed(err),
        };
        Ok(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::AdBackend;
    use crate::models::{GenerateRequest, GenerateResponse};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    struct EchoTemplate;

    #[async_trait]
    impl AdBackend for EchoTemplate {
        async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
            if request.template == "discount_ad" {
                Ok(GenerateResponse::new(json!({ "error": "no discount found" })))
            } else {
                Ok(GenerateResponse::new(json!({ "result": request.template })))
            }
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    fn client() -> AdClient {
        AdClient::with_backend(Arc::new(EchoTemplate), Duration::from_secs(30))
    }

    fn image() -> SelectedImage {
        SelectedImage::from_bytes("shoe.png", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn requires_image_and_template() {
        let client = client();
        let mut session = AdSession::new();
        assert!(!session.can_submit());

        let err = session.submit(&client).await.unwrap_err();
        assert!(matches!(err, AdError::MissingImage));

        session.select_image(image());
        let err = session.submit(&client).await.unwrap_err();
        assert!(matches!(err, AdError::MissingTemplate));
        assert_eq!(session.state().label(), "idle");
    }

    #[tokio::test]
    async fn records_success_then_resets_on_new_input() {
        let client = client();
        let mut session = AdSession::with_template(Template::FeatureHighlight);
        session.select_image(image());

        let state = session.submit(&client).await.unwrap();
        assert_eq!(state.label(), "succeeded");
        assert_eq!(
            session.result().map(|ad| ad.content.as_str()),
            Some("feature_highlight")
        );

        session.select_template(Template::SimpleAd);
        assert_eq!(session.state().label(), "idle");
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn records_failure() {
        let client = client();
        let mut session = AdSession::with_template(Template::DiscountAd);
        session.select_image(image());

        session.submit(&client).await.unwrap();
        assert!(matches!(
            session.error(),
            Some(AdError::ApplicationError { message }) if message == "no discount found"
        ));

        session.clear_image();
        assert!(session.error().is_none());
        assert!(session.image().is_none());
    }

    #[tokio::test]
    async fn refuses_while_submitting() {
        let client = client();
        let mut session = AdSession::with_template(Template::SimpleAd);
        session.select_image(image());
        session.state = SubmissionState::Submitting;

        assert!(!session.can_submit());
        let err = session.submit(&client).await.unwrap_err();
        assert!(matches!(err, AdError::SubmissionInProgress));

        session.reset();
        assert!(session.submit(&client).await.is_ok());
    }
}
