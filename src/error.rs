use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdError {
    #[error("Image data is empty or corrupted")]
    EmptyImage,
    #[error("Failed to read image {path}: {reason}")]
    ImageUnreadable { path: String, reason: String },
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),
    #[error("Failed to convert image to base64: {0}")]
    EncodingFailure(String),
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
    #[error("Request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),
    #[error("Cannot connect to server: {0}")]
    NetworkUnreachable(String),
    #[error("Server error: {status}{}", body_suffix(.body))]
    ServerError { status: u16, body: String },
    #[error("Generation failed: {message}")]
    ApplicationError { message: String },
    #[error("Response error: {0}")]
    InvalidResponse(String),
    #[error("Please select an image first")]
    MissingImage,
    #[error("Please select a template first")]
    MissingTemplate,
    #[error("A submission is already in progress")]
    SubmissionInProgress,
    #[error("Configuration error: {0}")]
    Config(String),
}

fn body_suffix(body: &str) -> String {
    if body.trim().is_empty() {
        " - Unable to read error details".to_string()
    } else {
        format!(" - {}", body.trim())
    }
}

impl AdError {
    /// Short heading for an alert or error panel.
    pub fn title(&self) -> &'static str {
        match self {
            AdError::EmptyImage
            | AdError::ImageUnreadable { .. }
            | AdError::UnsupportedImage(_)
            | AdError::EncodingFailure(_) => "Image Error",
            AdError::UnknownTemplate(_) | AdError::MissingTemplate => "Template Required",
            AdError::MissingImage => "Image Required",
            AdError::Timeout(_) => "Request Timeout",
            AdError::NetworkUnreachable(_) => "Server Connection Failed",
            AdError::ServerError { .. } => "Server Error",
            AdError::ApplicationError { .. } | AdError::InvalidResponse(_) => "Generation Failed",
            AdError::SubmissionInProgress => "Please Wait",
            AdError::Config(_) => "Configuration Error",
        }
    }

    /// Human-readable description with a remediation hint where one exists.
    pub fn user_message(&self) -> String {
        match self {
            AdError::EmptyImage | AdError::EncodingFailure(_) => format!(
                "{}.\n\nPlease try again with a different image.",
                self
            ),
            AdError::Timeout(_) => {
                "The server is taking too long to respond. Please try again.".to_string()
            }
            AdError::NetworkUnreachable(_) => "Please make sure:\n\
                 • Backend server is running\n\
                 • The configured backend address is correct\n\
                 • No firewall is blocking the connection"
                .to_string(),
            AdError::ServerError { .. } => {
                format!("{}.\n\nCheck the backend server logs.", self)
            }
            other => other.to_string(),
        }
    }

    /// Whether the failure happened before anything was sent over the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            AdError::EmptyImage
                | AdError::ImageUnreadable { .. }
                | AdError::UnsupportedImage(_)
                | AdError::EncodingFailure(_)
                | AdError::UnknownTemplate(_)
                | AdError::MissingImage
                | AdError::MissingTemplate
                | AdError::SubmissionInProgress
                | AdError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AdError>;
