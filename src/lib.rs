//! Client for an ad-generation backend.
//!
//! Pick an image and a [`Template`], hand them to an [`AdClient`], and get the
//! generated ad back or a classified [`AdError`]. [`AdSession`] tracks the
//! state of one generate screen on top of that.

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod image;
pub mod logger;
pub mod models;
pub mod session;

pub use backend::{AdBackend, HttpAdBackend};
pub use client::AdClient;
pub use config::ClientConfig;
pub use error::{AdError, Result};
pub use image::SelectedImage;
pub use models::{AdContent, GenerateRequest, GenerateResponse, GeneratedAd, Template};
pub use session::{AdSession, SubmissionState};
