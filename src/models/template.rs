use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AdError;

/// Layouts the backend knows how to render.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    #[default]
    SimpleAd,
    DiscountAd,
    FeatureHighlight,
}

impl Template {
    pub const ALL: [Template; 3] = [
        Template::SimpleAd,
        Template::DiscountAd,
        Template::FeatureHighlight,
    ];

    /// Wire identifier sent to the backend.
    pub fn id(&self) -> &'static str {
        match self {
            Template::SimpleAd => "simple_ad",
            Template::DiscountAd => "discount_ad",
            Template::FeatureHighlight => "feature_highlight",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Template::SimpleAd => "Classic Minimal",
            Template::DiscountAd => "Promotional Pro",
            Template::FeatureHighlight => "Feature Showcase",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Template::SimpleAd => {
                "Clean and professional advertisement with headline, subheadline, and call-to-action"
            }
            Template::DiscountAd => {
                "High-impact promotional advertisement with discount information and validity period"
            }
            Template::FeatureHighlight => {
                "Product feature showcase with bullet points and compelling benefits"
            }
        }
    }

    /// Fields the backend fills in, in layout order.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Template::SimpleAd => &["headline", "subheadline", "cta"],
            Template::DiscountAd => &["headline", "discount", "valid_until", "cta"],
            Template::FeatureHighlight => &["headline", "feature1", "feature2", "cta"],
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Template {
    type Err = AdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Template::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AdError::UnknownTemplate(wanted.to_string()))
    }
}
