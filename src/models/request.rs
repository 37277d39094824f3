use serde::{Deserialize, Serialize};

use crate::error::{AdError, Result};
use crate::models::Template;

/// Body of `POST /generate_ad`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Base64 image bytes, without a `data:` URI prefix.
    pub image: String,
    pub template: String,
}

impl GenerateRequest {
    pub fn new(image_base64: String, template: Template) -> Result<Self> {
        if image_base64.is_empty() {
            return Err(AdError::EncodingFailure("encoded payload is empty".into()));
        }
        Ok(Self {
            image: image_base64,
            template: template.id().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_wire_shape() {
        let request = GenerateRequest::new("aGVsbG8=".into(), Template::DiscountAd).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "image": "aGVsbG8=", "template": "discount_ad" })
        );
    }

    #[test]
    fn empty_payload_is_an_encoding_failure() {
        let err = GenerateRequest::new(String::new(), Template::SimpleAd).unwrap_err();
        assert!(matches!(err, AdError::EncodingFailure(_)));
    }
}
