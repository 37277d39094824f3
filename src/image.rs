use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{AdError, Result};

pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// Image picked by the user, not yet read.
#[derive(Clone, PartialEq, Eq)]
pub enum SelectedImage {
    Path(PathBuf),
    Blob { name: String, data: Vec<u8> },
}

impl SelectedImage {
    /// Accepts only the extensions the upload drop zone allows.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension {
            Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => {
                Ok(SelectedImage::Path(path))
            }
            _ => Err(AdError::UnsupportedImage(format!(
                "{} (expected one of: {})",
                path.display(),
                SUPPORTED_EXTENSIONS.join(", ")
            ))),
        }
    }

    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        SelectedImage::Blob {
            name: name.into(),
            data,
        }
    }

    /// Parses `data:image/<type>;base64,<payload>` as produced by browser file readers.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| AdError::EncodingFailure("not a data URI".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| AdError::EncodingFailure("data URI has no payload".into()))?;
        let mime = header.strip_suffix(";base64").ok_or_else(|| {
            AdError::EncodingFailure("data URI is not base64 encoded".into())
        })?;

        let subtype = mime
            .strip_prefix("image/")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AdError::UnsupportedImage(format!("data URI of type '{}'", mime)))?;

        let data = STANDARD
            .decode(payload.trim())
            .map_err(|e| AdError::EncodingFailure(format!("invalid base64 payload: {}", e)))?;

        Ok(SelectedImage::Blob {
            name: format!("upload.{}", subtype),
            data,
        })
    }

    pub fn name(&self) -> Cow<'_, str> {
        match self {
            SelectedImage::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy()),
            SelectedImage::Blob { name, .. } => Cow::Borrowed(name.as_str()),
        }
    }

    /// Reads the full image into memory. Zero bytes is an error.
    pub async fn read(&self) -> Result<Cow<'_, [u8]>> {
        let bytes = match self {
            SelectedImage::Path(path) => Cow::Owned(read_file(path).await?),
            SelectedImage::Blob { data, .. } => Cow::Borrowed(data.as_slice()),
        };

        if bytes.is_empty() {
            return Err(AdError::EmptyImage);
        }
        Ok(bytes)
    }
}

impl fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectedImage::Path(path) => f.debug_tuple("Path").field(path).finish(),
            SelectedImage::Blob { name, data } => f
                .debug_struct("Blob")
                .field("name", name)
                .field("len", &data.len())
                .finish(),
        }
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| AdError::ImageUnreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

/// Standard base64 with padding and no `data:` prefix.
pub fn encode_base64(bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Err(AdError::EmptyImage);
    }
    let encoded = STANDARD.encode(bytes);
    if encoded.is_empty() {
        return Err(AdError::EncodingFailure("encoder produced no output".into()));
    }
    Ok(encoded)
}
