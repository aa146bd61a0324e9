//! Generated marketing image payload.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pitchcraft_error::{StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};

/// Default filename used when exporting the collage.
pub const IMAGE_EXPORT_FILENAME: &str = "marketing-collage.png";

/// Base64-encoded image returned inline by the provider.
///
/// # Examples
///
/// ```
/// use pitchcraft_core::GeneratedImage;
///
/// let image = GeneratedImage::new("iVBORw0KGgo=", None);
/// assert_eq!(image.mime_type, "image/png");
/// assert!(image.data_url().starts_with("data:image/png;base64,"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Base64 payload as returned by the provider
    pub data: String,
    /// MIME type of the decoded image
    pub mime_type: String,
}

impl GeneratedImage {
    /// Wrap a base64 payload, defaulting the MIME type to PNG.
    pub fn new(data: impl Into<String>, mime_type: Option<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.unwrap_or_else(|| "image/png".to_string()),
        }
    }

    /// Inline `data:` URL suitable for direct display.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the payload to raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayload` if the payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, StorageError> {
        STANDARD
            .decode(self.data.trim())
            .map_err(|e| StorageError::new(StorageErrorKind::InvalidPayload(e.to_string())))
    }
}
