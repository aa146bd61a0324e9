//! Storage trait definition.

use crate::MediaType;
use pitchcraft_error::PitchcraftResult;
use uuid::Uuid;

/// Metadata about media being stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMetadata {
    /// Type of media (image, video)
    pub media_type: MediaType,
    /// MIME type (e.g., "image/png", "video/mp4")
    pub mime_type: String,
}

impl MediaMetadata {
    /// Metadata for a downloaded MP4 video.
    pub fn video() -> Self {
        Self {
            media_type: MediaType::Video,
            mime_type: "video/mp4".to_string(),
        }
    }

    /// Metadata for a PNG image.
    pub fn image() -> Self {
        Self {
            media_type: MediaType::Image,
            mime_type: "image/png".to_string(),
        }
    }
}

/// Reference to stored media.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaReference {
    /// Unique identifier for this reference
    pub id: Uuid,
    /// SHA-256 hash of the content
    pub content_hash: String,
    /// Storage backend name (e.g., "memory", "filesystem")
    pub storage_backend: String,
    /// Locally addressable location (`local://<id>` or a filesystem path)
    pub location: String,
    /// Size of the media in bytes
    pub size_bytes: u64,
    /// Type of media
    pub media_type: MediaType,
    /// MIME type
    pub mime_type: String,
}

/// Backend holding downloaded media for the lifetime of its handles.
///
/// `release` is synchronous so that it can run from `Drop`.
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync + std::fmt::Debug {
    /// Store media and return a reference to it.
    async fn store(&self, data: &[u8], metadata: &MediaMetadata)
    -> PitchcraftResult<MediaReference>;

    /// Read media back by reference.
    async fn retrieve(&self, reference: &MediaReference) -> PitchcraftResult<Vec<u8>>;

    /// Reclaim the backing resource.
    ///
    /// Releasing an unknown or already released reference returns
    /// `StorageErrorKind::NotFound`.
    fn release(&self, reference: &MediaReference) -> PitchcraftResult<()>;

    /// Whether the reference still resolves to stored media.
    fn exists(&self, reference: &MediaReference) -> bool;
}

/// Compute the SHA-256 hex digest of data.
pub(crate) fn compute_hash(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
