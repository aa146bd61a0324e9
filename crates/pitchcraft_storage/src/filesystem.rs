//! Filesystem-backed media storage.
//!
//! Each stored item gets its own file so that releasing one handle never
//! affects another, even when the bytes are identical.

use crate::storage::compute_hash;
use crate::{MediaMetadata, MediaReference, MediaStore, MediaType};
use pitchcraft_error::{PitchcraftResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem storage backend.
///
/// Layout: `{base_path}/{type}/{hash[0:2]}/{id}.{ext}`
///
/// ```text
/// media/
/// ├── images/
/// │   └── ab/
/// │       └── 3f2c...e1.png
/// └── video/
///     └── ef/
///         └── 90d1...7a.mp4
/// ```
///
/// Writes go to a temp file and are renamed into place. Reads verify the
/// content hash recorded at store time.
#[derive(Debug)]
pub struct FileSystemMediaStore {
    base_path: PathBuf,
}

impl FileSystemMediaStore {
    /// Create a new filesystem store, creating the base directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> PitchcraftResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem media store");
        Ok(Self { base_path })
    }

    /// Root directory of this store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn get_path(&self, hash: &str, id: Uuid, media_type: MediaType) -> PathBuf {
        self.base_path
            .join(media_type.directory())
            .join(&hash[0..2])
            .join(format!("{}.{}", id, media_type.default_extension()))
    }

    fn verify_hash(data: &[u8], expected_hash: &str) -> PitchcraftResult<()> {
        let actual_hash = compute_hash(data);
        if actual_hash != expected_hash {
            return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "Hash mismatch: expected {}, got {}",
                expected_hash, actual_hash
            )))
            .into());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MediaStore for FileSystemMediaStore {
    #[tracing::instrument(skip(self, data, metadata), fields(size = data.len(), media_type = %metadata.media_type))]
    async fn store(
        &self,
        data: &[u8],
        metadata: &MediaMetadata,
    ) -> PitchcraftResult<MediaReference> {
        let hash = compute_hash(data);
        let id = Uuid::new_v4();
        let path = self.get_path(&hash, id, metadata.media_type);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(
            hash = %hash,
            path = %path.display(),
            size = data.len(),
            "Stored media file"
        );

        Ok(MediaReference {
            id,
            content_hash: hash,
            storage_backend: "filesystem".to_string(),
            location: path.to_string_lossy().to_string(),
            size_bytes: data.len() as u64,
            media_type: metadata.media_type,
            mime_type: metadata.mime_type.clone(),
        })
    }

    #[tracing::instrument(skip(self, reference), fields(path = %reference.location))]
    async fn retrieve(&self, reference: &MediaReference) -> PitchcraftResult<Vec<u8>> {
        let path = Path::new(&reference.location);

        let data = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(reference.location.clone()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        Self::verify_hash(&data, &reference.content_hash)?;
        Ok(data)
    }

    #[tracing::instrument(skip(self, reference), fields(path = %reference.location))]
    fn release(&self, reference: &MediaReference) -> PitchcraftResult<()> {
        let path = Path::new(&reference.location);

        std::fs::remove_file(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(reference.location.clone()))
            } else {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "delete {}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::debug!(path = %path.display(), "Released media file");
        Ok(())
    }

    fn exists(&self, reference: &MediaReference) -> bool {
        Path::new(&reference.location).exists()
    }
}
