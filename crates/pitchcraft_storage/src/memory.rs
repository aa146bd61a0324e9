//! In-process media storage.

use crate::storage::compute_hash;
use crate::{MediaMetadata, MediaReference, MediaStore};
use pitchcraft_error::{PitchcraftResult, StorageError, StorageErrorKind};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// Media held in process memory, addressed as `local://<uuid>`.
///
/// The in-process analogue of a browser object URL: bytes stay alive until
/// the reference is released.
#[derive(Debug, Default)]
pub struct InMemoryMediaStore {
    entries: Mutex<HashMap<Uuid, Vec<u8>>>,
    releases: AtomicUsize,
}

impl InMemoryMediaStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of references currently holding bytes.
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    /// Number of successful releases since creation.
    pub fn release_count(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Vec<u8>>> {
        // A poisoned map is still structurally valid
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl MediaStore for InMemoryMediaStore {
    #[tracing::instrument(skip(self, data, metadata), fields(size = data.len(), media_type = %metadata.media_type))]
    async fn store(
        &self,
        data: &[u8],
        metadata: &MediaMetadata,
    ) -> PitchcraftResult<MediaReference> {
        let id = Uuid::new_v4();
        let reference = MediaReference {
            id,
            content_hash: compute_hash(data),
            storage_backend: "memory".to_string(),
            location: format!("local://{}", id),
            size_bytes: data.len() as u64,
            media_type: metadata.media_type,
            mime_type: metadata.mime_type.clone(),
        };

        self.lock().insert(id, data.to_vec());
        tracing::debug!(location = %reference.location, "Stored media in memory");
        Ok(reference)
    }

    async fn retrieve(&self, reference: &MediaReference) -> PitchcraftResult<Vec<u8>> {
        self.lock().get(&reference.id).cloned().ok_or_else(|| {
            StorageError::new(StorageErrorKind::NotFound(reference.location.clone())).into()
        })
    }

    fn release(&self, reference: &MediaReference) -> PitchcraftResult<()> {
        match self.lock().remove(&reference.id) {
            Some(_) => {
                self.releases.fetch_add(1, Ordering::SeqCst);
                tracing::debug!(location = %reference.location, "Released media");
                Ok(())
            }
            None => Err(StorageError::new(StorageErrorKind::NotFound(reference.location.clone())).into()),
        }
    }

    fn exists(&self, reference: &MediaReference) -> bool {
        self.lock().contains_key(&reference.id)
    }
}
