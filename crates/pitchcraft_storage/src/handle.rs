//! Owned handle to stored media.

use crate::{MediaMetadata, MediaReference, MediaStore};
use pitchcraft_error::PitchcraftResult;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exclusive, locally addressable handle to stored media.
///
/// The backing resource is released exactly once: by the first call to
/// [`LocalMedia::release`], or on drop if it was never released. The handle
/// is deliberately not `Clone`.
#[derive(Debug)]
pub struct LocalMedia {
    reference: MediaReference,
    store: Arc<dyn MediaStore>,
    released: AtomicBool,
}

impl LocalMedia {
    /// Wrap an existing reference owned by `store`.
    pub fn new(store: Arc<dyn MediaStore>, reference: MediaReference) -> Self {
        Self {
            reference,
            store,
            released: AtomicBool::new(false),
        }
    }

    /// Store `data` and return a handle owning it.
    ///
    /// # Errors
    ///
    /// Propagates the backend's storage error.
    pub async fn store(
        store: Arc<dyn MediaStore>,
        data: &[u8],
        metadata: &MediaMetadata,
    ) -> PitchcraftResult<Self> {
        let reference = store.store(data, metadata).await?;
        Ok(Self::new(store, reference))
    }

    /// Locally addressable location (`local://<uuid>` or a file path).
    pub fn url(&self) -> &str {
        &self.reference.location
    }

    /// Full storage reference.
    pub fn reference(&self) -> &MediaReference {
        &self.reference
    }

    /// MIME type of the stored media.
    pub fn mime_type(&self) -> &str {
        &self.reference.mime_type
    }

    /// Whether the backing resource has been released.
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    /// Read the stored bytes.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` after release.
    pub async fn bytes(&self) -> PitchcraftResult<Vec<u8>> {
        self.store.retrieve(&self.reference).await
    }

    /// Release the backing resource.
    ///
    /// Returns `true` if this call performed the release, `false` if the
    /// handle was already released.
    pub fn release(&self) -> bool {
        if self.released.swap(true, Ordering::SeqCst) {
            return false;
        }
        if let Err(e) = self.store.release(&self.reference) {
            tracing::warn!(error = %e, location = %self.reference.location, "Failed to release media");
        }
        true
    }
}

impl Drop for LocalMedia {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryMediaStore;

    #[tokio::test]
    async fn explicit_release_then_drop_releases_once() {
        let store = Arc::new(InMemoryMediaStore::new());
        let handle = LocalMedia::store(store.clone(), b"video", &MediaMetadata::video())
            .await
            .unwrap();

        assert!(handle.release());
        assert!(!handle.release());
        assert!(handle.is_released());
        drop(handle);

        assert_eq!(store.release_count(), 1);
        assert_eq!(store.live_count(), 0);
    }

    #[tokio::test]
    async fn drop_releases_unreleased_handle() {
        let store = Arc::new(InMemoryMediaStore::new());
        {
            let handle = LocalMedia::store(store.clone(), b"video", &MediaMetadata::video())
                .await
                .unwrap();
            assert_eq!(handle.bytes().await.unwrap(), b"video");
            assert_eq!(store.live_count(), 1);
        }
        assert_eq!(store.live_count(), 0);
        assert_eq!(store.release_count(), 1);
    }
}
