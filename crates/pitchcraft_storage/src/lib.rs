//! Locally addressable media handles for Pitchcraft.
//!
//! Downloaded media (the generated marketing video) lives in a
//! [`MediaStore`] and is addressed through a [`LocalMedia`] handle. A handle
//! owns its backing storage: it is released exactly once, either explicitly
//! through [`LocalMedia::release`] or when the handle is dropped.
//!
//! # Example
//!
//! ```rust
//! use pitchcraft_storage::{InMemoryMediaStore, LocalMedia, MediaMetadata};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryMediaStore::new());
//! let handle = LocalMedia::store(store.clone(), b"mp4 bytes", &MediaMetadata::video()).await?;
//! assert!(handle.url().starts_with("local://"));
//!
//! drop(handle);
//! assert_eq!(store.live_count(), 0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod handle;
mod memory;
mod media_type;
mod storage;

pub use filesystem::FileSystemMediaStore;
pub use handle::LocalMedia;
pub use media_type::MediaType;
pub use memory::InMemoryMediaStore;
pub use pitchcraft_error::{StorageError, StorageErrorKind};
pub use storage::{MediaMetadata, MediaReference, MediaStore};
