//! Error types for Pitchcraft.
//!
//! This crate provides the error types shared by every Pitchcraft crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use pitchcraft_error::{GenerationError, GenerationErrorKind, PitchcraftResult};
//!
//! fn require_description(text: &str) -> PitchcraftResult<&str> {
//!     if text.trim().is_empty() {
//!         Err(GenerationError::new(GenerationErrorKind::EmptyInput))?
//!     }
//!     Ok(text)
//! }
//!
//! assert!(require_description("   ").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod json;
mod storage;

pub use config::ConfigError;
pub use error::{PitchcraftError, PitchcraftErrorKind, PitchcraftResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
