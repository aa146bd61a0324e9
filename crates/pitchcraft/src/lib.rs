//! Pitchcraft - marketing pitch generator
//!
//! Pitchcraft turns a short product or idea description into a five-part
//! marketing narrative (hook, emotion, conflict, resolution, call to action)
//! and, from that narrative, a five-panel collage, a short video, and posts
//! for five social platforms.
//!
//! # Architecture
//!
//! - `pitchcraft_error` - Error types
//! - `pitchcraft_core` - Core data types and telemetry setup
//! - `pitchcraft_interface` - `PitchGenerator` and `ApiKeySelector` traits, poll policy
//! - `pitchcraft_storage` - Locally addressable media handles
//! - `pitchcraft_models` - Gemini REST provider and configuration
//! - `pitchcraft_workflow` - `PitchSession` orchestration
//!
//! This crate re-exports everything for convenience.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pitchcraft::{EnvKeySelector, GeminiClient, PitchSession};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = PitchSession::new(Arc::new(GeminiClient::from_env()?), Arc::new(EnvKeySelector));
//!     session.set_description("An app that connects busy professionals with local dog walkers");
//!     session.generate_narrative().await?;
//!     println!("{:#?}", session.narrative());
//!     Ok(())
//! }
//! ```

mod key_selector;

pub use key_selector::EnvKeySelector;

pub use pitchcraft_core::*;
pub use pitchcraft_error::*;
pub use pitchcraft_interface::*;
pub use pitchcraft_models::*;
pub use pitchcraft_storage::*;
pub use pitchcraft_workflow::*;
