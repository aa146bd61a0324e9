//! Gemini provider for Pitchcraft.
//!
//! [`GeminiClient`] implements [`pitchcraft_interface::PitchGenerator`] over
//! the Gemini REST API:
//!
//! - narratives and social posts via `generateContent` with a JSON schema
//! - the collage via `generateContent` with image output
//! - the video via `predictLongRunning`, polled until done, then downloaded
//!
//! # Example
//!
//! ```no_run
//! use pitchcraft_core::Description;
//! use pitchcraft_interface::PitchGenerator;
//! use pitchcraft_models::GeminiClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::from_env()?;
//! let description = Description::parse("An app for dog walkers")?;
//! let narrative = client.generate_narrative(&description).await?;
//! println!("{}", narrative.hook);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
pub mod dto;
mod failure;
pub mod prompts;

pub use client::{GeminiClient, VideoJobState};
pub use config::{API_KEY_VARS, ProviderConfig, api_key_from_env};
pub use failure::{Classification, Endpoint, ProviderFailure};
