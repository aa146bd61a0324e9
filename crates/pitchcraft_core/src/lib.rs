//! Core data types for Pitchcraft.
//!
//! This crate holds the values that flow between the generation client, the
//! workflow orchestrator, and the presentation layer: the user's
//! [`Description`], the five-part [`Narrative`], the per-platform
//! [`SocialMediaPosts`], and the [`GeneratedImage`] payload.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod description;
mod image;
mod narrative;
mod social;
mod telemetry;

pub use description::Description;
pub use image::{GeneratedImage, IMAGE_EXPORT_FILENAME};
pub use narrative::{Narrative, NarrativeField};
pub use social::{Platform, SocialMediaPosts};
pub use telemetry::{TelemetryConfig, init_telemetry, shutdown_telemetry};
