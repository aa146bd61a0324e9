//! Session operations and their user-facing failure messages.

use pitchcraft_error::{GenerationErrorKind, PitchcraftError};
use serde::Serialize;

/// Shown when narrative generation fails.
pub const NARRATIVE_FAILED: &str = "Failed to generate marketing pitch. Please try again.";
/// Shown when image generation fails.
pub const IMAGE_FAILED: &str = "Failed to generate marketing image.";
/// Shown when social post generation fails.
pub const SOCIAL_POSTS_FAILED: &str = "Failed to generate social media posts. Please try again.";
/// Shown when video generation fails without a more specific message.
pub const VIDEO_FAILED: &str = "Failed to generate video.";
/// Shown when the provider rejects the key during video generation.
pub const VIDEO_INVALID_KEY: &str =
    "Video generation failed. Your API key might be invalid. Please re-select your key via the prompt.";
/// Shown when the key selection capability cannot be consulted.
pub const KEY_UNVERIFIED: &str = "Could not verify API key. Please ensure you've selected one.";

/// A user-triggered generation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    /// Five-part narrative
    Narrative,
    /// Marketing collage
    Image,
    /// Marketing video
    Video,
    /// Per-platform posts
    SocialPosts,
}

impl Operation {
    /// Message stored on the session when this operation fails with `err`.
    ///
    /// Text operations always show a fixed message. Video failures keep the
    /// underlying reason, except key problems, which ask for re-selection.
    pub fn failure_message(self, err: &PitchcraftError) -> String {
        match self {
            Operation::Narrative => NARRATIVE_FAILED.to_string(),
            Operation::Image => IMAGE_FAILED.to_string(),
            Operation::SocialPosts => SOCIAL_POSTS_FAILED.to_string(),
            Operation::Video => match err.generation_kind() {
                Some(GenerationErrorKind::InvalidApiKey(_)) => VIDEO_INVALID_KEY.to_string(),
                Some(GenerationErrorKind::AuthorizationUnavailable(_)) => KEY_UNVERIFIED.to_string(),
                Some(kind) => kind.to_string(),
                None => VIDEO_FAILED.to_string(),
            },
        }
    }
}

/// Loading flag and last error for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperationStatus {
    /// A call is in flight
    pub loading: bool,
    /// Message from the last failed call, cleared when the operation restarts
    pub error: Option<String>,
}
