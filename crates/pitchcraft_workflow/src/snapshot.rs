//! Serializable view of a session for presentation layers.

use crate::OperationStatus;
use pitchcraft_core::{Narrative, SocialMediaPosts};
use serde::Serialize;

/// Everything a presentation layer needs to render the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Current description text, as typed
    pub description: String,
    /// Generated narrative
    pub narrative: Option<Narrative>,
    /// Narrative loading flag and error
    pub narrative_status: OperationStatus,
    /// Collage as a `data:` URL
    pub image_url: Option<String>,
    /// Image loading flag and error
    pub image_status: OperationStatus,
    /// Locally addressable video location
    pub video_url: Option<String>,
    /// Video loading flag and error
    pub video_status: OperationStatus,
    /// Generated posts
    pub social_posts: Option<SocialMediaPosts>,
    /// Social posts loading flag and error
    pub social_posts_status: OperationStatus,
    /// Social posts modal is visible
    pub social_posts_open: bool,
    /// Image preview is visible
    pub image_preview_open: bool,
    /// The provider rejected the key; the next video call prompts for a new one
    pub key_needs_reselection: bool,
}
