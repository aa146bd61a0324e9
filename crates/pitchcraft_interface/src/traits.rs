//! Trait definitions for generation providers and host capabilities.

use crate::PollPolicy;
use async_trait::async_trait;
use pitchcraft_core::{Description, GeneratedImage, Narrative, SocialMediaPosts};
use pitchcraft_error::PitchcraftResult;
use pitchcraft_storage::LocalMedia;

/// Generation client for the four provider operations.
///
/// Implementations are stateless across calls and never cache: every call
/// performs fresh generation. None of them retry.
#[async_trait]
pub trait PitchGenerator: Send + Sync {
    /// Generate the five-part narrative for a description.
    ///
    /// Returns a complete narrative or `GenerationFailed`; never a partial one.
    async fn generate_narrative(&self, description: &Description) -> PitchcraftResult<Narrative>;

    /// Generate the five-panel marketing collage.
    ///
    /// Fails with `NoImageData` when the response carries no inline image.
    async fn generate_image(
        &self,
        narrative: &Narrative,
        description: &Description,
    ) -> PitchcraftResult<GeneratedImage>;

    /// Generate, poll for, and download the marketing video.
    ///
    /// Polls according to `policy` until the provider reports completion.
    async fn generate_video(
        &self,
        narrative: &Narrative,
        policy: &PollPolicy,
    ) -> PitchcraftResult<LocalMedia>;

    /// Generate one post per social platform.
    async fn generate_social_posts(
        &self,
        narrative: &Narrative,
        description: &Description,
    ) -> PitchcraftResult<SocialMediaPosts>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;
}

/// Host capability for selecting the API key used for paid operations.
#[async_trait]
pub trait ApiKeySelector: Send + Sync {
    /// Whether a key has already been selected.
    async fn has_selected_api_key(&self) -> PitchcraftResult<bool>;

    /// Prompt the host to select a key.
    async fn open_select_key(&self) -> PitchcraftResult<()>;
}

/// Selector with a fixed answer, for hosts where the key is configured up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticKeySelector {
    selected: bool,
}

impl StaticKeySelector {
    /// Create a selector that always reports `selected`.
    pub fn new(selected: bool) -> Self {
        Self { selected }
    }
}

#[async_trait]
impl ApiKeySelector for StaticKeySelector {
    async fn has_selected_api_key(&self) -> PitchcraftResult<bool> {
        Ok(self.selected)
    }

    async fn open_select_key(&self) -> PitchcraftResult<()> {
        tracing::info!(selected = self.selected, "Key selection requested on a static selector");
        Ok(())
    }
}
