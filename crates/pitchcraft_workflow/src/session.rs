//! Pitch session orchestration.

use crate::{Operation, OperationStatus, SessionSnapshot};
use derive_new::new;
use pitchcraft_core::{Description, GeneratedImage, Narrative, SocialMediaPosts};
use pitchcraft_error::{GenerationError, GenerationErrorKind, PitchcraftError, PitchcraftResult};
use pitchcraft_interface::{ApiKeySelector, PitchGenerator, PollPolicy};
use pitchcraft_storage::LocalMedia;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    status: OperationStatus,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: None,
            status: OperationStatus::default(),
        }
    }
}

/// A narrative together with the description it was generated from.
#[derive(Debug, Clone)]
struct Pitch {
    description: Description,
    narrative: Narrative,
}

#[derive(Debug, Default)]
struct SessionState {
    description: String,
    // Bumped on every narrative start and reset; results from an older
    // generation are discarded.
    generation: u64,
    narrative: Slot<Pitch>,
    image: Slot<GeneratedImage>,
    video: Slot<Arc<LocalMedia>>,
    social_posts: Slot<SocialMediaPosts>,
    social_posts_open: bool,
    image_preview_open: bool,
    key_needs_reselection: bool,
}

impl SessionState {
    fn status_mut(&mut self, op: Operation) -> &mut OperationStatus {
        match op {
            Operation::Narrative => &mut self.narrative.status,
            Operation::Image => &mut self.image.status,
            Operation::Video => &mut self.video.status,
            Operation::SocialPosts => &mut self.social_posts.status,
        }
    }

    fn pitch(&self, op: Operation) -> Result<Pitch, GenerationError> {
        self.narrative.value.clone().ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::PreconditionFailed(format!(
                "{} requires a narrative",
                op
            )))
        })
    }

    /// Mark `op` as running and clear its previous error.
    fn start(&mut self, op: Operation) -> Result<u64, GenerationError> {
        let status = self.status_mut(op);
        if status.loading {
            return Err(GenerationError::new(GenerationErrorKind::AlreadyInFlight(
                op.to_string(),
            )));
        }
        status.loading = true;
        status.error = None;
        Ok(self.generation)
    }

    /// Drop every result derived from the narrative and close both modals.
    fn clear_derived(&mut self) {
        self.image = Slot::default();
        if let Some(video) = std::mem::take(&mut self.video).value {
            video.release();
        }
        self.social_posts = Slot::default();
        self.social_posts_open = false;
        self.image_preview_open = false;
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            description: self.description.clone(),
            narrative: self.narrative.value.as_ref().map(|p| p.narrative.clone()),
            narrative_status: self.narrative.status.clone(),
            image_url: self.image.value.as_ref().map(GeneratedImage::data_url),
            image_status: self.image.status.clone(),
            video_url: self.video.value.as_ref().map(|v| v.url().to_string()),
            video_status: self.video.status.clone(),
            social_posts: self.social_posts.value.clone(),
            social_posts_status: self.social_posts.status.clone(),
            social_posts_open: self.social_posts_open,
            image_preview_open: self.image_preview_open,
            key_needs_reselection: self.key_needs_reselection,
        }
    }
}

/// One user's pitch-building session.
///
/// Each action is an async method taking `&self`, so different operations
/// can run concurrently. The state lock is never held across a provider
/// call. Starting an operation that is already running fails with
/// `AlreadyInFlight`; starting a derived operation without a narrative fails
/// with `PreconditionFailed`. Neither touches the provider.
///
/// Regenerating the narrative discards the image, video, and posts. Results
/// of derived operations that finish after that are dropped rather than
/// attached to the new narrative.
///
/// # Example
///
/// ```no_run
/// use pitchcraft_interface::{PitchGenerator, StaticKeySelector};
/// use pitchcraft_workflow::PitchSession;
/// use std::sync::Arc;
///
/// # async fn example(generator: Arc<dyn PitchGenerator>) -> Result<(), Box<dyn std::error::Error>> {
/// let session = PitchSession::new(generator, Arc::new(StaticKeySelector::new(true)));
/// session.set_description("An app for dog walkers");
/// session.generate_narrative().await?;
/// session.generate_image().await?;
/// println!("{:?}", session.snapshot().image_url);
/// # Ok(())
/// # }
/// ```
#[derive(new)]
pub struct PitchSession {
    generator: Arc<dyn PitchGenerator>,
    key_selector: Arc<dyn ApiKeySelector>,
    #[new(default)]
    poll_policy: PollPolicy,
    #[new(default)]
    state: Mutex<SessionState>,
}

impl std::fmt::Debug for PitchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PitchSession")
            .field("provider", &self.generator.provider_name())
            .field("poll_policy", &self.poll_policy)
            .finish_non_exhaustive()
    }
}

impl PitchSession {
    /// Use `policy` when waiting on video jobs.
    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll_policy = policy;
        self
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store the result of `op` if it still belongs to the current narrative.
    fn finish<T>(
        &self,
        op: Operation,
        generation: u64,
        result: PitchcraftResult<T>,
        store: impl FnOnce(&mut SessionState, T),
    ) -> PitchcraftResult<()> {
        let mut state = self.lock();

        if state.generation != generation {
            drop(state);
            // A discarded video handle releases itself here
            drop(result);
            debug!(%op, "Discarding result for a superseded narrative");
            return Err(GenerationError::new(GenerationErrorKind::Superseded(op.to_string())).into());
        }

        state.status_mut(op).loading = false;
        match result {
            Ok(value) => {
                store(&mut *state, value);
                info!(%op, "Operation succeeded");
                Ok(())
            }
            Err(err) => {
                warn!(%op, error = %err, "Operation failed");
                if matches!(err.generation_kind(), Some(GenerationErrorKind::InvalidApiKey(_))) {
                    state.key_needs_reselection = true;
                }
                state.status_mut(op).error = Some(op.failure_message(&err));
                Err(err)
            }
        }
    }

    /// Replace the description text. Nothing is validated until generation.
    pub fn set_description(&self, text: impl Into<String>) {
        self.lock().description = text.into();
    }

    /// Current description text.
    pub fn description(&self) -> String {
        self.lock().description.clone()
    }

    /// Generate a new narrative, discarding everything derived from the old one.
    ///
    /// # Errors
    ///
    /// `EmptyInput` for a blank description and `AlreadyInFlight` while a
    /// narrative is generating; neither changes the session. Provider
    /// failures are stored as the narrative error and returned.
    #[instrument(skip(self))]
    pub async fn generate_narrative(&self) -> PitchcraftResult<()> {
        let (description, generation) = {
            let mut state = self.lock();
            let description = Description::parse(&state.description)?;
            if state.narrative.status.loading {
                return Err(GenerationError::new(GenerationErrorKind::AlreadyInFlight(
                    Operation::Narrative.to_string(),
                ))
                .into());
            }
            state.generation += 1;
            state.narrative.value = None;
            state.clear_derived();
            let generation = state.start(Operation::Narrative)?;
            (description, generation)
        };

        let result = self.generator.generate_narrative(&description).await;

        self.finish(Operation::Narrative, generation, result, |state, narrative| {
            state.narrative.value = Some(Pitch {
                description,
                narrative,
            });
        })
    }

    /// Generate the collage for the current narrative.
    ///
    /// The previous image stays until a new one succeeds.
    ///
    /// # Errors
    ///
    /// `PreconditionFailed` without a narrative, `AlreadyInFlight` while an
    /// image is generating, otherwise the provider's error.
    #[instrument(skip(self))]
    pub async fn generate_image(&self) -> PitchcraftResult<()> {
        let (pitch, generation) = {
            let mut state = self.lock();
            let pitch = state.pitch(Operation::Image)?;
            (pitch, state.start(Operation::Image)?)
        };

        let result = self
            .generator
            .generate_image(&pitch.narrative, &pitch.description)
            .await;

        self.finish(Operation::Image, generation, result, |state, image| {
            state.image.value = Some(image);
        })
    }

    /// Generate the video for the current narrative.
    ///
    /// The key selector is consulted first; if it reports no key, or the
    /// provider rejected the key last time, the host is asked to select one.
    /// A successful video replaces and releases the previous one.
    ///
    /// # Errors
    ///
    /// `PreconditionFailed` without a narrative, `AlreadyInFlight` while a
    /// video is generating, `AuthorizationUnavailable` if the key selector
    /// fails, otherwise the provider's error.
    #[instrument(skip(self))]
    pub async fn generate_video(&self) -> PitchcraftResult<()> {
        let (pitch, generation, reselect) = {
            let mut state = self.lock();
            let pitch = state.pitch(Operation::Video)?;
            let generation = state.start(Operation::Video)?;
            (pitch, generation, state.key_needs_reselection)
        };

        let result = match self.ensure_api_key(reselect).await {
            Ok(()) => {
                if reselect {
                    self.lock().key_needs_reselection = false;
                }
                self.generator
                    .generate_video(&pitch.narrative, &self.poll_policy)
                    .await
            }
            Err(err) => Err(err.into()),
        };

        self.finish(Operation::Video, generation, result, |state, media| {
            if let Some(previous) = state.video.value.replace(Arc::new(media)) {
                previous.release();
            }
        })
    }

    async fn ensure_api_key(&self, force_select: bool) -> Result<(), GenerationError> {
        let unavailable = |e: PitchcraftError| {
            GenerationError::new(GenerationErrorKind::AuthorizationUnavailable(e.to_string()))
        };

        let selected = self
            .key_selector
            .has_selected_api_key()
            .await
            .map_err(unavailable)?;
        if !selected || force_select {
            debug!(selected, force_select, "Asking host to select an API key");
            self.key_selector.open_select_key().await.map_err(unavailable)?;
        }
        Ok(())
    }

    /// Generate per-platform posts and open the posts modal on success.
    ///
    /// # Errors
    ///
    /// `PreconditionFailed` without a narrative or image, `AlreadyInFlight`
    /// while posts are generating, otherwise the provider's error.
    #[instrument(skip(self))]
    pub async fn generate_social_posts(&self) -> PitchcraftResult<()> {
        let (pitch, generation) = {
            let mut state = self.lock();
            let pitch = state.pitch(Operation::SocialPosts)?;
            if state.image.value.is_none() {
                return Err(GenerationError::new(GenerationErrorKind::PreconditionFailed(
                    "social_posts requires a generated image".to_string(),
                ))
                .into());
            }
            (pitch, state.start(Operation::SocialPosts)?)
        };

        let result = self
            .generator
            .generate_social_posts(&pitch.narrative, &pitch.description)
            .await;

        self.finish(Operation::SocialPosts, generation, result, |state, posts| {
            state.social_posts.value = Some(posts);
            state.social_posts_open = true;
        })
    }

    /// Release the video and return every field to its initial state.
    ///
    /// Operations still in flight finish into the void.
    #[instrument(skip(self))]
    pub fn reset(&self) {
        let mut state = self.lock();
        if let Some(video) = state.video.value.take() {
            video.release();
        }
        let generation = state.generation + 1;
        *state = SessionState {
            generation,
            ..SessionState::default()
        };
        info!("Session reset");
    }

    /// Show the social posts modal.
    ///
    /// # Errors
    ///
    /// `PreconditionFailed` when no posts exist.
    pub fn open_social_posts(&self) -> PitchcraftResult<()> {
        let mut state = self.lock();
        if state.social_posts.value.is_none() {
            return Err(GenerationError::new(GenerationErrorKind::PreconditionFailed(
                "no social posts to show".to_string(),
            ))
            .into());
        }
        state.social_posts_open = true;
        Ok(())
    }

    /// Hide the social posts modal.
    pub fn close_social_posts(&self) {
        self.lock().social_posts_open = false;
    }

    /// Show the image preview.
    ///
    /// # Errors
    ///
    /// `PreconditionFailed` when no image exists.
    pub fn open_image_preview(&self) -> PitchcraftResult<()> {
        let mut state = self.lock();
        if state.image.value.is_none() {
            return Err(GenerationError::new(GenerationErrorKind::PreconditionFailed(
                "no image to preview".to_string(),
            ))
            .into());
        }
        state.image_preview_open = true;
        Ok(())
    }

    /// Hide the image preview.
    pub fn close_image_preview(&self) {
        self.lock().image_preview_open = false;
    }

    /// Current state for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    /// Current narrative.
    pub fn narrative(&self) -> Option<Narrative> {
        self.lock().narrative.value.as_ref().map(|p| p.narrative.clone())
    }

    /// Current collage.
    pub fn image(&self) -> Option<GeneratedImage> {
        self.lock().image.value.clone()
    }

    /// Current posts.
    pub fn social_posts(&self) -> Option<SocialMediaPosts> {
        self.lock().social_posts.value.clone()
    }

    /// Bytes of the current video, if one is held.
    ///
    /// # Errors
    ///
    /// Propagates the media store's error, e.g. if the session was reset
    /// during the read.
    pub async fn video_bytes(&self) -> PitchcraftResult<Option<Vec<u8>>> {
        let video = self.lock().video.value.clone();
        match video {
            Some(video) => Ok(Some(video.bytes().await?)),
            None => Ok(None),
        }
    }
}
