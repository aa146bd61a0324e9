//! Mock generation client and key selector for session tests.

use async_trait::async_trait;
use pitchcraft_core::{Description, GeneratedImage, Narrative, SocialMediaPosts};
use pitchcraft_error::{ConfigError, GenerationError, GenerationErrorKind, PitchcraftResult};
use pitchcraft_interface::{ApiKeySelector, PitchGenerator, PollPolicy};
use pitchcraft_storage::{InMemoryMediaStore, LocalMedia, MediaMetadata};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Scripted outcome for one call; `Ok(())` means the default success value.
pub type MockOutcome = Result<(), GenerationErrorKind>;

/// Holds a call open until the test releases it.
#[derive(Debug, Default)]
pub struct Gate {
    /// Notified when the call has started
    pub started: Notify,
    /// Notify to let the call finish
    pub release: Notify,
}

#[derive(Debug, Default)]
struct Script {
    calls: usize,
    outcomes: VecDeque<MockOutcome>,
    gate: Option<Arc<Gate>>,
}

impl Script {
    fn next(&mut self) -> (MockOutcome, Option<Arc<Gate>>) {
        self.calls += 1;
        (self.outcomes.pop_front().unwrap_or(Ok(())), self.gate.clone())
    }
}

/// Mock [`PitchGenerator`] with per-operation call counts and scripted failures.
///
/// Successful calls return fixed dog-walker content. Videos are stored in an
/// in-memory store so tests can check releases.
#[derive(Debug, Default)]
pub struct MockPitchGenerator {
    narrative: Mutex<Script>,
    image: Mutex<Script>,
    video: Mutex<Script>,
    social: Mutex<Script>,
    store: Arc<InMemoryMediaStore>,
}

fn fail(kind: GenerationErrorKind) -> pitchcraft_error::PitchcraftError {
    GenerationError::new(kind).into()
}

async fn pass_gate(gate: Option<Arc<Gate>>) {
    if let Some(gate) = gate {
        gate.started.notify_one();
        gate.release.notified().await;
    }
}

impl MockPitchGenerator {
    /// Mock where every call succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for the next narrative call.
    pub fn push_narrative(&self, outcome: MockOutcome) {
        self.narrative.lock().unwrap().outcomes.push_back(outcome);
    }

    /// Queue an outcome for the next image call.
    pub fn push_image(&self, outcome: MockOutcome) {
        self.image.lock().unwrap().outcomes.push_back(outcome);
    }

    /// Queue an outcome for the next video call.
    pub fn push_video(&self, outcome: MockOutcome) {
        self.video.lock().unwrap().outcomes.push_back(outcome);
    }

    /// Queue an outcome for the next social posts call.
    pub fn push_social(&self, outcome: MockOutcome) {
        self.social.lock().unwrap().outcomes.push_back(outcome);
    }

    /// Hold every image call open on the returned gate.
    pub fn gate_image(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.image.lock().unwrap().gate = Some(gate.clone());
        gate
    }

    /// Hold every video call open on the returned gate.
    pub fn gate_video(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.video.lock().unwrap().gate = Some(gate.clone());
        gate
    }

    /// Narrative calls so far.
    pub fn narrative_calls(&self) -> usize {
        self.narrative.lock().unwrap().calls
    }

    /// Image calls so far.
    pub fn image_calls(&self) -> usize {
        self.image.lock().unwrap().calls
    }

    /// Video calls so far.
    pub fn video_calls(&self) -> usize {
        self.video.lock().unwrap().calls
    }

    /// Social posts calls so far.
    pub fn social_calls(&self) -> usize {
        self.social.lock().unwrap().calls
    }

    /// Store backing generated videos.
    pub fn store(&self) -> &Arc<InMemoryMediaStore> {
        &self.store
    }
}

/// The narrative every successful call returns.
pub fn dog_walker_narrative() -> Narrative {
    Narrative {
        hook: "Your dog is waiting by the door again.".into(),
        emotion: "Guilt that turns into relief.".into(),
        conflict: "Back-to-back meetings leave no time for walks.".into(),
        resolution: "A vetted local walker shows up on schedule.".into(),
        cta: "Book your first walk today.".into(),
    }
}

#[async_trait]
impl PitchGenerator for MockPitchGenerator {
    async fn generate_narrative(&self, _description: &Description) -> PitchcraftResult<Narrative> {
        let (outcome, gate) = self.narrative.lock().unwrap().next();
        pass_gate(gate).await;
        outcome.map_err(fail)?;
        Ok(dog_walker_narrative())
    }

    async fn generate_image(
        &self,
        _narrative: &Narrative,
        _description: &Description,
    ) -> PitchcraftResult<GeneratedImage> {
        let (outcome, gate) = self.image.lock().unwrap().next();
        pass_gate(gate).await;
        outcome.map_err(fail)?;
        Ok(GeneratedImage::new("iVBORw0KGgo=", None))
    }

    async fn generate_video(
        &self,
        _narrative: &Narrative,
        _policy: &PollPolicy,
    ) -> PitchcraftResult<LocalMedia> {
        let (outcome, gate) = self.video.lock().unwrap().next();
        pass_gate(gate).await;
        outcome.map_err(fail)?;
        LocalMedia::store(self.store.clone(), b"mp4", &MediaMetadata::video()).await
    }

    async fn generate_social_posts(
        &self,
        _narrative: &Narrative,
        _description: &Description,
    ) -> PitchcraftResult<SocialMediaPosts> {
        let (outcome, gate) = self.social.lock().unwrap().next();
        pass_gate(gate).await;
        outcome.map_err(fail)?;
        Ok(SocialMediaPosts {
            youtube: "Walks, handled.\n\n#dogs".into(),
            instagram: "🐶 Happy dog, happy you\n\n#dogwalker".into(),
            linkedin: "Busy schedules shouldn't cost your dog.\n\n#worklife".into(),
            facebook: "Who else feels guilty at 6pm?\n\n#dogs".into(),
            x: "Walks handled while you work. Book now #dogs".into(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Scripted [`ApiKeySelector`].
#[derive(Debug)]
pub struct MockKeySelector {
    selected: bool,
    fail_check: bool,
    open_calls: Mutex<usize>,
}

impl MockKeySelector {
    /// Selector reporting `selected`.
    pub fn new(selected: bool) -> Self {
        Self {
            selected,
            fail_check: false,
            open_calls: Mutex::new(0),
        }
    }

    /// Selector whose check always errors.
    pub fn failing() -> Self {
        Self {
            selected: false,
            fail_check: true,
            open_calls: Mutex::new(0),
        }
    }

    /// Number of `open_select_key` calls.
    pub fn open_calls(&self) -> usize {
        *self.open_calls.lock().unwrap()
    }
}

#[async_trait]
impl ApiKeySelector for MockKeySelector {
    async fn has_selected_api_key(&self) -> PitchcraftResult<bool> {
        if self.fail_check {
            return Err(ConfigError::new("host has no key selection").into());
        }
        Ok(self.selected)
    }

    async fn open_select_key(&self) -> PitchcraftResult<()> {
        *self.open_calls.lock().unwrap() += 1;
        Ok(())
    }
}
