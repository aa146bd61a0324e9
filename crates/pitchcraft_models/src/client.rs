//! Gemini REST client implementing [`PitchGenerator`].

use crate::dto::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, PredictLongRunningRequest,
    VideoInstance, VideoOperation, VideoParameters,
};
use crate::failure::{Endpoint, ProviderFailure};
use crate::prompts;
use crate::{ProviderConfig, api_key_from_env};
use async_trait::async_trait;
use pitchcraft_core::{Description, GeneratedImage, Narrative, SocialMediaPosts};
use pitchcraft_error::{GenerationError, GenerationErrorKind, PitchcraftResult};
use pitchcraft_interface::{PitchGenerator, PollPolicy};
use pitchcraft_storage::{
    FileSystemMediaStore, InMemoryMediaStore, LocalMedia, MediaMetadata, MediaStore,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Lifecycle of a long-running video job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum VideoJobState {
    /// Accepted by the provider, not yet queried
    #[display("submitted")]
    Submitted,
    /// Waiting on the provider; `attempt` counts status queries issued
    #[display("polling (attempt {})", attempt)]
    Polling {
        /// Status queries issued so far
        attempt: u32,
    },
    /// Finished with a download link
    #[display("done")]
    Done,
    /// Finished without a usable result
    #[display("failed")]
    Failed,
}

/// Gemini client for narratives, collages, videos, and social posts.
///
/// Every call is a single attempt. Finished videos are stored through the
/// configured [`MediaStore`] and handed back as [`LocalMedia`].
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: ProviderConfig,
    api_key: String,
    media: Arc<dyn MediaStore>,
}

impl GeminiClient {
    /// Create a client from explicit parts.
    pub fn new(
        config: ProviderConfig,
        api_key: impl Into<String>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            http: Client::new(),
            config,
            api_key: api_key.into(),
            media,
        }
    }

    /// Create a client from layered configuration and the environment key.
    ///
    /// Videos go to `media_dir` when configured, otherwise stay in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails to load, no key is set, or
    /// the media directory cannot be created.
    #[instrument]
    pub fn from_env() -> PitchcraftResult<Self> {
        let config = ProviderConfig::load()?;
        let api_key = api_key_from_env()?;
        let media: Arc<dyn MediaStore> = match &config.media_dir {
            Some(dir) => Arc::new(FileSystemMediaStore::new(dir)?),
            None => Arc::new(InMemoryMediaStore::new()),
        };
        Ok(Self::new(config, api_key, media))
    }

    /// Active configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            model,
            method
        )
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<T, GenerationError> {
        let response = request
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| GenerationError::failed(format!("{} request failed: {}", endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%endpoint, status = status.as_u16(), "Provider returned an error");
            return Err(ProviderFailure::from_response(endpoint, status.as_u16(), &body).into_error());
        }

        response.json::<T>().await.map_err(|e| {
            GenerationError::failed(format!("{} response could not be parsed: {}", endpoint, e))
        })
    }

    async fn generate_content(
        &self,
        endpoint: Endpoint,
        model: &str,
        prompt: String,
        generation_config: GenerationConfig,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let url = self.model_url(model, "generateContent");
        debug!(%endpoint, model, "Sending generateContent request");
        let body = GenerateContentRequest::prompt(prompt, generation_config);
        self.send(endpoint, self.http.post(url).json(&body)).await
    }

    fn json_output(schema: serde_json::Value) -> Result<GenerationConfig, GenerationError> {
        GenerationConfig::builder()
            .response_mime_type("application/json")
            .response_schema(schema)
            .build()
            .map_err(|e| GenerationError::failed(format!("invalid generation config: {}", e)))
    }

    async fn poll_operation(&self, name: &str) -> Result<VideoOperation, GenerationError> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), name);
        self.send(Endpoint::Video, self.http.get(url)).await
    }

    /// Wait for `operation` to finish, issuing one status query per interval.
    async fn await_operation(
        &self,
        mut operation: VideoOperation,
        policy: &PollPolicy,
        started: Instant,
    ) -> Result<VideoOperation, GenerationError> {
        let mut state = VideoJobState::Submitted;
        let mut attempt = 0;

        while !*operation.done() {
            policy.wait(started).await?;
            attempt += 1;
            state = VideoJobState::Polling { attempt };
            debug!(%state, operation = %operation.name(), "Querying video operation");
            operation = policy
                .guard(started, self.poll_operation(operation.name()))
                .await?;
        }

        debug!(%state, status_queries = attempt, "Video operation finished");
        Ok(operation)
    }

    /// Fetch the finished video. The key rides in the query string, so
    /// transport errors are reported without their URL.
    async fn download(&self, uri: &str) -> Result<Vec<u8>, GenerationError> {
        let separator = if uri.contains('?') { '&' } else { '?' };
        let url = format!("{}{}key={}", uri, separator, self.api_key);
        debug!(uri, "Downloading video");

        let download_failed = |status: u16, message: String| {
            GenerationError::new(GenerationErrorKind::DownloadFailed { status, message })
        };

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| download_failed(0, e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(download_failed(status.as_u16(), body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| download_failed(status.as_u16(), e.without_url().to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl PitchGenerator for GeminiClient {
    #[instrument(skip(self, description), fields(model = %self.config.text_model))]
    async fn generate_narrative(&self, description: &Description) -> PitchcraftResult<Narrative> {
        let response = self
            .generate_content(
                Endpoint::Text,
                &self.config.text_model,
                prompts::narrative_prompt(description),
                Self::json_output(prompts::narrative_schema())?,
            )
            .await?;

        let text = response
            .text()
            .ok_or_else(|| GenerationError::failed("narrative response carried no text"))?;
        let narrative = Narrative::from_json_str(&text)?;
        info!("Generated narrative");
        Ok(narrative)
    }

    #[instrument(skip_all, fields(model = %self.config.image_model))]
    async fn generate_image(
        &self,
        narrative: &Narrative,
        description: &Description,
    ) -> PitchcraftResult<GeneratedImage> {
        let generation_config = GenerationConfig::builder()
            .response_modalities(vec!["IMAGE".to_string()])
            .build()
            .map_err(|e| GenerationError::failed(format!("invalid generation config: {}", e)))?;

        let response = self
            .generate_content(
                Endpoint::Image,
                &self.config.image_model,
                prompts::image_prompt(narrative, description),
                generation_config,
            )
            .await?;

        let inline = response
            .inline_data()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::NoImageData))?;
        info!(bytes_b64 = inline.data().len(), "Generated image");
        Ok(GeneratedImage::new(inline.data().clone(), inline.mime_type().clone()))
    }

    #[instrument(skip_all, fields(model = %self.config.video_model))]
    async fn generate_video(
        &self,
        narrative: &Narrative,
        policy: &PollPolicy,
    ) -> PitchcraftResult<LocalMedia> {
        let parameters = VideoParameters::builder()
            .resolution(self.config.video_resolution.clone())
            .aspect_ratio(self.config.video_aspect_ratio.clone())
            .build()
            .map_err(|e| GenerationError::failed(format!("invalid video parameters: {}", e)))?;
        let body = PredictLongRunningRequest {
            instances: vec![VideoInstance {
                prompt: prompts::video_prompt(narrative),
            }],
            parameters,
        };

        let started = Instant::now();
        let url = self.model_url(&self.config.video_model, "predictLongRunning");
        let submitted: VideoOperation = self
            .send(Endpoint::Video, self.http.post(url).json(&body))
            .await?;
        info!(operation = %submitted.name(), state = %VideoJobState::Submitted, "Video job submitted");

        let operation = self.await_operation(submitted, policy, started).await?;

        if let Some(error) = operation.error() {
            warn!(state = %VideoJobState::Failed, message = %error.message(), "Video operation failed");
            return Err(ProviderFailure::from_operation(error.clone()).into_error().into());
        }

        let Some(uri) = operation.download_uri() else {
            warn!(state = %VideoJobState::Failed, "Video operation finished without a download link");
            return Err(GenerationError::new(GenerationErrorKind::MissingDownloadLink).into());
        };
        info!(state = %VideoJobState::Done, "Video ready for download");

        let bytes = policy.guard(started, self.download(uri)).await?;
        let media = LocalMedia::store(self.media.clone(), &bytes, &MediaMetadata::video()).await?;
        info!(url = %media.url(), size = bytes.len(), "Stored video");
        Ok(media)
    }

    #[instrument(skip_all, fields(model = %self.config.text_model))]
    async fn generate_social_posts(
        &self,
        narrative: &Narrative,
        description: &Description,
    ) -> PitchcraftResult<SocialMediaPosts> {
        let response = self
            .generate_content(
                Endpoint::Text,
                &self.config.text_model,
                prompts::social_prompt(narrative, description),
                Self::json_output(prompts::social_schema())?,
            )
            .await?;

        let text = response
            .text()
            .ok_or_else(|| GenerationError::failed("social posts response carried no text"))?;
        let posts = SocialMediaPosts::from_json_str(&text)?;
        info!("Generated social media posts");
        Ok(posts)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
