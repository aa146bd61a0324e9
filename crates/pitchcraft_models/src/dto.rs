//! Gemini REST data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inline binary payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type of the payload
    #[serde(default)]
    mime_type: Option<String>,
    /// Base64-encoded bytes
    data: String,
}

/// One part of a content turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Inline data part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    /// Text-only part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

/// A content turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Content {
    /// Author role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    /// Ordered parts
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    /// Single-part user turn.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::from_text(text)],
        }
    }
}

/// Output constraints for `generateContent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into, strip_option), default)]
pub struct GenerationConfig {
    /// e.g. `application/json`
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    /// OpenAPI-style schema the output must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    /// e.g. `["IMAGE"]`
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

impl GenerationConfig {
    /// Creates a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }
}

/// Body of `models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns
    pub contents: Vec<Content>,
    /// Output constraints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single user prompt with the given output constraints.
    pub fn prompt(prompt: impl Into<String>, generation_config: GenerationConfig) -> Self {
        Self {
            contents: vec![Content::user_text(prompt)],
            generation_config: Some(generation_config),
        }
    }
}

/// A response candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default)]
    content: Option<Content>,
    /// Why generation stopped
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Response of `generateContent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GenerateContentResponse {
    /// Candidates, first is used
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    /// First inline data part of the first candidate.
    pub fn inline_data(&self) -> Option<&InlineData> {
        self.first_parts().iter().find_map(|p| p.inline_data.as_ref())
    }
}

/// Video prompt instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInstance {
    /// Text prompt
    pub prompt: String,
}

/// Video generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct VideoParameters {
    /// Number of videos to generate
    #[builder(default = "1")]
    sample_count: u32,
    /// e.g. `720p`
    resolution: String,
    /// e.g. `16:9`
    aspect_ratio: String,
}

impl VideoParameters {
    /// Creates a new builder for `VideoParameters`.
    pub fn builder() -> VideoParametersBuilder {
        VideoParametersBuilder::default()
    }
}

/// Body of `models/{model}:predictLongRunning`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictLongRunningRequest {
    /// Prompt instances, one per request here
    pub instances: Vec<VideoInstance>,
    /// Generation parameters
    pub parameters: VideoParameters,
}

/// Provider status object, as found in error bodies and failed operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ApiStatus {
    /// Numeric code (HTTP-style for REST errors)
    #[serde(default)]
    code: Option<i64>,
    /// Canonical status name, e.g. `NOT_FOUND`
    #[serde(default)]
    status: Option<String>,
    /// Human-readable message
    #[serde(default)]
    message: String,
}

/// `{ "error": { ... } }` wrapper returned on non-success responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorEnvelope {
    /// The status
    pub error: ApiStatus,
}

/// Video file reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct VideoFile {
    /// Download URI
    #[serde(default)]
    uri: Option<String>,
}

/// One generated video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GeneratedSample {
    /// The file
    #[serde(default)]
    video: Option<VideoFile>,
}

/// Payload of a finished video operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    /// Generated videos
    #[serde(default)]
    generated_samples: Vec<GeneratedSample>,
}

/// `response` field of an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    /// Video result
    #[serde(default)]
    generate_video_response: Option<GenerateVideoResponse>,
}

/// Long-running video operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct VideoOperation {
    /// Operation name, used to poll
    name: String,
    /// Whether the operation has finished
    #[serde(default)]
    done: bool,
    /// Result when finished successfully
    #[serde(default)]
    response: Option<OperationResponse>,
    /// Failure when finished unsuccessfully
    #[serde(default)]
    error: Option<ApiStatus>,
}

impl VideoOperation {
    /// URI of the first generated video, if present and non-empty.
    pub fn download_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generate_video_response
            .as_ref()?
            .generated_samples
            .first()?
            .video
            .as_ref()?
            .uri
            .as_deref()
            .filter(|uri| !uri.is_empty())
    }
}
