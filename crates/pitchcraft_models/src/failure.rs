//! Classification of provider error responses.

use crate::dto::{ApiErrorEnvelope, ApiStatus};
use pitchcraft_error::{GenerationError, GenerationErrorKind};

/// Message fragment the provider returns when a key cannot see the model.
const ENTITY_NOT_FOUND: &str = "Requested entity was not found";

/// Canonical status names that point at the API key.
const KEY_STATUSES: [&str; 2] = ["PERMISSION_DENIED", "UNAUTHENTICATED"];

/// Which provider surface produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Endpoint {
    /// `generateContent` for narratives and social posts
    #[display("text")]
    Text,
    /// `generateContent` for the collage
    #[display("image")]
    Image,
    /// Video submit, poll, and download
    #[display("video")]
    Video,
}

/// Result of classifying a provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Recognized as an API key problem
    InvalidApiKey,
    /// No recognizable cause
    Unclassified,
}

/// A failed provider exchange, either a non-success HTTP response or an
/// operation that finished with an `error` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    endpoint: Endpoint,
    http_status: Option<u16>,
    status: Option<ApiStatus>,
    raw: String,
}

impl ProviderFailure {
    /// Failure from a non-success HTTP response body.
    pub fn from_response(endpoint: Endpoint, http_status: u16, body: &str) -> Self {
        let status = serde_json::from_str::<ApiErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error);
        Self {
            endpoint,
            http_status: Some(http_status),
            status,
            raw: body.to_string(),
        }
    }

    /// Failure carried inside a finished operation.
    pub fn from_operation(status: ApiStatus) -> Self {
        Self {
            endpoint: Endpoint::Video,
            http_status: None,
            raw: status.message().clone(),
            status: Some(status),
        }
    }

    /// Human-readable detail.
    pub fn message(&self) -> &str {
        match &self.status {
            Some(status) if !status.message().is_empty() => status.message(),
            _ => &self.raw,
        }
    }

    /// Decide whether this failure points at the API key.
    ///
    /// Structured status names and HTTP codes are authoritative. The message
    /// text is only inspected when the body carried no structured status.
    pub fn classification(&self) -> Classification {
        if let Some(status) = &self.status {
            let name = status.status().as_deref().unwrap_or_default();
            if KEY_STATUSES.contains(&name) {
                return Classification::InvalidApiKey;
            }
            if self.endpoint == Endpoint::Video && name == "NOT_FOUND" {
                return Classification::InvalidApiKey;
            }
        }

        match (self.http_status, self.endpoint) {
            (Some(401 | 403), _) => return Classification::InvalidApiKey,
            (Some(404), Endpoint::Video) => return Classification::InvalidApiKey,
            _ => {}
        }

        let structured = self
            .status
            .as_ref()
            .is_some_and(|s| s.status().is_some() || s.code().is_some());
        if !structured && self.raw.contains(ENTITY_NOT_FOUND) {
            return Classification::InvalidApiKey;
        }

        Classification::Unclassified
    }

    /// Convert into the generation error the caller sees.
    #[track_caller]
    pub fn into_error(self) -> GenerationError {
        let detail = match self.http_status {
            Some(code) => format!("{} request failed with status {}: {}", self.endpoint, code, self.message()),
            None => format!("{} operation failed: {}", self.endpoint, self.message()),
        };
        match self.classification() {
            Classification::InvalidApiKey => {
                GenerationError::new(GenerationErrorKind::InvalidApiKey(detail))
            }
            Classification::Unclassified => GenerationError::failed(detail),
        }
    }
}
