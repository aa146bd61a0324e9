//! Generation workflow error types.

/// Conditions that end a single generation operation.
///
/// Every kind is terminal for the operation that raised it. Nothing in
/// Pitchcraft retries automatically; the caller re-triggers the action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Description was empty or whitespace only; no request was issued
    #[display("Description must not be empty")]
    EmptyInput,
    /// A prerequisite result is missing; no request was issued
    #[display("Precondition failed: {}", _0)]
    PreconditionFailed(String),
    /// The same operation is already running
    #[display("Operation already in flight: {}", _0)]
    AlreadyInFlight(String),
    /// Provider call failed, or its content was missing or unparsable
    #[display("Generation failed: {}", _0)]
    GenerationFailed(String),
    /// Image response carried no inline image data
    #[display("No image data found in response")]
    NoImageData,
    /// Video operation completed without a downloadable reference
    #[display("Video generation completed, but no download link was found")]
    MissingDownloadLink,
    /// Fetching the finished video failed
    #[display("Failed to download video file (status {}): {}", status, message)]
    DownloadFailed {
        /// HTTP status code, 0 when the request never got a response
        status: u16,
        /// Error detail
        message: String,
    },
    /// The host authorization capability could not be consulted
    #[display("Authorization unavailable: {}", _0)]
    AuthorizationUnavailable(String),
    /// The provider rejected the request in a way that points at the API key
    #[display("Invalid API key: {}", _0)]
    InvalidApiKey(String),
    /// Polling exceeded the configured maximum wait
    #[display("Video generation timed out after {} seconds", waited_secs)]
    Timeout {
        /// Seconds spent waiting before giving up
        waited_secs: u64,
    },
    /// Polling was cancelled by the caller
    #[display("Video generation cancelled")]
    Cancelled,
    /// The narrative was regenerated or the session reset while this ran
    #[display("Result discarded: {} was superseded by a newer narrative", _0)]
    Superseded(String),
}

impl GenerationErrorKind {
    /// Returns true when the failure points at the API key rather than the request.
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            GenerationErrorKind::AuthorizationUnavailable(_) | GenerationErrorKind::InvalidApiKey(_)
        )
    }

    /// Returns true when the operation was refused before contacting the provider.
    pub fn is_rejected_locally(&self) -> bool {
        matches!(
            self,
            GenerationErrorKind::EmptyInput
                | GenerationErrorKind::PreconditionFailed(_)
                | GenerationErrorKind::AlreadyInFlight(_)
        )
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use pitchcraft_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MissingDownloadLink);
/// assert!(format!("{}", err).contains("no download link"));
/// assert!(!err.kind.is_authorization());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for [`GenerationErrorKind::GenerationFailed`].
    #[track_caller]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::GenerationFailed(message.into()))
    }
}
