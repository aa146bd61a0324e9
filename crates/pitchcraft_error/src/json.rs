//! JSON error types.

/// Failure to render a value as JSON output.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: could not render {}: {} at line {} in {}", subject, message, line, file)]
pub struct JsonError {
    /// What was being rendered, e.g. "session"
    pub subject: &'static str,
    /// Serializer message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Record a serializer failure for `subject`.
    ///
    /// ```
    /// use pitchcraft_error::JsonError;
    ///
    /// let err = JsonError::new("session", "key must be a string");
    /// assert!(err.to_string().contains("could not render session"));
    /// ```
    #[track_caller]
    pub fn new(subject: &'static str, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            subject,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
