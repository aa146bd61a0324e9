//! Configuration error types.

/// A setting, file, or environment variable that could not be used.
///
/// `origin` names where the bad value came from (a file path, a variable,
/// a config key) when that is known.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ConfigError {
    /// What went wrong
    pub message: String,
    /// Source of the offending value
    pub origin: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a configuration error with no known origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use pitchcraft_error::ConfigError;
    ///
    /// let err = ConfigError::new("must be at least 1").with_origin("poll_interval_secs");
    /// assert_eq!(err.origin.as_deref(), Some("poll_interval_secs"));
    /// assert!(err.to_string().contains("poll_interval_secs: must be at least 1"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            origin: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attribute the error to a file, variable, or key.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration Error: ")?;
        if let Some(origin) = &self.origin {
            write!(f, "{}: ", origin)?;
        }
        write!(f, "{} at line {} in {}", self.message, self.line, self.file)
    }
}
