//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, GenerationErrorKind, JsonError, StorageError};

/// Every error Pitchcraft can produce, by domain.
///
/// # Examples
///
/// ```
/// use pitchcraft_error::{ConfigError, PitchcraftError};
///
/// let err: PitchcraftError = ConfigError::new("No API key set").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PitchcraftErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Media storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Generation workflow error
    #[from(GenerationError)]
    Generation(GenerationError),
}

/// Pitchcraft error with kind discrimination.
///
/// # Examples
///
/// ```
/// use pitchcraft_error::{ConfigError, PitchcraftResult};
///
/// fn might_fail() -> PitchcraftResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Pitchcraft Error: {}", _0)]
pub struct PitchcraftError(Box<PitchcraftErrorKind>);

impl PitchcraftError {
    /// Create a new error from a kind.
    pub fn new(kind: PitchcraftErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PitchcraftErrorKind {
        &self.0
    }

    /// The generation kind, if this is a generation error.
    pub fn generation_kind(&self) -> Option<&GenerationErrorKind> {
        match self.kind() {
            PitchcraftErrorKind::Generation(e) => Some(&e.kind),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to PitchcraftErrorKind
impl<T> From<T> for PitchcraftError
where
    T: Into<PitchcraftErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Pitchcraft operations.
pub type PitchcraftResult<T> = std::result::Result<T, PitchcraftError>;
