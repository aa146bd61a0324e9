//! Product description input.

use pitchcraft_error::{GenerationError, GenerationErrorKind};
use serde::{Deserialize, Serialize};

/// Free-text product or idea description.
///
/// Always non-empty after trimming. There is no length limit; the provider
/// may truncate or reject long input.
///
/// # Examples
///
/// ```
/// use pitchcraft_core::Description;
///
/// let description = Description::parse("  A bakery that delivers at dawn. ").unwrap();
/// assert_eq!(description.as_str(), "A bakery that delivers at dawn.");
///
/// assert!(Description::parse(" \n\t ").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::Deref,
)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Validate and trim raw input.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationErrorKind::EmptyInput`] for blank input.
    #[track_caller]
    pub fn parse(text: impl AsRef<str>) -> Result<Self, GenerationError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyInput));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The trimmed description text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Description {
    type Error = GenerationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}
