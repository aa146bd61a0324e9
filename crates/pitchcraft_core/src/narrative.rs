//! The five-part marketing narrative.

use pitchcraft_error::GenerationError;
use serde::{Deserialize, Serialize};

/// One element of the narrative framework, in display order.
///
/// # Examples
///
/// ```
/// use pitchcraft_core::NarrativeField;
///
/// assert_eq!(NarrativeField::ALL[0], NarrativeField::Hook);
/// assert_eq!(NarrativeField::Cta.key(), "cta");
/// assert_eq!(NarrativeField::Cta.title(), "Call to Action");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NarrativeField {
    /// Attention-grabbing opening
    Hook,
    /// Core emotion the narrative evokes
    Emotion,
    /// Problem or pain point the product addresses
    Conflict,
    /// How the product solves the conflict
    Resolution,
    /// Call to action
    Cta,
}

impl NarrativeField {
    /// All fields in display order.
    pub const ALL: [NarrativeField; 5] = [
        NarrativeField::Hook,
        NarrativeField::Emotion,
        NarrativeField::Conflict,
        NarrativeField::Resolution,
        NarrativeField::Cta,
    ];

    /// JSON property name used in provider schemas.
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Human-readable heading.
    pub fn title(self) -> &'static str {
        match self {
            NarrativeField::Hook => "Hook",
            NarrativeField::Emotion => "Emotion",
            NarrativeField::Conflict => "Conflict",
            NarrativeField::Resolution => "Resolution",
            NarrativeField::Cta => "Call to Action",
        }
    }

    /// Schema description sent to the provider for this field.
    pub fn schema_description(self) -> &'static str {
        match self {
            NarrativeField::Hook => {
                "A compelling opening to grab attention. Response should be between 30 and 50 words."
            }
            NarrativeField::Emotion => {
                "The core emotion the narrative should evoke (e.g., frustration, hope). Response should be between 30 and 50 words."
            }
            NarrativeField::Conflict => {
                "The problem or pain point the product addresses. Response should be between 30 and 50 words."
            }
            NarrativeField::Resolution => {
                "How the product solves the conflict and provides a better future. Response should be between 30 and 50 words."
            }
            NarrativeField::Cta => {
                "A clear and persuasive call to action for the audience. Response should be between 30 and 50 words."
            }
        }
    }

    /// Why this element works, shown next to the generated text.
    pub fn explanation(self) -> &'static str {
        match self {
            NarrativeField::Hook => {
                "In a world saturated with information, you have seconds to capture interest. \
                 A provocative question, a surprising statistic, or a bold statement cuts through \
                 the noise and makes your audience lean in."
            }
            NarrativeField::Emotion => {
                "Logic makes people think, but emotion makes them act. Tapping into a core human \
                 emotion creates a memorable, relatable experience and a genuine connection."
            }
            NarrativeField::Conflict => {
                "Defining the villain of your story makes your product the clear hero. This tension \
                 highlights the stakes and makes the need for a solution urgent."
            }
            NarrativeField::Resolution => {
                "This is where your product saves the day, demonstrating tangible value and painting \
                 a clear picture of a better future for your customer."
            }
            NarrativeField::Cta => {
                "A compelling story is wasted without a clear next step. The call to action channels \
                 the momentum you've built into a specific, measurable action."
            }
        }
    }
}

/// A complete five-part marketing narrative.
///
/// A `Narrative` returned by the generation client always has all five
/// fields non-empty; see [`Narrative::from_json_str`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Narrative {
    /// Attention-grabbing opening
    pub hook: String,
    /// Core emotion the narrative evokes
    pub emotion: String,
    /// Problem or pain point
    pub conflict: String,
    /// How the product resolves the conflict
    pub resolution: String,
    /// Call to action
    pub cta: String,
}

impl Narrative {
    /// Text of a single field.
    pub fn get(&self, field: NarrativeField) -> &str {
        match field {
            NarrativeField::Hook => &self.hook,
            NarrativeField::Emotion => &self.emotion,
            NarrativeField::Conflict => &self.conflict,
            NarrativeField::Resolution => &self.resolution,
            NarrativeField::Cta => &self.cta,
        }
    }

    /// Fields paired with their text, in display order.
    pub fn fields(&self) -> impl Iterator<Item = (NarrativeField, &str)> {
        NarrativeField::ALL.into_iter().map(|f| (f, self.get(f)))
    }

    /// Reject a narrative with any blank field.
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` naming the first blank field.
    #[track_caller]
    pub fn validate(&self) -> Result<(), GenerationError> {
        match self.fields().find(|(_, text)| text.trim().is_empty()) {
            Some((field, _)) => Err(GenerationError::failed(format!(
                "narrative field '{}' is empty",
                field
            ))),
            None => Ok(()),
        }
    }

    /// Parse a structured provider response into a complete narrative.
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` if the JSON is malformed, a field is
    /// missing, or a field is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use pitchcraft_core::Narrative;
    ///
    /// let json = r#"{"hook":"h","emotion":"e","conflict":"c","resolution":"r","cta":"a"}"#;
    /// let narrative = Narrative::from_json_str(json).unwrap();
    /// assert_eq!(narrative.cta, "a");
    ///
    /// assert!(Narrative::from_json_str(r#"{"hook":"h"}"#).is_err());
    /// ```
    #[track_caller]
    pub fn from_json_str(text: &str) -> Result<Self, GenerationError> {
        let narrative: Narrative = serde_json::from_str(text.trim())
            .map_err(|e| GenerationError::failed(format!("unparsable narrative: {}", e)))?;
        narrative.validate()?;
        Ok(narrative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn sample() -> Narrative {
        Narrative {
            hook: "hook".into(),
            emotion: "emotion".into(),
            conflict: "conflict".into(),
            resolution: "resolution".into(),
            cta: "cta".into(),
        }
    }

    #[test]
    fn display_order_matches_declaration_order() {
        let iterated: Vec<_> = NarrativeField::iter().collect();
        assert_eq!(iterated, NarrativeField::ALL.to_vec());
    }

    #[test]
    fn fields_follow_display_order() {
        let narrative = sample();
        let texts: Vec<_> = narrative.fields().map(|(_, t)| t).collect();
        assert_eq!(texts, ["hook", "emotion", "conflict", "resolution", "cta"]);
    }

    #[test]
    fn blank_field_fails_validation() {
        let mut narrative = sample();
        narrative.conflict = "   ".into();
        let err = narrative.validate().unwrap_err();
        assert!(err.to_string().contains("conflict"));
    }

    #[test]
    fn partial_json_is_rejected() {
        let json = r#"{"hook":"h","emotion":"e","conflict":"c","resolution":"r"}"#;
        assert!(Narrative::from_json_str(json).is_err());
    }

    #[test]
    fn schema_descriptions_carry_word_limits() {
        for field in NarrativeField::ALL {
            assert!(field.schema_description().contains("between 30 and 50 words"));
        }
    }
}
