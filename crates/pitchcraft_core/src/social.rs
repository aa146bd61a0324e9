//! Platform-tailored social media posts.

use pitchcraft_error::GenerationError;
use serde::{Deserialize, Serialize};

/// Social platform a post is written for.
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
pub enum Platform {
    /// Video sharing
    Youtube,
    /// Photo sharing
    Instagram,
    /// Professional network
    Linkedin,
    /// General social network
    Facebook,
    /// Microblogging
    X,
}

impl Platform {
    /// All platforms in display order.
    pub const ALL: [Platform; 5] = [
        Platform::Youtube,
        Platform::Instagram,
        Platform::Linkedin,
        Platform::Facebook,
        Platform::X,
    ];

    /// JSON property name used in provider schemas.
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Brand name shown to the user.
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Youtube => "YouTube",
            Platform::Instagram => "Instagram",
            Platform::Linkedin => "LinkedIn",
            Platform::Facebook => "Facebook",
            Platform::X => "X",
        }
    }

    /// Formatting instructions sent to the provider for this platform.
    pub fn formatting_instructions(self) -> &'static str {
        match self {
            Platform::Youtube => {
                "A detailed and engaging YouTube video description. IMPORTANT: Use line breaks to create separate paragraphs for a summary, key points (if applicable), and a concluding section with links and hashtags."
            }
            Platform::Instagram => {
                "A visually-focused Instagram caption. IMPORTANT: Use emojis and multiple short paragraphs with line breaks for readability. End with a separated block of relevant hashtags."
            }
            Platform::Linkedin => {
                "A professional and insightful LinkedIn post. IMPORTANT: Structure the post with short paragraphs (2-3 sentences each) and use bullet points for lists to make it scannable. Focus on the business problem and solution. Use professional hashtags."
            }
            Platform::Facebook => {
                "A friendly and shareable Facebook post. IMPORTANT: Use ample whitespace and line breaks to make the post easy to read on mobile. Ask a question to encourage engagement and include relevant hashtags."
            }
            Platform::X => {
                "A concise and punchy post for X (formerly Twitter). Keep it short, use 1-3 key hashtags, and have a clear call to action. Use line breaks sparingly if needed to separate thoughts within the character limit."
            }
        }
    }
}

/// One post per [`Platform`]; all five are always present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocialMediaPosts {
    /// YouTube video description
    pub youtube: String,
    /// Instagram caption
    pub instagram: String,
    /// LinkedIn post
    pub linkedin: String,
    /// Facebook post
    pub facebook: String,
    /// X post
    pub x: String,
}

impl SocialMediaPosts {
    /// Post text for one platform.
    pub fn get(&self, platform: Platform) -> &str {
        match platform {
            Platform::Youtube => &self.youtube,
            Platform::Instagram => &self.instagram,
            Platform::Linkedin => &self.linkedin,
            Platform::Facebook => &self.facebook,
            Platform::X => &self.x,
        }
    }

    /// Platforms paired with their posts, in display order.
    pub fn posts(&self) -> impl Iterator<Item = (Platform, &str)> {
        Platform::ALL.into_iter().map(|p| (p, self.get(p)))
    }

    /// Parse a structured provider response, rejecting partial sets.
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` if the JSON is malformed or any platform
    /// is missing or blank.
    #[track_caller]
    pub fn from_json_str(text: &str) -> Result<Self, GenerationError> {
        let posts: SocialMediaPosts = serde_json::from_str(text.trim())
            .map_err(|e| GenerationError::failed(format!("unparsable social posts: {}", e)))?;
        if let Some((platform, _)) = posts.posts().find(|(_, t)| t.trim().is_empty()) {
            return Err(GenerationError::failed(format!(
                "social post for '{}' is empty",
                platform.display_name()
            )));
        }
        Ok(posts)
    }
}
