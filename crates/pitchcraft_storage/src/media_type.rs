//! Media type classification.

/// Type of media content.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum MediaType {
    /// Image content (PNG, JPEG, WebP, etc.)
    Image,
    /// Video content (MP4, WebM, etc.)
    Video,
}

impl MediaType {
    /// Directory name used by filesystem backends.
    pub fn directory(&self) -> &'static str {
        match self {
            MediaType::Image => "images",
            MediaType::Video => "video",
        }
    }

    /// File extension for the default MIME type of this media.
    pub fn default_extension(&self) -> &'static str {
        match self {
            MediaType::Image => "png",
            MediaType::Video => "mp4",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_lowercase_names() {
        assert_eq!(MediaType::from_str("video").unwrap(), MediaType::Video);
        assert_eq!(MediaType::Image.to_string(), "image");
        assert!(MediaType::from_str("audio").is_err());
    }
}
