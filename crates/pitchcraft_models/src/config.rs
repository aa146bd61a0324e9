//! Provider configuration.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from pitchcraft.toml)
//! - `~/.config/pitchcraft/pitchcraft.toml`
//! - `./pitchcraft.toml`
//! - `PITCHCRAFT_*` environment variables

use config::{Config, Environment, File, FileFormat};
use pitchcraft_error::{ConfigError, PitchcraftError, PitchcraftResult};
use pitchcraft_interface::PollPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../pitchcraft.toml");

/// Environment variables consulted for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Gemini provider settings.
///
/// # Example
///
/// ```no_run
/// use pitchcraft_models::ProviderConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ProviderConfig::load()?;
/// println!("Narratives come from {}", config.text_model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// REST root, e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub base_url: String,
    /// Model for narratives and social posts
    pub text_model: String,
    /// Model for the collage
    pub image_model: String,
    /// Model for the video
    pub video_model: String,
    /// Seconds between video operation status queries
    pub poll_interval_secs: u64,
    /// Give up polling after this many seconds; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_poll_wait_secs: Option<u64>,
    /// Requested video resolution
    pub video_resolution: String,
    /// Requested video aspect ratio
    pub video_aspect_ratio: String,
    /// Directory for downloaded videos; in-memory when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_dir: Option<PathBuf>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-2.5-pro".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            video_model: "veo-3.1-fast-generate-preview".to_string(),
            poll_interval_secs: 10,
            max_poll_wait_secs: None,
            video_resolution: "720p".to_string(),
            video_aspect_ratio: "16:9".to_string(),
            media_dir: None,
        }
    }
}

impl ProviderConfig {
    /// Load configuration from every source.
    ///
    /// Missing user files are skipped.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a source cannot be parsed.
    #[instrument]
    pub fn load() -> PitchcraftResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/pitchcraft/pitchcraft.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("pitchcraft").required(false))
            .add_source(Environment::with_prefix("PITCHCRAFT").try_parsing(true));

        Self::finish(builder, "pitchcraft.toml or PITCHCRAFT_* environment")
    }

    /// Load bundled defaults overridden by one specific file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file is missing or malformed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> PitchcraftResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));

        Self::finish(builder, &path.as_ref().display().to_string())
    }

    /// Build, deserialize, and validate; `origin` labels any error.
    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        origin: &str,
    ) -> PitchcraftResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                PitchcraftError::from(
                    ConfigError::new(format!("Failed to build configuration: {}", e))
                        .with_origin(origin),
                )
            })?
            .try_deserialize()
            .map_err(|e| {
                PitchcraftError::from(
                    ConfigError::new(format!("Failed to parse configuration: {}", e))
                        .with_origin(origin),
                )
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::new("must be at least 1 second").with_origin("poll_interval_secs"));
        }
        Ok(())
    }

    /// Poll policy built from the interval and optional deadline.
    pub fn poll_policy(&self) -> PollPolicy {
        let policy = PollPolicy::new(Duration::from_secs(self.poll_interval_secs));
        match self.max_poll_wait_secs {
            Some(secs) => policy.with_max_wait(Duration::from_secs(secs)),
            None => policy,
        }
    }
}

/// Read the API key from `GEMINI_API_KEY`, falling back to `API_KEY`.
///
/// # Errors
///
/// Returns a configuration error if neither variable holds a non-empty value.
pub fn api_key_from_env() -> PitchcraftResult<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or_else(|| {
            ConfigError::new("No API key set")
                .with_origin(API_KEY_VARS.join(" or "))
                .into()
        })
}
