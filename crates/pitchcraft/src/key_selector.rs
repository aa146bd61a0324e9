//! API key selection backed by environment variables.

use async_trait::async_trait;
use pitchcraft_error::{ConfigError, PitchcraftResult};
use pitchcraft_interface::ApiKeySelector;
use pitchcraft_models::{API_KEY_VARS, api_key_from_env};

/// Reports a key as selected when `GEMINI_API_KEY` or `API_KEY` is set.
///
/// A terminal has no selection dialog, so asking to select a key fails with
/// a hint naming the variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvKeySelector;

#[async_trait]
impl ApiKeySelector for EnvKeySelector {
    async fn has_selected_api_key(&self) -> PitchcraftResult<bool> {
        Ok(api_key_from_env().is_ok())
    }

    async fn open_select_key(&self) -> PitchcraftResult<()> {
        Err(ConfigError::new("No interactive key selection available; set the variable")
            .with_origin(API_KEY_VARS.join(" or "))
            .into())
    }
}
