//! Generation settings sent with every chat message.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_PROVIDER: &str = "openai";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_P: f32 = 1.0;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Model parameters read at message-send time.
///
/// Field names on the wire and in the persisted snapshot follow the backend
/// (`top_p`, `max_tokens`), the rest are camelCase like the other client
/// records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(rename = "modelProvider")]
    pub model_provider: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    #[serde(default)]
    pub debug: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model_provider: DEFAULT_MODEL_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_tokens: DEFAULT_MAX_TOKENS,
            debug: false,
        }
    }
}

/// Partial update merged into [`GenerationSettings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub model_provider: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
    pub debug: Option<bool>,
}

impl GenerationSettings {
    /// Applies every field present in `patch`.
    ///
    /// Numeric values are clamped to the ranges the settings controls allow:
    /// temperature 0..=2, top_p 0..=1, max_tokens at least 1.
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(provider) = patch.model_provider {
            self.model_provider = provider;
        }
        if let Some(model) = patch.model {
            self.model = model;
        }
        if let Some(t) = patch.temperature {
            self.temperature = t.clamp(0.0, 2.0);
        }
        if let Some(p) = patch.top_p {
            self.top_p = p.clamp(0.0, 1.0);
        }
        if let Some(m) = patch.max_tokens {
            self.max_tokens = m.max(1);
        }
        if let Some(d) = patch.debug {
            self.debug = d;
        }
    }
}
