use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `CVPULSE__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelConfig,
}

/// Settings for the chat-model provider behind the primary insight
/// generator. Defaults target Grok's OpenAI-compatible endpoint. An empty
/// API key means the primary path is unavailable and every report comes
/// from the rule-based fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

// Default functions
fn default_base_url() -> String {
    "https://api.x.ai/v1".to_string()
}
fn default_model() -> String {
    "grok-beta".to_string()
}
fn default_temperature() -> f64 {
    0.7
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CVPULSE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
