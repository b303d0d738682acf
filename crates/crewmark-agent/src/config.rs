use crewmark_core::config::LlmSettings;
use serde::{Deserialize, Serialize};

/// Supported LLM providers. All speak the OpenAI chat-completions format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// DeepSeek cloud inference — the default provider.
    DeepSeek,
    OpenAi,
    OpenRouter,
}

/// Model configuration handed to the LLM client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub provider: LlmProvider,
    pub model_id: String,
    pub api_key: String,
    pub api_base_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_max_turns() -> u32 {
    25
}

impl ModelConfig {
    /// DeepSeek config from the process-wide LLM settings.
    pub fn from_settings(settings: &LlmSettings) -> Self {
        Self {
            provider: LlmProvider::DeepSeek,
            model_id: settings.model.clone(),
            api_key: settings.api_key.clone(),
            api_base_url: Some(settings.base_url.clone()),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_turns: default_max_turns(),
        }
    }

    /// Same config with a different sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn base_url(&self) -> &str {
        if let Some(url) = &self.api_base_url {
            url
        } else {
            match self.provider {
                LlmProvider::DeepSeek => "https://api.deepseek.com",
                LlmProvider::OpenAi => "https://api.openai.com",
                LlmProvider::OpenRouter => "https://openrouter.ai/api",
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_uses_deepseek() {
        let settings = LlmSettings {
            api_key: "key".to_string(),
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
        };
        let config = ModelConfig::from_settings(&settings);
        assert!(matches!(config.provider, LlmProvider::DeepSeek));
        assert_eq!(config.base_url(), "https://api.deepseek.com");
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn test_with_temperature_override() {
        let settings = LlmSettings {
            api_key: "key".to_string(),
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
        };
        let config = ModelConfig::from_settings(&settings).with_temperature(0.1);
        assert_eq!(config.temperature, 0.1);
    }

    #[test]
    fn test_default_base_urls() {
        let config = ModelConfig {
            provider: LlmProvider::OpenRouter,
            model_id: "m".to_string(),
            api_key: "k".to_string(),
            api_base_url: None,
            temperature: 0.7,
            max_tokens: 4096,
            max_turns: 25,
        };
        assert_eq!(config.base_url(), "https://openrouter.ai/api");
    }
}
