use crate::config::Settings;

#[derive(Debug, Clone)]
pub struct AnthropicProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: i32,
}

impl AnthropicProviderConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            host: settings.host.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            temperature: Some(settings.temperature),
            max_tokens: settings.max_tokens,
        }
    }
}
