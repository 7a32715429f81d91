use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Model used when the `MODEL` environment variable is unset.
pub const DEFAULT_MODEL: &str = "claude-opus-4-20250514";

const DEFAULT_HOST: &str = "https://api.anthropic.com";

const DEFAULT_SYSTEM_PROMPT: &str = "You are a careful librarian. You summarize documents \
faithfully and choose tags that describe what they are actually about.";

fn default_max_tokens() -> i32 {
    1000
}

fn default_temperature() -> f32 {
    1.0
}

fn default_max_content_chars() -> usize {
    100_000
}

/// Runtime settings for one summarization run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Model name sent to the API
    pub model: String,
    /// API key for the LLM provider
    pub api_key: String,
    /// API endpoint, overridable for self-hosted gateways and tests
    pub host: String,
    /// Maximum tokens in the response
    pub max_tokens: i32,
    /// Sampling temperature
    pub temperature: f32,
    /// System prompt sent with every request
    pub system_prompt: String,
    /// Maximum characters of document content to send
    pub max_content_chars: usize,
    /// Custom template file for the candidate-tag section
    pub tag_list_template: Option<PathBuf>,
    /// Custom template file for the tagging prompt
    pub tagging_template: Option<PathBuf>,
}

impl Settings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            host: DEFAULT_HOST.to_string(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_content_chars: default_max_content_chars(),
            tag_list_template: None,
            tagging_template: None,
        }
    }

    /// Build settings from the environment.
    ///
    /// Supported env vars:
    /// - `ANTHROPIC_API_KEY`: API key (required)
    /// - `MODEL`: model name
    /// - `ANTHROPIC_HOST`: API endpoint
    /// - `BUCKET_SYSTEM_PROMPT`: custom system prompt
    /// - `BUCKET_MAX_TOKENS`: maximum tokens in the response
    /// - `BUCKET_TEMPERATURE`: sampling temperature
    /// - `BUCKET_MAX_CONTENT_CHARS`: max document chars to send
    /// - `BUCKET_TAG_LIST_TEMPLATE`: custom tag-list template file
    /// - `BUCKET_TAGGING_TEMPLATE`: custom tagging template file
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("ANTHROPIC_API_KEY")
            .context("ANTHROPIC_API_KEY must be set in the environment or .env file")?;
        let mut settings = Self::new(api_key);

        if let Ok(val) = env::var("MODEL") {
            settings.model = val;
        }
        if let Ok(val) = env::var("ANTHROPIC_HOST") {
            settings.host = val;
        }
        if let Ok(val) = env::var("BUCKET_SYSTEM_PROMPT") {
            settings.system_prompt = val;
        }
        if let Ok(val) = env::var("BUCKET_MAX_TOKENS") {
            if let Ok(n) = val.parse() {
                settings.max_tokens = n;
            }
        }
        if let Ok(val) = env::var("BUCKET_TEMPERATURE") {
            if let Ok(t) = val.parse() {
                settings.temperature = t;
            }
        }
        if let Ok(val) = env::var("BUCKET_MAX_CONTENT_CHARS") {
            if let Ok(n) = val.parse() {
                settings.max_content_chars = n;
            }
        }
        if let Ok(val) = env::var("BUCKET_TAG_LIST_TEMPLATE") {
            settings.tag_list_template = Some(PathBuf::from(val));
        }
        if let Ok(val) = env::var("BUCKET_TAGGING_TEMPLATE") {
            settings.tagging_template = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::new("test_key");
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.host, DEFAULT_HOST);
        assert_eq!(settings.api_key, "test_key");
        assert_eq!(settings.max_tokens, 1000);
        assert_eq!(settings.max_content_chars, 100_000);
        assert!(settings.tag_list_template.is_none());
    }

    #[test]
    fn test_builders() {
        let settings = Settings::new("test_key")
            .with_model("claude-3-5-haiku-20241022")
            .with_host("http://localhost:8080");
        assert_eq!(settings.model, "claude-3-5-haiku-20241022");
        assert_eq!(settings.host, "http://localhost:8080");
    }

    #[test]
    fn test_from_env_requires_api_key() {
        // Only this test touches ANTHROPIC_API_KEY, so removal is safe here.
        env::remove_var("ANTHROPIC_API_KEY");
        assert!(Settings::from_env().is_err());

        env::set_var("ANTHROPIC_API_KEY", "from_env_key");
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.api_key, "from_env_key");
        env::remove_var("ANTHROPIC_API_KEY");
    }
}
