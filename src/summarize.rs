use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::config::Settings;
use crate::prompt_template::{self, TAGGING_TEMPLATE, TAG_LIST_TEMPLATE};
use crate::providers::base::{Provider, Usage};

#[derive(Serialize)]
struct TagListContext {
    tag_list: String,
}

#[derive(Serialize)]
struct TaggingContext {
    tag_list_prompt: String,
    document_content: String,
}

/// The response for one document, plus what it cost in tokens.
#[derive(Debug, Clone)]
pub struct SummarizeOutcome {
    pub text: String,
    pub usage: Usage,
}

/// Runs the fetch-free part of the pipeline: render the tagging prompt and
/// issue a single completion request.
pub struct Summarizer<P> {
    provider: P,
    settings: Settings,
}

impl<P: Provider> Summarizer<P> {
    pub fn new(provider: P, settings: Settings) -> Self {
        Self { provider, settings }
    }

    /// Render the tagging prompt for a document. An empty tag slice renders
    /// an empty candidate-tag section.
    pub fn build_prompt(&self, content: &str, tags: &[String]) -> Result<String> {
        let tag_list_prompt = if tags.is_empty() {
            String::new()
        } else {
            let context = TagListContext {
                tag_list: tags.join(", "),
            };
            match &self.settings.tag_list_template {
                Some(path) => prompt_template::render_file(path, &context)
                    .context("failed to render tag-list template")?,
                None => prompt_template::render(TAG_LIST_TEMPLATE, &context)?,
            }
        };

        let context = TaggingContext {
            tag_list_prompt,
            document_content: truncate(content, self.settings.max_content_chars).to_string(),
        };
        let prompt = match &self.settings.tagging_template {
            Some(path) => prompt_template::render_file(path, &context)
                .context("failed to render tagging template")?,
            None => prompt_template::render(TAGGING_TEMPLATE, &context)?,
        };

        Ok(prompt)
    }

    pub async fn summarize(&self, content: &str, tags: &[String]) -> Result<SummarizeOutcome> {
        let prompt = self.build_prompt(content, tags)?;
        debug!(
            prompt_chars = prompt.len(),
            tags = tags.len(),
            "sending tagging prompt"
        );

        let (text, usage) = self
            .provider
            .complete(&self.settings.system_prompt, &prompt)
            .await?;

        Ok(SummarizeOutcome { text, usage })
    }
}

/// Truncate to at most `max_chars` bytes without splitting a character.
pub fn truncate(text: &str, max_chars: usize) -> &str {
    if text.len() <= max_chars {
        return text;
    }
    let mut end = max_chars;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
