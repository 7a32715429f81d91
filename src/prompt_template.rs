use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tera::{Context, Error as TeraError, Tera};

/// Built-in template for the candidate-tag section of the prompt.
pub const TAG_LIST_TEMPLATE: &str = include_str!("prompts/tag-list.md");

/// Built-in template for the full summarization/tagging prompt.
pub const TAGGING_TEMPLATE: &str = include_str!("prompts/summary-tagging.md");

/// Get the path to the prompts directory
fn prompts_dir() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir).join("src").join("prompts")
}

/// Render an inline template against a serializable context.
pub fn render<T: Serialize>(template: &str, context_data: &T) -> Result<String, TeraError> {
    let mut tera = Tera::default();
    tera.add_raw_template("prompt", template)?;
    let context = Context::from_serialize(context_data)?;
    tera.render("prompt", &context)
}

/// Render a template file. Relative paths that don't exist are looked up in
/// the crate's prompts directory.
pub fn render_file<T: Serialize>(
    template_file: impl Into<PathBuf>,
    context_data: &T,
) -> Result<String, TeraError> {
    let template_path = template_file.into();
    let file_path = if !template_path.exists() {
        prompts_dir().join(template_path)
    } else {
        template_path
    };

    let template_content = fs::read_to_string(file_path)
        .map_err(|e| TeraError::chain("Failed to read template file", e))?;
    render(&template_content, context_data)
}
