use anyhow::Result;
use bat::PrettyPrinter;
use clap::Parser;
use cliclack::spinner;
use console::style;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bucket::config::Settings;
use bucket::document::{extract_text, fetch};
use bucket::pricing;
use bucket::providers::anthropic::AnthropicProvider;
use bucket::providers::base::Usage;
use bucket::providers::configs::AnthropicProviderConfig;
use bucket::summarize::Summarizer;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Document to summarize: a URL or a local file path (PDF, HTML, or text)
    source: String,

    /// Comma-separated candidate tags (e.g. "poetry,ocean,nature")
    #[arg(short, long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Model to use (defaults to the MODEL environment variable)
    #[arg(short, long)]
    model: Option<String>,

    /// Maximum tokens in the response
    #[arg(long)]
    max_tokens: Option<i32>,

    /// System prompt override
    #[arg(long)]
    system: Option<String>,

    /// Print token usage and a cost estimate after the response
    #[arg(long)]
    show_cost: bool,

    /// Print the raw response without markdown rendering
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bucket=warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    if let Some(model) = &cli.model {
        settings.model = model.clone();
    }
    if let Some(max_tokens) = cli.max_tokens {
        settings.max_tokens = max_tokens;
    }
    if let Some(system) = &cli.system {
        settings.system_prompt = system.clone();
    }
    debug!(model = %settings.model, "using model");

    let tags: Vec<String> = cli
        .tags
        .iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    let spin = spinner();
    spin.start(format!("fetching {}", cli.source));
    let raw_document = fetch(&cli.source).await?;
    let content = extract_text(&raw_document)?;
    spin.stop(format!("{} ({} chars)", cli.source, content.len()));

    let model = settings.model.clone();
    let provider = AnthropicProvider::new(AnthropicProviderConfig::from_settings(&settings))?;
    let summarizer = Summarizer::new(provider, settings);

    let spin = spinner();
    spin.start("awaiting reply");
    let outcome = summarizer.summarize(&content, &tags).await?;
    spin.stop("");

    if cli.raw {
        println!("{}", outcome.text);
    } else {
        render(&outcome.text);
    }

    if cli.show_cost {
        print_cost(&model, &outcome.usage);
    }

    Ok(())
}

fn render(content: &str) {
    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print()
        .unwrap();
}

fn print_cost(model: &str, usage: &Usage) {
    let count = |tokens: Option<i32>| {
        tokens
            .map(|t| t.to_string())
            .unwrap_or_else(|| "?".to_string())
    };

    println!();
    println!(
        "{} {} input / {} output tokens",
        style("usage:").dim(),
        count(usage.input_tokens),
        count(usage.output_tokens),
    );
    match pricing::estimate(model, usage) {
        Some(cost) => println!("{} {} ({})", style("cost:").dim(), cost, model),
        None => println!("{} no pricing data for {}", style("cost:").dim(), model),
    }
}
