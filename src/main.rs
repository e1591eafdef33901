//! `brand-context` command line.
//!
//! - `serve`: load the brand guide once and answer questions over HTTP
//! - `extract`: turn the brand-guide PDF into the text file the server loads
//! - `context`: print the excerpt a question would be answered from
//! - `ask`: answer one question through the model

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use brand_context::answer::{AnsweringService, OpenAiChatClient, RetryPolicy, RetryingGenerator};
use brand_context::config::{AppConfig, LogConfig, LogFormat, API_KEY_ENV};
use brand_context::document::{self, Document};
use brand_context::selection::ContextSelector;
use brand_context::server::{self, AppState};

#[derive(Parser)]
#[command(name = "brand-context", version, about = "Brand-guide question answering")]
struct Cli {
    /// Configuration file (defaults to an optional brand-context.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve,

    /// Extract the text of a PDF brand guide
    Extract {
        pdf: PathBuf,
        #[arg(long, default_value = "pdf_text.txt")]
        out: PathBuf,
    },

    /// Print the context selected for a question
    Context {
        question: String,
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_chars: Option<u64>,
        /// Print the full selection record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Answer a single question
    Ask { question: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.log);

    match cli.command {
        Command::Serve => serve(&config).await,
        Command::Extract { pdf, out } => extract(&pdf, &out),
        Command::Context {
            question,
            max_chars,
            json,
        } => print_context(&config, &question, max_chars, json),
        Command::Ask { question } => ask(&config, &question).await,
    }
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn load_document(config: &AppConfig) -> Result<Document> {
    document::load_configured(&config.document).context("The brand guide text is required to start")
}

fn build_service(config: &AppConfig) -> Result<AnsweringService> {
    let api_key = AppConfig::openai_api_key()
        .with_context(|| format!("{API_KEY_ENV} is missing from the environment or .env"))?;

    let document = load_document(config)?;
    let selector = ContextSelector::from_config(&config.selection)?;
    let client = OpenAiChatClient::new(&config.llm, api_key)?;
    let generator = RetryingGenerator::new(client, RetryPolicy::from(&config.llm));

    Ok(AnsweringService::new(document, selector, Arc::new(generator)))
}

async fn serve(config: &AppConfig) -> Result<()> {
    info!("Starting brand-context v{}", env!("CARGO_PKG_VERSION"));

    let service = build_service(config).map_err(|e| {
        tracing::error!(error = %e, "Startup failed");
        e
    })?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    server::run(addr, AppState::new(service)).await?;
    Ok(())
}

fn extract(pdf: &std::path::Path, out: &std::path::Path) -> Result<()> {
    let text = document::write_extracted(pdf, out)?;

    println!("Extraction OK -> {}", out.display());
    println!("Characters: {}", text.chars().count());
    println!("--- PREVIEW ---");
    for line in text.trim().lines().take(10) {
        println!("{line}");
    }
    Ok(())
}

fn print_context(config: &AppConfig, question: &str, max_chars: Option<u64>, json: bool) -> Result<()> {
    let document = load_document(config)?;
    let mut selector = ContextSelector::from_config(&config.selection)?;
    if let Some(max_chars) = max_chars {
        let max_chars = usize::try_from(max_chars).context("--max-chars is too large")?;
        selector = selector.with_max_chars(max_chars);
    }

    let window = selector.select(question, &document);
    if json {
        println!("{}", serde_json::to_string_pretty(&window)?);
    } else {
        println!("{}", window.text);
    }
    Ok(())
}

async fn ask(config: &AppConfig, question: &str) -> Result<()> {
    let service = build_service(config)?;
    let answer = service.answer(question).await?;
    println!("{}", answer.text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_rejects_zero_budget() {
        assert!(Cli::try_parse_from(["brand-context", "context", "logo", "--max-chars", "0"]).is_err());

        let cli = Cli::try_parse_from(["brand-context", "context", "logo", "--max-chars", "1"]).unwrap();
        match cli.command {
            Command::Context { max_chars, .. } => assert_eq!(max_chars, Some(1)),
            _ => panic!("expected the context command"),
        }
    }
}
