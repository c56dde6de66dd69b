//! codelens — AI-powered code review web service.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use std::io::Read;
use std::path::Path;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use codelens::config::Config;
use codelens::constants;
use codelens::env::Env;
use codelens::history::HistoryStore;
use codelens::models::{HistoryEntry, ReviewRequest};
use codelens::output::OutputRenderer;
use codelens::output::json::JsonRenderer;
use codelens::output::terminal::TerminalRenderer;
use codelens::providers::rig::RigProvider;
use codelens::review::ReviewService;
use codelens::server::{self, AppState};

use cli::args::{Cli, Command, HistoryAction, OutputFormat, ReviewArgs, ServeArgs};

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => run_serve(args).await,
        Command::Review(args) => run_review(args).await,
        Command::History { action } => run_history(action).await,
        Command::Version => {
            println!("{} {}", constants::APP_NAME.bold(), constants::VERSION.green().bold());
            Ok(())
        }
    }
}

fn load_config() -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    Config::load(Some(&cwd), &Env::real()).context("failed to load configuration")
}

/// Open the configured history store, or an in-memory one when no
/// location can be determined.
async fn open_history(config: &Config) -> Result<HistoryStore> {
    match config.history.resolved_path() {
        Some(path) => HistoryStore::open(&path, config.history.capacity)
            .await
            .with_context(|| format!("failed to open history at {}", path.display())),
        None => {
            tracing::warn!("no history location available, keeping history in memory");
            Ok(HistoryStore::in_memory(config.history.capacity))
        }
    }
}

fn build_review_service(config: &Config) -> Result<ReviewService> {
    let provider = RigProvider::new(config.provider.clone())
        .context("model provider is not configured")?;
    Ok(ReviewService::new(Arc::new(provider)))
}

/// Run the HTTP service.
async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = load_config()?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(path) = args.history_path {
        config.history.path = Some(path);
    }

    let reviews = build_review_service(&config)?;
    let history = Arc::new(open_history(&config).await?);

    tracing::info!(
        provider = %config.provider.name,
        model = config.provider.model(),
        history = ?history.path(),
        "starting review service"
    );

    let state = AppState::new(reviews, history);
    server::serve(state, &config.server)
        .await
        .with_context(|| format!("server failed on {}", config.server.bind))
}

/// Review one file from the command line.
async fn run_review(args: ReviewArgs) -> Result<()> {
    let config = load_config()?;
    let reviews = build_review_service(&config)?;

    let code = read_source(&args.file)?;
    let request = ReviewRequest {
        code: Some(code),
        language: args.language(),
        persona: args.persona,
        focus_area: args.focus.clone(),
        description: args.description.clone(),
    };

    let result = reviews
        .review(&request)
        .await
        .context("review failed")?;

    let rendered = match args.format {
        OutputFormat::Terminal => TerminalRenderer.render(&result),
        OutputFormat::Json => JsonRenderer.render(&result),
    };
    println!("{rendered}");

    if args.save {
        let history = open_history(&config).await?;
        let entry = HistoryEntry::new(result, request.language, request.focus_area, None);
        let saved = history.save(entry).await.context("failed to save review")?;
        eprintln!("  {} saved as {}", "✔".green().bold(), saved.id);
    }

    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Manage saved review history.
async fn run_history(action: HistoryAction) -> Result<()> {
    let config = load_config()?;

    match action {
        HistoryAction::Path => match config.history.resolved_path() {
            Some(p) => println!("{}", p.display()),
            None => bail!("history location could not be determined"),
        },
        HistoryAction::List => {
            let history = open_history(&config).await?;
            let entries = history.list().await;
            if entries.is_empty() {
                println!("No saved reviews.");
            }
            for entry in &entries {
                println!("{}", cli::history_line(entry));
            }
        }
        HistoryAction::Clear => {
            let history = open_history(&config).await?;
            let removed = history.clear().await.context("failed to clear history")?;
            println!("Removed {removed} saved review(s).");
        }
    }

    Ok(())
}
