//! dogedex - collection command-line client
//!
//! Reconciles the dog catalog with the account's collection and renders it,
//! and exposes the two single-item calls (add to collection, look up by
//! recognizer label).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dogedex_collection::presenter::{OutputFormat, TerminalPresenter};
use dogedex_collection::services::HttpDogApi;
use dogedex_collection::view_model::run_presenter;
use dogedex_collection::{CollectionReconciler, CollectionViewModel, ResponseStatus};
use dogedex_common::config::{ConfigOverrides, ConfigResolver};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dogedex", version, about = "Dog collection client")]
struct Cli {
    /// Base URL of the dog catalog API
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Account token for endpoints that require authentication
    #[arg(long, global = true)]
    auth_token: Option<String>,

    /// Config file (default: platform config dir / dogedex / config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the catalog with owned dogs revealed
    Collection {
        /// Print entries as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a dog to the account's collection
    Add { dog_id: i64 },
    /// Look up a dog by recognizer label
    Lookup { ml_id: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let resolver = ConfigResolver::new(cli.config.clone());
    let config = resolver
        .resolve(&ConfigOverrides {
            base_url: cli.base_url.clone(),
            auth_token: cli.auth_token.clone(),
            timeout_secs: cli.timeout_secs,
            log_level: cli.log_level.clone(),
        })
        .context("Failed to resolve configuration")?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting dogedex v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    if let Some(path) = resolver.config_path() {
        info!("Config file: {}", path.display());
    }
    info!("API base URL: {}", config.base_url);

    let api = Arc::new(HttpDogApi::new(&config).context("Failed to create HTTP client")?);
    let reconciler = CollectionReconciler::new(api.clone(), api.clone());
    let view_model = CollectionViewModel::new(reconciler, api);

    match cli.command {
        Command::Collection { json } => show_collection(view_model, json).await,
        Command::Add { dog_id } => match view_model.add_to_collection(dog_id).await {
            ResponseStatus::Error(kind) => {
                eprintln!("Error: {} [{}]", kind.user_message(), kind.message_id());
                Ok(ExitCode::FAILURE)
            }
            _ => {
                println!("Dog {} added to your collection", dog_id);
                Ok(ExitCode::SUCCESS)
            }
        },
        Command::Lookup { ml_id } => match view_model.lookup_by_ml_id(&ml_id).await {
            ResponseStatus::Success(item) => {
                println!("{}", serde_json::to_string_pretty(&item)?);
                Ok(ExitCode::SUCCESS)
            }
            ResponseStatus::Error(kind) => {
                eprintln!("Error: {} [{}]", kind.user_message(), kind.message_id());
                Ok(ExitCode::FAILURE)
            }
            ResponseStatus::Loading => Ok(ExitCode::FAILURE),
        },
    }
}

async fn show_collection(view_model: CollectionViewModel, json: bool) -> Result<ExitCode> {
    let format = if json { OutputFormat::Json } else { OutputFormat::Table };
    let presenter_task = tokio::spawn(run_presenter(
        view_model.subscribe(),
        TerminalPresenter::new(std::io::stdout(), format),
    ));

    // Ctrl-C tears the screen down: cancel both in-flight fetches
    let token = CancellationToken::new();
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    let status = view_model.refresh_until_cancelled(&token).await;
    drop(view_model);

    let presenter = presenter_task.await.context("Presenter task failed")?;
    presenter.finish().context("Failed to write output")?;

    match status {
        None => {
            warn!("Interrupted before the collection was loaded");
            Ok(ExitCode::from(130))
        }
        Some(status) if status.is_error() => Ok(ExitCode::FAILURE),
        Some(_) => Ok(ExitCode::SUCCESS),
    }
}
