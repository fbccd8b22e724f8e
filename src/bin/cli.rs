//! Homework bot CLI
//!
//! Polls the homework review API and relays status changes to one Telegram
//! chat. Secrets are read from the environment (or a `.env` file).

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use homework_bot::{
    config::{self, Secrets},
    error::Result,
    models::Config,
    pipeline::{CycleOutcome, PollLoop},
    services::{Notifier, PracticumClient, TelegramChannel},
    utils::{self, http},
};

/// homework-bot - Homework Review Notifier
#[derive(Parser, Debug)]
#[command(
    name = "homework-bot",
    version,
    about = "Relays homework review status changes to Telegram"
)]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file (stderr output is kept)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Start polling from this Unix timestamp instead of now
    #[arg(long, global = true, value_name = "TIMESTAMP")]
    from_date: Option<i64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll until interrupted (default)
    Run,

    /// Run a single poll cycle and exit
    Once,

    /// Validate configuration and secrets without contacting any service
    Check,
}

/// Initialize logging based on verbosity flag and optional log file.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    builder.format_timestamp_secs();

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(utils::log::stderr_and(file))));
    }

    builder.init();
    Ok(())
}

/// Wire the API client, Telegram channel and poll loop together.
fn build_loop(
    config: &Config,
    secrets: &Secrets,
    from_date: Option<i64>,
) -> Result<PollLoop<PracticumClient, TelegramChannel>> {
    let client = http::create_async_client(&config.http)?;

    let source = PracticumClient::new(
        client.clone(),
        config.api.endpoint_url()?,
        &secrets.practicum_token,
    );
    let channel = TelegramChannel::new(
        client,
        config.telegram.api_base_url()?,
        &secrets.telegram_token,
        &secrets.chat_id,
    );

    let poll = PollLoop::new(
        source,
        Notifier::new(channel),
        Duration::from_secs(config.poll.retry_secs),
    );
    Ok(match from_date {
        Some(cursor) => poll.with_cursor(cursor),
        None => poll,
    })
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Received Ctrl-C, shutting down");
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dotenv = dotenvy::dotenv();
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    if let Ok(path) = dotenv {
        log::debug!("Loaded environment from {}", path.display());
    }

    log::info!("Homework bot starting...");

    let (config, secrets) = config::load_all(&cli.config).inspect_err(|e| {
        log::error!("Startup aborted: {}", e);
    })?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Check => {
            log::info!("✓ Config OK");
            log::info!("    endpoint: {}", config.api.endpoint);
            log::info!("    telegram: {}", config.telegram.api_base);
            log::info!("    retry interval: {}s", config.poll.retry_secs);
            log::info!("    timeout: {}s", config.http.timeout_secs);
            log::info!("✓ Secrets present (chat {})", secrets.chat_id);
        }

        Command::Once => {
            let mut poll = build_loop(&config, &secrets, cli.from_date)?;
            match poll.run_cycle().await {
                CycleOutcome::Reported { sent, failed } => {
                    log::info!("Reported {} status change(s), {} undelivered", sent, failed);
                }
                CycleOutcome::NothingNew { .. } => log::info!("No new statuses"),
                CycleOutcome::Failed { message, .. } => log::warn!("Cycle failed: {}", message),
            }
            log::info!("Next cursor: {}", poll.cursor());
        }

        Command::Run => {
            let mut poll = build_loop(&config, &secrets, cli.from_date)?;
            poll.run(shutdown_signal()).await;
        }
    }

    log::info!("Done!");

    Ok(())
}
