//! Arena Viewer - CLI entry point
//!
//! Loads a recorded game from the arena server or a file, then views,
//! prints or verifies it.

#![warn(missing_docs)]

use std::path::Path;

use anyhow::{Context, Result};
use arena_replay::{GameId, LatestFrame, ReplayStrategy};
use arena_viewer::{
    Cli, Command, FileGameSource, GameArgs, GameSource, HttpGameSource, ReplaySession,
    ViewerConfig, parse_game_id, render_frame, tui, verify,
};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match &cli.command {
        Command::View { .. } => init_file_logging(&config)?,
        Command::Print { .. } | Command::Verify { .. } => init_stderr_logging(&config),
    }
    info!(server_url = %config.server_url(), strategy = %config.replay_strategy(), "Configuration resolved");

    let args = cli.command.game_args();
    let game = parse_game_id(&args.game)?;
    let source = build_source(args, &config)?;
    let strategy = *config.replay_strategy();

    match cli.command {
        Command::View { .. } => tui::run_viewer(source.as_ref(), game, strategy).await,
        Command::Print { position, .. } => run_print(source.as_ref(), game, strategy, position).await,
        Command::Verify { .. } => run_verify(source.as_ref(), game).await,
    }
}

/// Config file, then environment, then flags.
fn resolve_config(cli: &Cli) -> Result<ViewerConfig> {
    let mut config = ViewerConfig::load_or_default(&cli.config)?.apply_env();
    if let Some(url) = &cli.server_url {
        config = config.with_server_url(url.clone());
    }
    if let Some(strategy) = cli.strategy {
        config = config.with_replay_strategy(strategy);
    }
    Ok(config)
}

fn build_source(args: &GameArgs, config: &ViewerConfig) -> Result<Box<dyn GameSource>> {
    Ok(match &args.file {
        Some(path) => Box::new(FileGameSource::new(path)),
        None => Box::new(HttpGameSource::from_config(config)?),
    })
}

fn env_filter(config: &ViewerConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()))
}

fn init_stderr_logging(config: &ViewerConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .try_init();
}

/// The TUI owns the terminal, so logs go to a file.
fn init_file_logging(config: &ViewerConfig) -> Result<()> {
    let path: &Path = config.log_file();
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Print the board after `position` turns (the whole game by default).
async fn run_print(
    source: &dyn GameSource,
    game: GameId,
    strategy: ReplayStrategy,
    position: Option<i64>,
) -> Result<()> {
    let mut sink = LatestFrame::new();
    let mut session = ReplaySession::load(source, game, strategy, &mut sink).await?;
    if let Some(warning) = session.terminal_warning() {
        warn!(warning, "Printing a record whose snapshot disagrees with its history");
    }

    if let Some(k) = position {
        session.navigate(arena_replay::NavRequest::SetPosition(k), &mut sink)?;
    }

    let frame = sink
        .current()
        .context("No frame produced for the requested game")?;
    println!("{}", render_frame(&session.title(), frame));
    Ok(())
}

/// Check a record and exit non-zero if anything is wrong.
async fn run_verify(source: &dyn GameSource, game: GameId) -> Result<()> {
    let loaded = source.fetch(game).await?;
    let report = verify(loaded.state());
    print!("{}", report.render());

    if report.passed() {
        Ok(())
    } else {
        anyhow::bail!("Game {} failed verification", game)
    }
}
