//! Main entry point for the elo-ladder service
//!
//! Runs either a one-shot rating computation over two sheets or the
//! interactive conversation on the console.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use elo_ladder::config::AppConfig;
use elo_ladder::rating::{rank_participants, EloRatingCalculator, RatingEngine};
use elo_ladder::session::{run_conversation, ConsoleTransport, Conversation};
use elo_ladder::sheet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tokio::signal;
use tracing::{error, info};

/// Elo Ladder - head-to-head rating updates from game sheets
#[derive(Parser)]
#[command(
    name = "elo-ladder",
    version,
    about = "Recalculate Elo ratings from a rating sheet and a game sheet",
    long_about = "Elo Ladder reads the current ratings of known participants and an ordered \
                 list of game results, applies a pairwise Elo update per game, and writes \
                 the new rating sheet. Participants missing from the rating sheet are added \
                 with the default rating."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        global = true,
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, global = true, help = "Enable debug mode with verbose logging")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply a game sheet to a rating sheet
    Compute {
        /// Current rating sheet (CSV)
        #[arg(short, long, value_name = "FILE")]
        ratings: Option<PathBuf>,
        /// Game sheet (CSV), rows processed in order
        #[arg(short, long, value_name = "FILE")]
        games: PathBuf,
        /// Where to write the new rating sheet, stdout if omitted
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Print participants and per-game changes as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
    /// Run the rating conversation on the console
    Chat {
        /// Directory for documents sent back in the conversation
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Command::Chat {
        output_dir: Some(dir),
    } = &args.command
    {
        config.transport.output_dir = dir.clone();
    }

    elo_ladder::config::validate_config(&config)?;
    Ok(config)
}

fn compute(
    config: &AppConfig,
    ratings: Option<&Path>,
    games: &Path,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let known = match ratings {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open rating sheet {}", path.display()))?;
            sheet::read_participants(BufReader::new(file))?
        }
        None => Vec::new(),
    };

    let file = File::open(games)
        .with_context(|| format!("Failed to open game sheet {}", games.display()))?;
    let games = sheet::read_game_records(BufReader::new(file))?;
    info!(
        "Loaded {} known participants and {} games",
        known.len(),
        games.len()
    );

    let calculator = EloRatingCalculator::new(config.elo_config())?;
    let mut engine = RatingEngine::with_calculator(calculator, known);
    let mut participants = engine.evaluate(&games);

    let bytes = if json {
        rank_participants(&mut participants);
        let report = serde_json::json!({
            "participants": participants,
            "changes": engine.changes(),
        });
        let mut bytes = serde_json::to_vec_pretty(&report)?;
        bytes.push(b'\n');
        bytes
    } else {
        sheet::participants_to_bytes(&participants)?
    };

    match output {
        Some(path) => {
            std::fs::write(path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote results to {}", path.display());
        }
        None => {
            use std::io::Write;
            std::io::stdout().write_all(&bytes)?;
        }
    }

    Ok(())
}

async fn chat(config: &AppConfig) -> Result<()> {
    let mut conversation = Conversation::new(config.conversation_config())?;
    let mut transport = ConsoleTransport::stdio(config.transport.output_dir.clone());

    info!(
        "💬 {} conversation started, send /start to begin",
        config.service.name
    );

    tokio::select! {
        result = run_conversation(&mut transport, &mut conversation) => result,
        _ = signal::ctrl_c() => {
            info!("🛑 Interrupted, closing conversation");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let result = match &args.command {
        Command::Compute {
            ratings,
            games,
            output,
            json,
        } => compute(&config, ratings.as_deref(), games, output.as_deref(), *json),
        Command::Chat { .. } => chat(&config).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
