//! Lifespan
//!
//! Command-line front end for the estimator: fills the form from arguments,
//! runs the calculation and prints text or JSON.

mod commands;
mod state;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use estimator::countdown::{Clock, FixedClock, SystemClock};
use estimator::EngineConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use commands::FormArgs;
use state::AppState;

#[derive(Parser)]
#[command(name = "lifespan")]
#[command(version, about = "Life expectancy estimates with a live countdown")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pin the current time (YYYY-MM-DDTHH:MM:SS, read as UTC)
    #[arg(long, global = true)]
    now: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate life expectancy and derived statistics
    Estimate {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Run the live countdown
    Countdown {
        #[command(flatten)]
        form: FormArgs,
        /// How long to keep ticking
        #[arg(long, default_value = "5")]
        seconds: u64,
    },
    /// Print a shareable link for a calculation
    Share {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Load and recompute a shared link
    Load {
        /// Full link or bare query string
        link: String,
    },
    /// List achievements and which are unlocked
    Achievements {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Years gained by a lifestyle change
    Scenario {
        /// quit-smoking, more-exercise, healthy-diet or less-stress; all when omitted
        name: Option<String>,
        #[command(flatten)]
        form: FormArgs,
    },
    /// List the baseline table
    Countries,
    /// Print the effective configuration
    Config,
}

fn parse_now(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .with_context(|| format!("invalid --now '{}' (expected YYYY-MM-DDTHH:MM:SS)", raw))
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("cannot load config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    // Logs go to stderr so stdout stays parseable
    let level = if cli.verbose || config.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let clock: Arc<dyn Clock> = match cli.now.as_deref() {
        Some(raw) => Arc::new(FixedClock(parse_now(raw)?)),
        None => Arc::new(SystemClock),
    };
    info!("Lifespan starting at {}", clock.now());

    let mut state = AppState::new(config, clock);
    let json = cli.json;

    match cli.command {
        Commands::Estimate { form } => {
            form.apply(&mut state)?;
            commands::estimate::run(&mut state, json)
        }
        Commands::Countdown { form, seconds } => {
            form.apply(&mut state)?;
            commands::countdown::run(&mut state, seconds, json)
        }
        Commands::Share { form } => {
            form.apply(&mut state)?;
            commands::share::run_share(&mut state, json)
        }
        Commands::Load { link } => commands::share::run_load(&mut state, &link, json),
        Commands::Achievements { form } => {
            form.apply(&mut state)?;
            commands::lifestyle::run_achievements(&mut state, json)
        }
        Commands::Scenario { name, form } => {
            form.apply(&mut state)?;
            commands::lifestyle::run_scenario(&mut state, name.as_deref(), json)
        }
        Commands::Countries => commands::config::run_countries(json),
        Commands::Config => commands::config::run_config(&mut state, json),
    }
}
