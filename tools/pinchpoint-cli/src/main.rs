//! Pinchpoint CLI — drive the pointer from hand landmark streams.
//!
//! Usage:
//!   pinchpoint run <STREAM>        Replay a landmark stream through the controller
//!   pinchpoint simulate <OUTPUT>   Generate a synthetic landmark stream
//!   pinchpoint check               Validate configuration
//!   pinchpoint init-config         Write a default configuration file

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pinchpoint_platform_core::ScreenGeometry;

mod commands;

#[derive(Parser)]
#[command(
    name = "pinchpoint",
    about = "Hand-gesture pointer control: pinch to click, point to move",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to the XDG config location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a landmark stream through the gesture controller
    Run {
        /// Path to a JSONL landmark stream
        stream: PathBuf,

        /// Write issued pointer intents to this JSONL file
        #[arg(long)]
        intents: Option<PathBuf>,

        /// Screen size as WIDTHxHEIGHT
        #[arg(long, default_value = "1920x1080")]
        screen: ScreenGeometry,

        /// Pace frames at the configured frame rate
        #[arg(long)]
        realtime: bool,

        /// Do not mirror landmarks horizontally
        #[arg(long)]
        no_mirror: bool,

        /// Disable the top-left corner fail-safe
        #[arg(long)]
        no_failsafe: bool,

        /// Start the cursor at the first fingertip position
        #[arg(long)]
        seed: bool,

        /// Release the button when tracking is lost mid-hold
        #[arg(long)]
        release_on_hand_loss: bool,

        /// Print the session summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a synthetic landmark stream
    Simulate {
        /// Output JSONL path
        output: PathBuf,

        /// Session length (seconds)
        #[arg(long, default_value = "9.0")]
        duration: f64,

        /// Frame rate of the generated stream
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Length of one pinch cycle (seconds)
        #[arg(long, default_value = "3.0")]
        cycle: f64,

        /// Positional noise amplitude (normalized)
        #[arg(long, default_value = "0.002")]
        jitter: f64,
    },

    /// Validate configuration and print the effective constants
    Check,

    /// Write a default configuration file
    InitConfig {
        /// Destination (defaults to the XDG config location)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging comes up before load errors are surfaced so they are reported.
    let loaded = commands::load_config(cli.config.as_deref());
    let logging = loaded
        .as_ref()
        .map(|loaded| loaded.config.logging.clone())
        .unwrap_or_default();
    if let Err(e) = pinchpoint_common::logging::init_logging(&logging, cli.verbose) {
        pinchpoint_common::logging::init_logging(&Default::default(), cli.verbose)?;
        tracing::warn!("{e}; falling back to the default level");
    }
    let loaded = loaded?;
    if let Some(problem) = &loaded.problem {
        tracing::warn!(
            path = %loaded.path.display(),
            "Ignoring unreadable config, using defaults: {problem}"
        );
    }

    match cli.command {
        Commands::Run {
            stream,
            intents,
            screen,
            realtime,
            no_mirror,
            no_failsafe,
            seed,
            release_on_hand_loss,
            json,
        } => {
            commands::run::run(commands::run::RunArgs {
                stream,
                intents,
                config: loaded.config,
                screen,
                realtime,
                no_mirror,
                no_failsafe,
                seed,
                release_on_hand_loss,
                json,
            })
            .await
        }
        Commands::Simulate {
            output,
            duration,
            fps,
            cycle,
            jitter,
        } => commands::simulate::run(output, duration, fps, cycle, jitter),
        Commands::Check => commands::check::run(&loaded),
        Commands::InitConfig { output, force } => commands::init_config::run(output, force),
    }
}
