//! Soundio CLI Application

mod commands;

use clap::{Parser, Subcommand};
use soundio_core::domain::selection::SoundRole;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "soundio")]
#[command(about = "Pick the audio devices used for calls", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the devices of the current snapshot
    Devices {
        /// Device snapshot file (TOML)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the device selected for each role
    Resolve {
        /// Device snapshot file (TOML)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Save a preferred device for a role
    Prefer {
        /// sound-input, sound-output or ringtone-output
        role: SoundRole,
        /// Exact device name
        name: String,
    },
    /// Remove the saved device for a role
    Forget {
        /// sound-input, sound-output or ringtone-output
        role: SoundRole,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let manager = commands::config_manager(cli.config)?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Devices { snapshot, json } => {
            commands::devices(&manager, snapshot, json, &mut stdout).await
        }
        Command::Resolve { snapshot, json } => {
            commands::resolve(&manager, snapshot, json, &mut stdout).await
        }
        Command::Prefer { role, name } => commands::prefer(&manager, role, &name).await,
        Command::Forget { role } => commands::forget(&manager, role).await,
    }
}
