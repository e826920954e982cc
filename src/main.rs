mod app;
mod buffer;
mod config;
mod editor;
mod error;
mod files;
mod line;
mod location;
mod logging;
mod mode;
mod theme;
mod viewport;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "jot", version, about = "Small modal plain-text editor for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// File to edit or directory to browse
    path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the config file in jot
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config()?;
    let log_file = logging::init_logging(&cfg.log_filter).context("Failed to initialize logging")?;
    info!(log_file = %log_file.display(), "starting");

    let path = match cli.command {
        Some(Commands::Config) => Some(config::config_path()?),
        None => cli.path,
    };
    app::run_app(path, cfg)
}
