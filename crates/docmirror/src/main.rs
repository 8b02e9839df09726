//! docmirror CLI - mirrors repository Markdown into the docs tree.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "docmirror")]
#[command(about = "Mirror repository Markdown into a static-site docs tree")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docmirror.toml config file
    #[arg(short, long, default_value = "docmirror.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one mirror pass and exit
    Sync {
        /// Source root (defaults to config or ".")
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Target docs directory (defaults to config or "docs")
        #[arg(short, long)]
        target: Option<PathBuf>,
    },

    /// Mirror once, then watch the source tree and resync on changes
    Watch {
        /// Debounce window in milliseconds
        #[arg(short, long)]
        debounce: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Sync { source, target } => {
            commands::sync::run(&cli.config, source, target).await?;
        }
        Commands::Watch { debounce } => {
            commands::watch::run(&cli.config, debounce).await?;
        }
    }

    Ok(())
}
