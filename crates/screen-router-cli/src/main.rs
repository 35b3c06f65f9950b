mod commands;
mod console;
mod demo;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "screen-router")]
#[command(version, about = "Screen Router CLI - replay navigation against a demo app", long_about = None)]
struct Cli {
    /// Log verbosity (-v for route changes, -vv for matching details)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Navigate through a sequence of routes ("back" steps back in history)
    Replay {
        /// Routes to visit, in order
        routes: Vec<String>,

        /// Configuration file (defaults to ./screen-router.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the history bound from the configuration
        #[arg(short, long)]
        max_history: Option<usize>,
    },

    /// List the demo app's rules in matching order
    Routes,

    /// Build the route registered under a name
    Url {
        /// Screen name, or rule text for unnamed rules
        name: String,

        /// Variables as key=value pairs
        params: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    // Execute command
    match cli.command {
        Commands::Replay {
            routes,
            config,
            max_history,
        } => {
            commands::replay::execute(&routes, config.as_deref(), max_history)?;
        }
        Commands::Routes => {
            commands::routes::execute()?;
        }
        Commands::Url { name, params } => {
            commands::url::execute(&name, &params)?;
        }
    }

    Ok(())
}
