//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf serve [--config <path>] [--host <h>] [--port <p>] [--db <path>]
//! - bookshelf init [--config <path>] [--db <path>]
//! - bookshelf openapi [--config <path>] [--host <h>] [--port <p>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bookshelf - a small REST API for book records
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the book API over HTTP
    Serve {
        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Create an empty backing file if none exists
    Init {
        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Print the OpenAPI document to stdout
    Openapi {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

/// Settings shared by every command. Flags and environment override the
/// config file, which overrides built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Path to a JSON configuration file
    #[arg(long, env = "BOOKSHELF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, env = "BOOKSHELF_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Backing JSON file
    #[arg(long, env = "BOOKSHELF_DB")]
    pub db: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
