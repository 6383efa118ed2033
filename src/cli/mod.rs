//! CLI module for the book service
//!
//! Provides command-line interface for:
//! - serve: Open the backing file and serve HTTP
//! - init: Create an empty backing file
//! - openapi: Print the API document

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, SettingsArgs};
pub use commands::{init, load_config, openapi, resolve_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
