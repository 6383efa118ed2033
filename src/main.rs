//! bookshelf CLI entry point
//!
//! Parses arguments, runs the selected command, and on failure prints the
//! error to stderr and exits non-zero. All logic lives in the cli module.

use bookshelf::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
