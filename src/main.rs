//! nbgen CLI entry point.
//!
//! Parses arguments, runs generation, and converts any failure into a
//! user-friendly colored report before exiting nonzero.

use anyhow::Result;
use clap::Parser;
use nbgen::cli::Cli;
use nbgen::core::error::user_friendly_error;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
