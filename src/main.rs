//! flatcode - Flatten a source tree into a single annotated text file
//!
//! flatcode provides:
//! - A deterministic, lexically ordered walk with hidden/cache pruning
//! - Exclusion of executables, lock files and its own output
//! - Per-file `File: <name>` headers
//! - An approximate (whitespace) token count

use clap::Parser;
use colored::Colorize;

mod backends;
mod cli;
mod core;
mod flows;

use crate::core::error::FlattenError;

fn main() {
    let cli = cli::Cli::parse();
    let stderr_color = cli::stderr_color(&cli);

    if let Err(err) = cli::init_output(&cli).and_then(|()| cli::run(cli)) {
        let code = err
            .downcast_ref::<FlattenError>()
            .map(FlattenError::exit_code)
            .unwrap_or(1);
        // The summary's color choice follows stdout; this line goes to stderr
        colored::control::set_override(stderr_color);
        eprintln!("{} {}", "error:".red().bold(), err);
        std::process::exit(code);
    }
}
