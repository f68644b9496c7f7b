//! Skillsync CLI Binary
//!
//! Command-line entry point for skill directory synchronization.

use clap::Parser;
use skillsync::cli::{Cli, CliContext};
use skillsync::logging::init_logging;
use std::process;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_level.as_deref());

    let context = match CliContext::new(cli.project_root.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing project context: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
