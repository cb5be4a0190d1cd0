mod cli;
mod commands;
mod tracing_config;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = tracing_config::init(cli.verbose) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let result = match cli.command {
        Commands::Markdown(args) => commands::markdown::run(args, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
