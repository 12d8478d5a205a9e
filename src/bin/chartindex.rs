//! Chartindex CLI Binary
//!
//! Command-line interface for the chart screenshot index engine.

use anyhow::Context;
use chartindex::config::ConfigLoader;
use chartindex::logging;
use chartindex::tooling::cli::{Cli, CliContext};
use clap::Parser;
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    logging::init_logging(Some(&config.logging)).context("failed to initialize logging")?;

    let context = CliContext::with_config(config).context("failed to build catalog")?;
    Ok(context.execute(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
