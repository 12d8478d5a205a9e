//! Tooling layer: command-line interface over the catalog service.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
