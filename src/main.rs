//! # Catalog Sync CLI
//!
//! Binary entry point for the `catalog-sync` command-line tool. It parses the
//! command line, initializes logging and dispatches to a subcommand. All of
//! the conversion logic lives in the library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
