//! # Completions Command Implementation
//!
//! Writes a shell completion script for `catalog-sync` to stdout, generated
//! with `clap_complete`.
//!
//! ```bash
//! catalog-sync completions bash > ~/.local/share/bash-completion/completions/catalog-sync
//! catalog-sync completions zsh > ~/.zfunc/_catalog-sync
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "catalog-sync", &mut io::stdout());
    Ok(())
}
