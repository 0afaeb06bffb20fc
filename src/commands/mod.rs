//! # CLI Command Implementations
//!
//! One module per `catalog-sync` subcommand. Each module contains:
//! - An `Args` struct defining the command's options, derived with `clap`.
//! - An `execute` function that runs the command by calling into the
//!   `catalog_sync` library.

pub mod completions;
pub mod generate;
pub mod validate;
