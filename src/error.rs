//! # Error Handling
//!
//! This module defines the centralized error type for the `catalog-sync`
//! library. It uses the `thiserror` library to create a single `Error` enum
//! covering every fatal condition the synthesis pipeline can hit.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors. Each
//!   variant names the input that failed (a file path, a configuration key or
//!   a source reference) so the user can find the problem.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Every error here is fatal. The pipeline is a one-shot transform with no
//! retries, and nothing is written to disk until the whole document has been
//! assembled and rendered.

use thiserror::Error;

/// Main error type for catalog-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// The build configuration file could not be read or parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A required key is absent from the build configuration.
    #[error("Missing configuration key: {key}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    MissingConfigKey {
        key: String,
        /// Optional hint, usually a close match for a misspelled key
        hint: Option<String>,
    },

    /// A source reference could not be resolved to local content.
    #[error("Source error for {reference}: {message}")]
    Source { reference: String, message: String },

    /// The package map (repository -> architecture -> package -> artifacts)
    /// is malformed.
    #[error("Package map error in {path}: {message}")]
    Prepopulate { path: String, message: String },

    /// The variants description could not be parsed.
    #[error("Variants parsing error in {path}: {message}")]
    VariantParse { path: String, message: String },

    /// A module-defaults document could not be parsed.
    #[error("Module defaults error in {path}: {message}")]
    ModuleDefaults { path: String, message: String },

    /// A module declaration is not of the form `name:stream`.
    #[error("Invalid module declaration '{entry}' in repository {repository}: expected name:stream")]
    ModuleSpec { repository: String, entry: String },

    /// The rendered catalog could not be persisted.
    #[error("Failed to write catalog to {path}: {message}")]
    Output { path: String, message: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
