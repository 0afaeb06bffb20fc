//! # Source References
//!
//! The build configuration points at its inputs through `scm` mappings:
//!
//! ```yaml
//! gather_prepopulate:
//!   scm: file
//!   file: prepopulate.json
//! module_defaults_dir:
//!   scm: file
//!   dir: module_defaults
//! ```
//!
//! Only `scm: file` references are resolved here, relative to the directory
//! holding the configuration file. Fetching from version control is left to
//! whatever prepares that directory.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A reference to input content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceRef {
    pub scm: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
}

impl SourceRef {
    /// Local reference to a single file.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            scm: "file".to_string(),
            file: Some(path.into()),
            dir: None,
            repo: None,
            branch: None,
        }
    }

    /// Local reference to a directory.
    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            scm: "file".to_string(),
            file: None,
            dir: Some(path.into()),
            repo: None,
            branch: None,
        }
    }

    /// Path of the referenced file. `key` names the reference in errors.
    pub fn resolve_file(&self, base: &Path, key: &str) -> Result<PathBuf> {
        self.ensure_local(key)?;
        self.file
            .as_deref()
            .map(|file| base.join(file))
            .ok_or_else(|| Error::Source {
                reference: key.to_string(),
                message: "missing 'file' entry".to_string(),
            })
    }

    /// Path of the referenced directory. `key` names the reference in errors.
    pub fn resolve_dir(&self, base: &Path, key: &str) -> Result<PathBuf> {
        self.ensure_local(key)?;
        self.dir
            .as_deref()
            .map(|dir| base.join(dir))
            .ok_or_else(|| Error::Source {
                reference: key.to_string(),
                message: "missing 'dir' entry".to_string(),
            })
    }

    fn ensure_local(&self, key: &str) -> Result<()> {
        if self.scm == "file" {
            return Ok(());
        }
        let origin = match (&self.repo, &self.branch) {
            (Some(repo), Some(branch)) => format!(" ({}@{})", repo, branch),
            (Some(repo), None) => format!(" ({})", repo),
            _ => String::new(),
        };
        Err(Error::Source {
            reference: key.to_string(),
            message: format!(
                "unsupported scm type '{}'{}; check the content out and use 'scm: file'",
                self.scm, origin
            ),
        })
    }
}
