//! # Build Configuration Schema and Parsing
//!
//! This module defines the build configuration file consumed by `catalog-sync`
//! and the logic for parsing it. The file is YAML and carries, next to many
//! settings this tool does not care about, the keys below:
//!
//! ```yaml
//! gather_prepopulate: {scm: file, file: prepopulate.json}
//! multilib_whitelist: {"*": [glibc]}
//! multilib_blacklist: {"*": [kernel]}
//! filter_packages:
//!   - ["^.*$", {"*": [foo-debug]}]
//! additional_packages:
//!   - ["^AppStream$", {"x86_64": [bar]}]
//! variants_file: {scm: file, file: variants.xml}
//! module_defaults_dir: {scm: file, dir: module_defaults}
//! source_package_prefix: "rocky-"
//! ```
//!
//! ## Validation
//!
//! The first five keys are required; a missing one is reported as
//! [`Error::MissingConfigKey`], with a hint when a present key looks like a
//! misspelling. The multilib mappings must have at least one entry (the list
//! of the first entry is used). Every `repo_match` in the filter lists must be
//! a valid regular expression. Unknown keys are ignored.

use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

use crate::catalog::GlobFilter;
use crate::error::{Error, Result};
use crate::source::SourceRef;
use crate::suggestions;

/// Prefix marking source-fork packages when the configuration names none.
pub const DEFAULT_SOURCE_PREFIX: &str = "rocky-";

/// Validated build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Package map (repository -> arch -> package -> artifacts), JSON.
    pub gather_prepopulate: SourceRef,
    /// Packages that get multilib artifacts in addition to the defaults.
    pub multilib_whitelist: Vec<String>,
    /// Packages that never get multilib artifacts.
    pub multilib_blacklist: Vec<String>,
    pub filter_packages: Vec<GlobFilter>,
    pub additional_packages: Vec<GlobFilter>,
    /// Variants XML; enables module membership resolution.
    pub variants_file: Option<SourceRef>,
    /// Directory of module-defaults YAML files.
    pub module_defaults_dir: Option<SourceRef>,
    pub source_package_prefix: String,
}

#[derive(Debug, Deserialize)]
struct RawBuildConfig {
    gather_prepopulate: Option<SourceRef>,
    multilib_whitelist: Option<IndexMap<String, Vec<String>>>,
    multilib_blacklist: Option<IndexMap<String, Vec<String>>>,
    filter_packages: Option<Vec<GlobFilter>>,
    additional_packages: Option<Vec<GlobFilter>>,
    variants_file: Option<SourceRef>,
    module_defaults_dir: Option<SourceRef>,
    source_package_prefix: Option<String>,
    #[serde(flatten)]
    other: IndexMap<String, serde_yaml::Value>,
}

fn require<T>(
    value: Option<T>,
    key: &str,
    other: &IndexMap<String, serde_yaml::Value>,
) -> Result<T> {
    value.ok_or_else(|| Error::MissingConfigKey {
        key: key.to_string(),
        hint: suggestions::missing_key_hint(key, other.keys().map(String::as_str)),
    })
}

/// Parse configuration YAML into a validated [`BuildConfig`].
pub fn parse(yaml_content: &str) -> Result<BuildConfig> {
    let raw: RawBuildConfig =
        serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: None,
        })?;

    let other = &raw.other;
    let gather_prepopulate = require(raw.gather_prepopulate, "gather_prepopulate", other)?;
    let whitelist = require(raw.multilib_whitelist, "multilib_whitelist", other)?;
    let blacklist = require(raw.multilib_blacklist, "multilib_blacklist", other)?;
    let filter_packages = require(raw.filter_packages, "filter_packages", other)?;
    let additional_packages = require(raw.additional_packages, "additional_packages", other)?;

    for filter in filter_packages.iter().chain(&additional_packages) {
        Regex::new(&filter.repo_match).map_err(|e| Error::ConfigParse {
            message: format!("invalid repo_match '{}': {}", filter.repo_match, e),
            hint: Some("repo_match is a regular expression, e.g. \"^BaseOS$\"".to_string()),
        })?;
    }

    if !other.is_empty() {
        debug!(
            "Ignoring configuration keys: {}",
            other.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
        );
    }

    Ok(BuildConfig {
        gather_prepopulate,
        multilib_whitelist: first_list(whitelist, "multilib_whitelist")?,
        multilib_blacklist: first_list(blacklist, "multilib_blacklist")?,
        filter_packages,
        additional_packages,
        variants_file: raw.variants_file,
        module_defaults_dir: raw.module_defaults_dir,
        source_package_prefix: raw
            .source_package_prefix
            .unwrap_or_else(|| DEFAULT_SOURCE_PREFIX.to_string()),
    })
}

/// The list of the first entry of a per-arch package mapping.
fn first_list(mapping: IndexMap<String, Vec<String>>, key: &str) -> Result<Vec<String>> {
    mapping
        .into_iter()
        .next()
        .map(|(_, list)| list)
        .ok_or_else(|| Error::ConfigParse {
            message: format!("'{}' has no entries", key),
            hint: Some(format!("use {}: {{\"*\": []}} for an empty list", key)),
        })
}

/// Read and parse a configuration file.
///
/// Read failures and parse errors name `path`.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<BuildConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigParse {
        message: format!("{}: {}", path.display(), e),
        hint: None,
    })?;
    parse(&content).map_err(|e| match e {
        Error::ConfigParse { message, hint } => Error::ConfigParse {
            message: format!("{}: {}", path.display(), message),
            hint,
        },
        other => other,
    })
}
