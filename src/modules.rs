//! # Module Defaults
//!
//! Module-defaults documents declare the default stream and the default
//! profiles of a module. They come either as bare mappings or wrapped in a
//! modulemd-defaults envelope:
//!
//! ```yaml
//! document: modulemd-defaults
//! version: 1
//! data:
//!   module: nodejs
//!   stream: "18"
//!   profiles:
//!     "18": [common]
//! ```
//!
//! A file may hold several YAML documents. Envelopes for other document kinds
//! are skipped. A document without `module` is a fatal error.

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

const ENVELOPE_KIND: &str = "modulemd-defaults";

/// Default stream and profiles for one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDefaults {
    pub module: String,
    pub stream: Option<String>,
    /// Stream -> default profile names.
    pub profiles: IndexMap<String, Vec<String>>,
}

/// Parse every defaults document in `content`. `origin` names the input in
/// error messages.
pub fn parse(content: &str, origin: &str) -> Result<Vec<ModuleDefaults>> {
    let error = |message: String| Error::ModuleDefaults {
        path: origin.to_string(),
        message,
    };

    let mut defaults = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let value = Value::deserialize(document).map_err(|e| error(e.to_string()))?;
        if value.is_null() {
            continue;
        }
        let Some(body) = unwrap_envelope(&value) else {
            debug!("{}: skipping non-defaults document", origin);
            continue;
        };
        defaults.push(read_defaults(body).map_err(error)?);
    }
    Ok(defaults)
}

/// Read every `*.yaml`/`*.yml` file directly inside `dir`, sorted by file name.
pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<ModuleDefaults>> {
    let mut defaults = Vec::new();
    for path in defaults_files(dir.as_ref())? {
        let origin = path.display().to_string();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::ModuleDefaults {
            path: origin.clone(),
            message: e.to_string(),
        })?;
        defaults.extend(parse(&content, &origin)?);
    }
    Ok(defaults)
}

fn defaults_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| Error::ModuleDefaults {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let is_yaml = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if entry.file_type().is_file() && is_yaml {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Returns the defaults body, or `None` for envelopes of another kind.
fn unwrap_envelope(value: &Value) -> Option<&Value> {
    match value.get("document") {
        Some(kind) if kind.as_str() != Some(ENVELOPE_KIND) => None,
        Some(_) => value.get("data"),
        None => Some(value),
    }
}

fn read_defaults(body: &Value) -> std::result::Result<ModuleDefaults, String> {
    let module = body
        .get("module")
        .and_then(scalar_text)
        .ok_or_else(|| "missing required key 'module'".to_string())?;

    let stream = match body.get("stream") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            scalar_text(value)
                .ok_or_else(|| format!("module {}: 'stream' must be a scalar", module))?,
        ),
    };

    let mut profiles = IndexMap::new();
    match body.get("profiles") {
        None | Some(Value::Null) => {}
        Some(Value::Mapping(mapping)) => {
            for (key, names) in mapping {
                let key = scalar_text(key)
                    .ok_or_else(|| format!("module {}: profile keys must be scalars", module))?;
                let names = match names {
                    Value::Null => Vec::new(),
                    Value::Sequence(items) => items
                        .iter()
                        .map(|item| {
                            scalar_text(item).ok_or_else(|| {
                                format!(
                                    "module {}: profile '{}' has a non-scalar entry",
                                    module, key
                                )
                            })
                        })
                        .collect::<std::result::Result<Vec<_>, _>>()?,
                    _ => return Err(format!("module {}: profile '{}' must be a list", module, key)),
                };
                profiles.insert(key, names);
            }
        }
        Some(_) => return Err(format!("module {}: 'profiles' must be a mapping", module)),
    }

    Ok(ModuleDefaults {
        module,
        stream,
        profiles,
    })
}

/// Text of a scalar YAML value. Numbers keep their written form, so an
/// unquoted `2.4` stream reads as `"2.4"`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
