//! Phase 4: Module Membership Resolver
//!
//! Classifies packages as plain forks, source forks or module-owned forks and
//! collects, per repository, the streams a module-owned package is declared
//! with. Module membership wins over the source-package prefix.

use indexmap::IndexMap;
use log::debug;

use crate::catalog::PackageType;
use crate::error::{Error, Result};

/// A parsed `name:stream` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleStream {
    pub name: String,
    pub stream: String,
}

impl ModuleStream {
    /// Parse `name:stream`. Both parts must be non-empty.
    pub fn parse(repository: &str, entry: &str) -> Result<Self> {
        match entry.split_once(':') {
            Some((name, stream)) if !name.is_empty() && !stream.is_empty() => Ok(Self {
                name: name.to_string(),
                stream: stream.to_string(),
            }),
            _ => Err(Error::ModuleSpec {
                repository: repository.to_string(),
                entry: entry.to_string(),
            }),
        }
    }
}

/// Repository -> module name -> declared streams.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleIndex {
    repositories: IndexMap<String, IndexMap<String, Vec<String>>>,
}

impl ModuleIndex {
    /// Validate raw repository -> `name:stream` declarations.
    pub fn from_declarations(declarations: &IndexMap<String, Vec<String>>) -> Result<Self> {
        let mut repositories: IndexMap<String, IndexMap<String, Vec<String>>> = IndexMap::new();
        for (repository, entries) in declarations {
            let modules = repositories.entry(repository.clone()).or_default();
            for entry in entries {
                let parsed = ModuleStream::parse(repository, entry)?;
                let streams = modules.entry(parsed.name).or_default();
                if !streams.contains(&parsed.stream) {
                    streams.push(parsed.stream);
                }
            }
        }
        Ok(Self { repositories })
    }

    /// Whether any repository declares `module`.
    pub fn declares(&self, module: &str) -> bool {
        self.repositories.values().any(|modules| modules.contains_key(module))
    }

    /// Streams declared for `module` in `repository`.
    pub fn streams(&self, repository: &str, module: &str) -> &[String] {
        self.repositories
            .get(repository)
            .and_then(|modules| modules.get(module))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.values().all(IndexMap::is_empty)
    }
}

/// Classify one package.
pub fn classify(package: &str, modules: &ModuleIndex, source_prefix: &str) -> PackageType {
    if modules.declares(package) {
        PackageType::ModuleFork
    } else if !source_prefix.is_empty() && package.starts_with(source_prefix) {
        PackageType::NormalSrc
    } else {
        PackageType::NormalFork
    }
}

/// Streams to attach to `package` in each of `repositories`; empty for
/// repositories that do not declare it.
pub fn streams_by_repository<'a>(
    package: &str,
    repositories: impl IntoIterator<Item = &'a str>,
    modules: &ModuleIndex,
) -> IndexMap<String, Vec<String>> {
    let streams: IndexMap<String, Vec<String>> = repositories
        .into_iter()
        .map(|repository| (repository.to_string(), modules.streams(repository, package).to_vec()))
        .collect();
    if streams.values().any(|s| !s.is_empty()) {
        debug!("{} is module-owned in {} repositories", package, streams.len());
    }
    streams
}
