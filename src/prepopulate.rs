//! # Package Map
//!
//! The build system describes its gathered content as a nested JSON mapping:
//!
//! ```json
//! {
//!   "BaseOS": {
//!     "x86_64": { "bash": ["bash-5.1-2.el9.x86_64"] },
//!     "aarch64": { "bash": ["bash-5.1-2.el9.aarch64"] }
//!   }
//! }
//! ```
//!
//! [`PackageMap`] is the typed form of that document. It is validated once at
//! ingestion and is immutable afterwards. Iteration follows the input order at
//! every level so that repeated runs over the same file are deterministic.

use indexmap::IndexMap;
use std::path::Path;

use crate::arch::ArchitectureSet;
use crate::error::{Error, Result};

type Packages = IndexMap<String, Vec<String>>;
type Arches = IndexMap<String, Packages>;

/// A single observation of an artifact: the package that produced it, the
/// repository and architecture it was observed under, and its literal name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactRecord<'a> {
    pub package: &'a str,
    pub repository: &'a str,
    pub architecture: &'a str,
    pub artifact: &'a str,
}

/// Typed `repository -> architecture -> package -> [artifact]` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMap {
    repositories: IndexMap<String, Arches>,
}

impl PackageMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON document. `origin` names the input in error messages.
    pub fn from_json(content: &str, origin: &str) -> Result<Self> {
        let repositories: IndexMap<String, Arches> =
            serde_json::from_str(content).map_err(|e| Error::Prepopulate {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { repositories })
    }

    /// Read and parse a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::Prepopulate {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content, &path.display().to_string())
    }

    /// Record one artifact observation, creating intermediate levels as needed.
    pub fn insert(&mut self, repository: &str, architecture: &str, package: &str, artifact: &str) {
        self.repositories
            .entry(repository.to_string())
            .or_default()
            .entry(architecture.to_string())
            .or_default()
            .entry(package.to_string())
            .or_default()
            .push(artifact.to_string());
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(
        mut self,
        repository: &str,
        architecture: &str,
        package: &str,
        artifact: &str,
    ) -> Self {
        self.insert(repository, architecture, package, artifact);
        self
    }

    /// Every (repository, architecture, package) key in input order,
    /// including packages whose artifact list is empty.
    pub fn package_keys(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.repositories.iter().flat_map(|(repository, arches)| {
            arches.iter().flat_map(move |(architecture, packages)| {
                packages.keys().map(move |package| {
                    (repository.as_str(), architecture.as_str(), package.as_str())
                })
            })
        })
    }

    /// Every (repository, architecture, package, artifact) quadruple, once,
    /// in input order.
    pub fn records(&self) -> impl Iterator<Item = ArtifactRecord<'_>> {
        self.repositories.iter().flat_map(|(repository, arches)| {
            arches.iter().flat_map(move |(architecture, packages)| {
                packages.iter().flat_map(move |(package, artifacts)| {
                    artifacts.iter().map(move |artifact| ArtifactRecord {
                        package,
                        repository,
                        architecture,
                        artifact,
                    })
                })
            })
        })
    }

    /// Architectures observed across all repositories, in first-seen order.
    pub fn architectures(&self) -> ArchitectureSet {
        self.repositories
            .values()
            .flat_map(|arches| arches.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn repositories(&self) -> impl Iterator<Item = &str> {
        self.repositories.keys().map(String::as_str)
    }

    /// Whether `artifact` was observed for `package` under `repository` and
    /// `architecture`. Any missing level counts as absent.
    pub fn contains(
        &self,
        repository: &str,
        architecture: &str,
        package: &str,
        artifact: &str,
    ) -> bool {
        self.repositories
            .get(repository)
            .and_then(|arches| arches.get(architecture))
            .and_then(|packages| packages.get(package))
            .is_some_and(|artifacts| artifacts.iter().any(|a| a == artifact))
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "BaseOS": {
            "x86_64": {"bash": ["bash-5.1-2.x86_64"], "tzdata": ["tzdata-2024a-1.noarch"]},
            "aarch64": {"bash": ["bash-5.1-2.aarch64"]}
        },
        "AppStream": {
            "s390x": {"httpd": ["httpd-2.4-1.s390x"]}
        }
    }"#;

    #[test]
    fn test_from_json_preserves_input_order() {
        let map = PackageMap::from_json(SAMPLE, "sample.json").unwrap();
        assert_eq!(map.repositories().collect::<Vec<_>>(), vec!["BaseOS", "AppStream"]);
        assert_eq!(
            map.architectures().iter().collect::<Vec<_>>(),
            vec!["x86_64", "aarch64", "s390x"]
        );
    }

    #[test]
    fn test_records_visits_every_quadruple_once() {
        let map = PackageMap::from_json(SAMPLE, "sample.json").unwrap();
        let records: Vec<_> = map.records().collect();
        assert_eq!(records.len(), 4);
        assert_eq!(
            records[1],
            ArtifactRecord {
                package: "tzdata",
                repository: "BaseOS",
                architecture: "x86_64",
                artifact: "tzdata-2024a-1.noarch",
            }
        );
    }

    #[test]
    fn test_contains_checks_every_level() {
        let map = PackageMap::from_json(SAMPLE, "sample.json").unwrap();
        assert!(map.contains("BaseOS", "x86_64", "tzdata", "tzdata-2024a-1.noarch"));
        assert!(!map.contains("BaseOS", "aarch64", "tzdata", "tzdata-2024a-1.noarch"));
        assert!(!map.contains("BaseOS", "s390x", "bash", "bash-5.1-2.s390x"));
        assert!(!map.contains("CRB", "x86_64", "bash", "bash-5.1-2.x86_64"));
        assert!(!map.contains("BaseOS", "x86_64", "bash", "bash-5.1-3.x86_64"));
    }

    #[test]
    fn test_package_keys_include_empty_artifact_lists() {
        let map = PackageMap::from_json(
            r#"{"BaseOS": {"x86_64": {"foo": [], "bar": ["bar-1-1.x86_64"]}}}"#,
            "prepopulate.json",
        )
        .unwrap();
        assert_eq!(
            map.package_keys().collect::<Vec<_>>(),
            vec![("BaseOS", "x86_64", "foo"), ("BaseOS", "x86_64", "bar")]
        );
        assert_eq!(map.records().count(), 1);
    }

    #[test]
    fn test_malformed_json_names_origin() {
        let err = PackageMap::from_json(r#"{"BaseOS": {"x86_64": ["oops"]}}"#, "prepopulate.json")
            .unwrap_err();
        let display = err.to_string();
        assert!(display.contains("prepopulate.json"));
        assert!(display.contains("Package map error"));
    }

    #[test]
    fn test_builder_matches_parsed_form() {
        let built = PackageMap::new()
            .with("BaseOS", "x86_64", "bash", "bash-5.1-2.x86_64")
            .with("BaseOS", "x86_64", "tzdata", "tzdata-2024a-1.noarch")
            .with("BaseOS", "aarch64", "bash", "bash-5.1-2.aarch64")
            .with("AppStream", "s390x", "httpd", "httpd-2.4-1.s390x");
        let parsed = PackageMap::from_json(SAMPLE, "sample.json").unwrap();
        assert_eq!(built, parsed);
    }
}
