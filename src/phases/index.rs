//! Phase 1: Artifact Index Builder
//!
//! Folds the package map into a per-package, per-repository view: which
//! artifact names each package supplies in each repository (its include
//! filter) and on which architectures it ships artifacts built for another
//! architecture (its multilib list).

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::arch;
use crate::prepopulate::PackageMap;

/// Aggregated view of one (package, repository) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRepoEntry {
    /// Artifact names seen across all architectures, first-seen order.
    pub include_filter: IndexSet<String>,
    /// Architectures carrying an artifact whose suffix is neither that
    /// architecture nor `noarch`.
    pub multilib: IndexSet<String>,
}

/// Package -> repository -> [`PackageRepoEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactIndex {
    packages: IndexMap<String, IndexMap<String, PackageRepoEntry>>,
}

impl ArtifactIndex {
    /// Packages in first-seen order, each with its repositories in first-seen
    /// order.
    pub fn packages(
        &self,
    ) -> impl Iterator<Item = (&str, &IndexMap<String, PackageRepoEntry>)> {
        self.packages.iter().map(|(name, repos)| (name.as_str(), repos))
    }

    pub fn get(&self, package: &str, repository: &str) -> Option<&PackageRepoEntry> {
        self.packages.get(package).and_then(|repos| repos.get(repository))
    }

    pub fn contains_package(&self, package: &str) -> bool {
        self.packages.contains_key(package)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Build the index from every artifact observation in `map`.
///
/// Every package key gets an entry, even when its artifact list is empty.
pub fn execute(map: &PackageMap) -> ArtifactIndex {
    let mut packages: IndexMap<String, IndexMap<String, PackageRepoEntry>> = IndexMap::new();

    for (repository, _, package) in map.package_keys() {
        packages
            .entry(package.to_string())
            .or_default()
            .entry(repository.to_string())
            .or_default();
    }

    for record in map.records() {
        let entry = packages
            .entry(record.package.to_string())
            .or_default()
            .entry(record.repository.to_string())
            .or_default();

        if arch::is_multilib(record.artifact, record.architecture) {
            entry.multilib.insert(record.architecture.to_string());
        }
        entry.include_filter.insert(record.artifact.to_string());
    }

    debug!("Indexed {} packages", packages.len());
    ArtifactIndex { packages }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(set: &IndexSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_include_filter_is_deduplicated_in_first_seen_order() {
        let map = PackageMap::new()
            .with("BaseOS", "x86_64", "glibc", "glibc-2.34-1.x86_64")
            .with("BaseOS", "x86_64", "glibc", "glibc-2.34-1.i686")
            .with("BaseOS", "aarch64", "glibc", "glibc-2.34-1.aarch64")
            .with("BaseOS", "aarch64", "glibc", "glibc-2.34-1.x86_64");

        let index = execute(&map);
        let entry = index.get("glibc", "BaseOS").unwrap();
        assert_eq!(
            names(&entry.include_filter),
            vec!["glibc-2.34-1.x86_64", "glibc-2.34-1.i686", "glibc-2.34-1.aarch64"]
        );
    }

    #[test]
    fn test_cross_arch_artifact_marks_observing_arch_as_multilib() {
        let map = PackageMap::new()
            .with("BaseOS", "x86_64", "glibc", "glibc-2.34-1.x86_64")
            .with("BaseOS", "x86_64", "glibc", "glibc-2.34-1.i686")
            .with("BaseOS", "aarch64", "glibc", "glibc-2.34-1.aarch64");

        let index = execute(&map);
        assert_eq!(names(&index.get("glibc", "BaseOS").unwrap().multilib), vec!["x86_64"]);
    }

    #[test]
    fn test_foreign_suffix_on_aarch64_is_multilib() {
        let map = PackageMap::new().with("R1", "aarch64", "bar", "bar-2-1.x86_64");
        let index = execute(&map);
        assert_eq!(names(&index.get("bar", "R1").unwrap().multilib), vec!["aarch64"]);
    }

    #[test]
    fn test_noarch_and_suffixless_artifacts_are_never_multilib() {
        let map = PackageMap::new()
            .with("BaseOS", "x86_64", "tzdata", "tzdata-2024a-1.noarch")
            .with("BaseOS", "aarch64", "odd", "odd");

        let index = execute(&map);
        assert!(index.get("tzdata", "BaseOS").unwrap().multilib.is_empty());
        let odd = index.get("odd", "BaseOS").unwrap();
        assert!(odd.multilib.is_empty());
        assert_eq!(names(&odd.include_filter), vec!["odd"]);
    }

    #[test]
    fn test_package_without_artifacts_is_indexed() {
        let map = PackageMap::from_json(
            r#"{"BaseOS": {"x86_64": {"foo": [], "bar": ["bar-1-1.x86_64"]}}}"#,
            "prepopulate.json",
        )
        .unwrap();

        let index = execute(&map);
        assert!(index.contains_package("foo"));
        let foo = index.get("foo", "BaseOS").unwrap();
        assert!(foo.include_filter.is_empty());
        assert!(foo.multilib.is_empty());
        let order: Vec<_> = index.packages().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["foo", "bar"]);
    }

    #[test]
    fn test_package_order_follows_first_observation() {
        let map = PackageMap::new()
            .with("BaseOS", "x86_64", "zsh", "zsh-5.8-1.x86_64")
            .with("BaseOS", "x86_64", "bash", "bash-5.1-2.x86_64")
            .with("AppStream", "x86_64", "zsh", "zsh-5.8-1.x86_64");

        let index = execute(&map);
        let order: Vec<_> = index.packages().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["zsh", "bash"]);

        let zsh_repos: Vec<_> = index
            .packages()
            .next()
            .map(|(_, repos)| repos.keys().cloned().collect())
            .unwrap_or_default();
        assert_eq!(zsh_repos, vec!["BaseOS", "AppStream"]);
        assert_eq!(index.len(), 2);
    }
}
