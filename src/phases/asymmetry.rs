//! Phase 2: Noarch Asymmetry Detector
//!
//! The mirroring service assumes a noarch artifact is present on every
//! architecture it syncs. When the build system only shipped a noarch
//! artifact on some architectures, that gap has to be made explicit so the
//! exclusion compiler can suppress the artifact on the remaining ones.

use indexmap::IndexMap;
use log::debug;

use super::index::ArtifactIndex;
use crate::arch::{self, ArchitectureSet};
use crate::prepopulate::PackageMap;

/// Noarch artifacts of one (package, repository) pair that are missing on at
/// least one architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsymmetryRecord {
    pub package: String,
    pub repository: String,
    /// Noarch artifact name -> architectures where it is absent.
    pub missing: IndexMap<String, Vec<String>>,
}

/// Find every (package, repository) pair whose noarch artifacts have gaps.
///
/// An artifact is absent on an architecture when the package map has no such
/// repository/architecture, no such package there, or does not list that exact
/// artifact name for it.
pub fn execute(
    index: &ArtifactIndex,
    map: &PackageMap,
    arches: &ArchitectureSet,
) -> Vec<AsymmetryRecord> {
    let mut records = Vec::new();

    for (package, repos) in index.packages() {
        for (repository, entry) in repos {
            let mut missing: IndexMap<String, Vec<String>> = IndexMap::new();

            for artifact in entry.include_filter.iter().filter(|a| arch::is_noarch(a)) {
                let gaps: Vec<String> = arches
                    .iter()
                    .filter(|arch| !map.contains(repository, arch, package, artifact))
                    .map(str::to_string)
                    .collect();
                if !gaps.is_empty() {
                    missing.insert(artifact.clone(), gaps);
                }
            }

            if !missing.is_empty() {
                records.push(AsymmetryRecord {
                    package: package.to_string(),
                    repository: repository.clone(),
                    missing,
                });
            }
        }
    }

    debug!("Found {} noarch asymmetries", records.len());
    records
}
