//! Phase 3: Exclusion Rule Compiler
//!
//! Folds asymmetry records into one exclusion rule per repository. Each rule
//! lists, per architecture, the bare `name-version-release` of every noarch
//! artifact that must not be synced there.

use indexmap::{IndexMap, IndexSet};
use log::debug;

use super::asymmetry::AsymmetryRecord;
use crate::arch;
use crate::catalog::GlobFilter;

/// Anchored pattern matching exactly one repository name.
pub fn repo_match(repository: &str) -> String {
    format!("^{}$", regex::escape(repository))
}

/// Compile the records into rules, ordered by first-encountered repository.
pub fn execute(records: &[AsymmetryRecord]) -> Vec<GlobFilter> {
    let mut by_repo: IndexMap<&str, IndexMap<&str, IndexSet<&str>>> = IndexMap::new();

    for record in records {
        let arches = by_repo.entry(record.repository.as_str()).or_default();
        for (artifact, missing_on) in &record.missing {
            for missing_arch in missing_on {
                arches
                    .entry(missing_arch.as_str())
                    .or_default()
                    .insert(arch::bare_name(artifact));
            }
        }
    }

    let rules: Vec<GlobFilter> = by_repo
        .into_iter()
        .filter(|(_, arches)| arches.values().any(|names| !names.is_empty()))
        .map(|(repository, arches)| GlobFilter {
            repo_match: repo_match(repository),
            arches: arches
                .into_iter()
                .map(|(arch, names)| {
                    (
                        arch.to_string(),
                        names.into_iter().map(str::to_string).collect(),
                    )
                })
                .collect(),
        })
        .collect();

    debug!("Compiled {} exclusion rules", rules.len());
    rules
}
