//! Phase 5: Catalog Assembly
//!
//! Merges the artifact index, the compiled exclusion rules, the configuration
//! passthroughs and the module metadata into one [`CatalogDocument`].
//!
//! Exclusion rules stay a top-level list; they are not re-attached to the
//! packages they came from. User `filter_packages` entries come first in
//! `exclude_filter`, followed by the compiled rules.

use indexmap::IndexSet;
use log::{debug, warn};

use super::index::ArtifactIndex;
use super::membership::{self, ModuleIndex};
use super::CatalogInputs;
use crate::catalog::{
    CatalogDocument, GlobFilter, ModuleConfiguration, ModuleDefault, ModuleProfile,
    PackageCatalogEntry, PlatformVersion, RepositoryFilter,
};
use crate::modules::ModuleDefaults;

/// Build the document. One package entry per indexed package, in index order.
pub fn execute(
    inputs: &CatalogInputs,
    index: &ArtifactIndex,
    exclusion_rules: Vec<GlobFilter>,
    modules: &ModuleIndex,
) -> CatalogDocument {
    let packages = index
        .packages()
        .map(|(name, repos)| {
            let package_type = membership::classify(name, modules, &inputs.source_prefix);
            let mut streams =
                membership::streams_by_repository(name, repos.keys().map(String::as_str), modules);
            PackageCatalogEntry {
                name: name.to_string(),
                package_type,
                module_components: Vec::new(),
                repositories: repos
                    .iter()
                    .map(|(repo, entry)| RepositoryFilter {
                        name: repo.clone(),
                        module_streams: streams.swap_remove(repo).unwrap_or_default(),
                        include_filter: entry.include_filter.iter().cloned().collect(),
                        multilib: entry.multilib.iter().cloned().collect(),
                    })
                    .collect(),
            }
        })
        .collect();

    let mut exclude_filter = inputs.exclude_filter.clone();
    exclude_filter.extend(exclusion_rules);

    CatalogDocument {
        module_configuration: inputs
            .platform
            .map(|platform| module_configuration(platform, &inputs.module_defaults, modules)),
        additional_multilib: inputs.additional_multilib.clone(),
        exclude_multilib_filter: inputs.exclude_multilib_filter.clone(),
        exclude_filter,
        include_filter: inputs.include_filter.clone(),
        packages,
    }
}

/// Platform block with the defaults of every module some repository declares.
///
/// Defaults for undeclared modules are dropped. When the same module has
/// several defaults documents the first one wins.
fn module_configuration(
    platform: PlatformVersion,
    defaults: &[ModuleDefaults],
    modules: &ModuleIndex,
) -> ModuleConfiguration {
    let mut seen = IndexSet::new();
    let mut emitted = Vec::new();

    for entry in defaults {
        if !modules.declares(&entry.module) {
            warn!(
                "Dropping defaults for module '{}': no repository declares it",
                entry.module
            );
            continue;
        }
        if !seen.insert(entry.module.as_str()) {
            warn!("Ignoring duplicate defaults for module '{}'", entry.module);
            continue;
        }
        emitted.push(ModuleDefault {
            name: entry.module.clone(),
            stream: entry.stream.clone(),
            profiles: entry
                .profiles
                .iter()
                .map(|(stream, names)| ModuleProfile {
                    stream: stream.clone(),
                    names: names.clone(),
                })
                .collect(),
        });
    }

    debug!("Emitting defaults for {} modules", emitted.len());
    ModuleConfiguration {
        platform,
        defaults: emitted,
    }
}
