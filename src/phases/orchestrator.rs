//! Orchestrator for the complete catalog generation
//!
//! Loads every input named by the build configuration, runs the synthesis
//! phases in order and, for `generate`, writes the result. Loading happens
//! entirely before synthesis so a bad input aborts the run before any phase
//! runs, and the write step only starts once the document is complete.

use log::{debug, info, warn};
use std::path::Path;

use super::{phase1, phase2, phase3, phase4, phase5, phase6, CatalogInputs};
use crate::catalog::{CatalogDocument, PlatformVersion};
use crate::config::BuildConfig;
use crate::error::Result;
use crate::modules;
use crate::prepopulate::PackageMap;
use crate::variants;

/// Resolve and read every input referenced by `config`.
///
/// `base_dir` is the directory holding the configuration file; source
/// references are relative to it.
pub fn load_inputs(
    config: &BuildConfig,
    base_dir: &Path,
    platform: Option<PlatformVersion>,
) -> Result<CatalogInputs> {
    let prepopulate_path = config
        .gather_prepopulate
        .resolve_file(base_dir, "gather_prepopulate")?;
    debug!("Reading package map from {}", prepopulate_path.display());
    let packages = PackageMap::from_file(&prepopulate_path)?;

    let variants = match &config.variants_file {
        Some(source) => variants::from_file(source.resolve_file(base_dir, "variants_file")?)?,
        None => Vec::new(),
    };

    let module_defaults = match &config.module_defaults_dir {
        Some(source) => modules::from_dir(source.resolve_dir(base_dir, "module_defaults_dir")?)?,
        None => Vec::new(),
    };

    Ok(CatalogInputs {
        packages,
        additional_multilib: config.multilib_whitelist.clone(),
        exclude_multilib_filter: config.multilib_blacklist.clone(),
        exclude_filter: config.filter_packages.clone(),
        include_filter: config.additional_packages.clone(),
        variants,
        module_defaults,
        platform,
        source_prefix: config.source_package_prefix.clone(),
    })
}

/// Run phases 1-5 over loaded inputs.
///
/// Pure apart from logging: the same inputs always give the same document.
pub fn synthesize(inputs: &CatalogInputs) -> Result<CatalogDocument> {
    let arches = inputs.packages.architectures();
    for variant in &inputs.variants {
        for arch in variant.arches.iter().filter(|a| !arches.contains(a)) {
            warn!(
                "Variant {} declares architecture {} which has no packages",
                variant.id, arch
            );
        }
    }

    // Phase 4 input is validated first so a bad module declaration fails
    // before any other work.
    let modules =
        phase4::ModuleIndex::from_declarations(&variants::module_declarations(&inputs.variants))?;

    // Phase 1: Artifact Index
    let index = phase1::execute(&inputs.packages);

    // Phase 2: Noarch Asymmetry
    let asymmetries = phase2::execute(&index, &inputs.packages, &arches);

    // Phase 3: Exclusion Rules
    let rules = phase3::execute(&asymmetries);

    // Phase 4 + 5: Membership and Assembly
    let document = phase5::execute(inputs, &index, rules, &modules);

    info!(
        "Synthesized catalog: {} packages, {} architectures, {} noarch exclusion rules",
        document.packages.len(),
        arches.len(),
        document.exclude_filter.len() - inputs.exclude_filter.len()
    );
    Ok(document)
}

/// Load, synthesize and write the catalog (Phases 1-6).
pub fn execute_generate(
    config: &BuildConfig,
    base_dir: &Path,
    platform: Option<PlatformVersion>,
    output_path: &Path,
) -> Result<CatalogDocument> {
    let inputs = load_inputs(config, base_dir, platform)?;
    if platform.is_none() && !inputs.module_defaults.is_empty() {
        warn!(
            "{} module defaults loaded but no platform version given; they will not be emitted",
            inputs.module_defaults.len()
        );
    }
    let document = synthesize(&inputs)?;

    // Phase 6: Write to Disk
    phase6::execute(&document, output_path)?;

    Ok(document)
}
