//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks a build
//! configuration without writing a catalog.
//!
//! ## Functionality
//!
//! - **Configuration Validation**: Parses the configuration and checks the
//!   required keys and every `repo_match` pattern.
//! - **Input Validation**: Resolves and parses the package map, variants and
//!   module defaults the configuration references.
//! - **Synthesis Dry Run**: Runs the synthesis phases in memory, which also
//!   validates module stream declarations.
//!
//! This command is read-only.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use catalog_sync::config;
use catalog_sync::output::{emoji, status, Marker, OutputConfig};
use catalog_sync::phases::orchestrator;
use catalog_sync::suggestions;

/// Check a build configuration and the inputs it references
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the build configuration (YAML)
    #[arg(short, long, value_name = "PATH", env = "CATALOG_SYNC_CONFIG")]
    pub config: PathBuf,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config_path = &args.config;
    if !config_path.exists() {
        return Err(suggestions::config_not_found(config_path));
    }
    println!(
        "{}",
        status(
            &out,
            Marker::Scan,
            &format!("Validating configuration: {}", config_path.display())
        )
    );

    let build_config = match config::from_file(config_path) {
        Ok(build_config) => {
            println!("{} Configuration file parsed successfully", emoji(&out, Marker::Ok));
            build_config
        }
        Err(e) => {
            println!("{} Configuration parsing failed: {}", emoji(&out, Marker::Error), e);
            return Err(anyhow::anyhow!("Configuration parsing failed: {}", e));
        }
    };

    let base_dir = config_path.parent().unwrap_or(Path::new("."));
    let inputs = match orchestrator::load_inputs(&build_config, base_dir, None) {
        Ok(inputs) => {
            println!("{} Referenced inputs loaded", emoji(&out, Marker::Ok));
            inputs
        }
        Err(e) => {
            println!("{} Failed to load inputs: {}", emoji(&out, Marker::Error), e);
            return Err(anyhow::anyhow!("Input validation failed: {}", e));
        }
    };

    println!("\n{} Configuration Summary:", emoji(&out, Marker::Info));
    println!("   Repositories: {}", inputs.packages.repositories().count());
    println!("   Architectures: {}", inputs.packages.architectures().len());
    println!("   Additional multilib: {}", inputs.additional_multilib.len());
    println!("   Excluded multilib: {}", inputs.exclude_multilib_filter.len());
    println!("   Exclude filters: {}", inputs.exclude_filter.len());
    println!("   Include filters: {}", inputs.include_filter.len());
    println!("   Module defaults: {}", inputs.module_defaults.len());
    if build_config.variants_file.is_some() {
        println!("   Variants: {}", inputs.variants.len());
        for variant in &inputs.variants {
            println!(
                "     {}: {} arches, {} groups, {} environments, {} modules",
                variant.id,
                variant.arches.len(),
                variant.groups.len(),
                variant.environments.len(),
                variant.modules.len()
            );
        }
    }

    match orchestrator::synthesize(&inputs) {
        Ok(document) => {
            println!(
                "\n{} Synthesis succeeded: {} packages, {} exclude filters",
                emoji(&out, Marker::Ok),
                document.packages.len(),
                document.exclude_filter.len()
            );
            Ok(())
        }
        Err(e) => {
            println!("\n{} Synthesis failed: {}", emoji(&out, Marker::Error), e);
            Err(anyhow::anyhow!("Validation failed: {}", e))
        }
    }
}
