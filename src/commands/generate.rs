//! Generate command implementation
//!
//! The generate command runs the full pipeline:
//! 1. Load the build configuration and every input it references
//! 2. Index artifacts per package and repository
//! 3. Detect noarch asymmetry and compile exclusion rules
//! 4. Resolve module membership
//! 5. Assemble the catalog document
//! 6. Write it to disk

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Instant;

use catalog_sync::catalog::PlatformVersion;
use catalog_sync::config;
use catalog_sync::output::{status, Marker, OutputConfig};
use catalog_sync::phases::orchestrator;
use catalog_sync::suggestions;

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the build configuration (YAML)
    #[arg(short, long, value_name = "PATH", env = "CATALOG_SYNC_CONFIG")]
    pub config: PathBuf,

    /// Output file
    #[arg(short, long, value_name = "PATH", default_value = "catalog.cfg")]
    pub output: PathBuf,

    /// Distribution major version; with --minor, emits the module platform block
    #[arg(long, value_name = "N")]
    pub major: Option<u32>,

    /// Distribution minor version
    #[arg(long, value_name = "N")]
    pub minor: Option<u32>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Resolve `--major`/`--minor` into an optional platform version.
fn platform(major: Option<u32>, minor: Option<u32>) -> Result<Option<PlatformVersion>> {
    match (major, minor) {
        (Some(major), Some(minor)) => Ok(Some(PlatformVersion { major, minor })),
        (None, None) => Ok(None),
        _ => Err(suggestions::platform_version_incomplete()),
    }
}

/// Execute the generate command
pub fn execute(args: GenerateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let start_time = Instant::now();

    let platform = platform(args.major, args.minor)?;
    if !args.config.exists() {
        return Err(suggestions::config_not_found(&args.config));
    }

    if !args.quiet {
        println!(
            "{}",
            status(
                &out,
                Marker::Scan,
                &format!("Reading configuration: {}", args.config.display())
            )
        );
    }
    let build_config = config::from_file(&args.config)?;
    let base_dir = args.config.parent().unwrap_or(Path::new("."));

    match orchestrator::execute_generate(&build_config, base_dir, platform, &args.output) {
        Ok(document) => {
            if !args.quiet {
                let message = format!(
                    "Catalog written to {} in {:.2}s",
                    args.output.display(),
                    start_time.elapsed().as_secs_f64()
                );
                println!("{}", status(&out, Marker::Ok, &message));
                println!("   {} packages", document.packages.len());
                println!("   {} exclude filters", document.exclude_filter.len());
                if let Some(configuration) = &document.module_configuration {
                    println!("   {} module defaults", configuration.defaults.len());
                }
            }
            Ok(())
        }
        Err(e) => {
            if !args.quiet {
                println!("{}", status(&out, Marker::Error, "Generation failed"));
            }
            Err(e.into())
        }
    }
}
