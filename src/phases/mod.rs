//! Implementation of the catalog synthesis pipeline.
//!
//! ## Overview
//!
//! Synthesis runs five pure phases over fully loaded inputs, followed by a
//! write step:
//! 1. Artifact Index - Per package/repository include filters and multilib arches
//! 2. Noarch Asymmetry - Noarch artifacts missing on some architectures
//! 3. Exclusion Rules - One anchored exclude rule per affected repository
//! 4. Module Membership - Package classification and module streams
//! 5. Assembly - The final `CatalogDocument`
//! 6. Writing to Disk - Render and atomically persist the document
//!
//! Each phase returns a new value derived only from its inputs, so every phase
//! can be exercised on its own. Data flows strictly forward.

use crate::catalog::{GlobFilter, PlatformVersion};
use crate::modules::ModuleDefaults;
use crate::prepopulate::PackageMap;
use crate::variants::Variant;

// Phase modules
pub mod assemble;
pub mod asymmetry;
pub mod exclusion;
pub mod index;
pub mod membership;
pub mod orchestrator;
pub mod write;

pub use assemble as phase5;
pub use asymmetry as phase2;
pub use exclusion as phase3;
pub use index as phase1;
pub use membership as phase4;
pub use write as phase6;

/// Everything synthesis consumes, fully resident in memory.
#[derive(Debug, Clone, Default)]
pub struct CatalogInputs {
    /// Repository -> architecture -> package -> artifacts.
    pub packages: PackageMap,
    pub additional_multilib: Vec<String>,
    pub exclude_multilib_filter: Vec<String>,
    /// User exclude filters, passed through ahead of compiled rules.
    pub exclude_filter: Vec<GlobFilter>,
    /// User include filters, passed through unchanged.
    pub include_filter: Vec<GlobFilter>,
    pub variants: Vec<Variant>,
    pub module_defaults: Vec<ModuleDefaults>,
    /// When set, the module platform block is emitted.
    pub platform: Option<PlatformVersion>,
    /// Package-name prefix marking source forks.
    pub source_prefix: String,
}
