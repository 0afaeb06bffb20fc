//! # Catalog Document
//!
//! Value types for the catalog synchronization document consumed by the
//! repository-mirroring service. A [`CatalogDocument`] is built once by the
//! assembler and never mutated afterwards; the `prototxt` module turns it into
//! text.

use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;

/// How a package is sourced and synchronized.
///
/// Only `NormalFork`, `NormalSrc` and `ModuleFork` are produced by the
/// synthesis pipeline. The remaining variants exist in the target schema and
/// are kept so documents using them can be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageType {
    Normal,
    /// A plain package forked from upstream.
    NormalFork,
    /// A package whose sources live in the distribution itself.
    NormalSrc,
    /// A package owned by a module.
    ModuleFork,
    ModuleForkComponent,
    NormalForkModule,
    NormalForkModuleComponent,
    ModuleForkModuleComponent,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "PACKAGE_TYPE_NORMAL",
            Self::NormalFork => "PACKAGE_TYPE_NORMAL_FORK",
            Self::NormalSrc => "PACKAGE_TYPE_NORMAL_SRC",
            Self::ModuleFork => "PACKAGE_TYPE_MODULE_FORK",
            Self::ModuleForkComponent => "PACKAGE_TYPE_MODULE_FORK_COMPONENT",
            Self::NormalForkModule => "PACKAGE_TYPE_NORMAL_FORK_MODULE",
            Self::NormalForkModuleComponent => "PACKAGE_TYPE_NORMAL_FORK_MODULE_COMPONENT",
            Self::ModuleForkModuleComponent => "PACKAGE_TYPE_MODULE_FORK_MODULE_COMPONENT",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A repository-scoped set of per-architecture glob lists.
///
/// Used both for user-supplied include/exclude filters and for the compiled
/// noarch exclusion rules. Configuration files write it as a two element
/// sequence: `["^BaseOS$", {"x86_64": ["foo"]}]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, IndexMap<String, Vec<String>>)")]
pub struct GlobFilter {
    /// Regular expression matched against repository names.
    pub repo_match: String,
    /// Architecture (or `*`) -> glob patterns.
    pub arches: IndexMap<String, Vec<String>>,
}

impl From<(String, IndexMap<String, Vec<String>>)> for GlobFilter {
    fn from((repo_match, arches): (String, IndexMap<String, Vec<String>>)) -> Self {
        Self { repo_match, arches }
    }
}

/// Per-repository synchronization state of one package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryFilter {
    pub name: String,
    pub module_streams: Vec<String>,
    pub include_filter: Vec<String>,
    pub multilib: Vec<String>,
}

/// One `package` entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCatalogEntry {
    pub name: String,
    pub package_type: PackageType,
    pub module_components: Vec<String>,
    pub repositories: Vec<RepositoryFilter>,
}

/// Distribution version the module platform is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformVersion {
    pub major: u32,
    pub minor: u32,
}

/// Default profile names of one stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleProfile {
    pub stream: String,
    pub names: Vec<String>,
}

/// Default stream and profiles of one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDefault {
    pub name: String,
    pub stream: Option<String>,
    pub profiles: Vec<ModuleProfile>,
}

/// Module platform block: platform version plus module defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleConfiguration {
    pub platform: PlatformVersion,
    pub defaults: Vec<ModuleDefault>,
}

/// Root of the catalog document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogDocument {
    pub module_configuration: Option<ModuleConfiguration>,
    pub additional_multilib: Vec<String>,
    pub exclude_multilib_filter: Vec<String>,
    pub exclude_filter: Vec<GlobFilter>,
    pub include_filter: Vec<GlobFilter>,
    pub packages: Vec<PackageCatalogEntry>,
}

impl CatalogDocument {
    pub fn package(&self, name: &str) -> Option<&PackageCatalogEntry> {
        self.packages.iter().find(|p| p.name == name)
    }
}

impl PackageCatalogEntry {
    pub fn repository(&self, name: &str) -> Option<&RepositoryFilter> {
        self.repositories.iter().find(|r| r.name == name)
    }
}
