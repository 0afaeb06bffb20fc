//! # Architectures and Artifact Suffixes
//!
//! Artifact names have the form `name-version-release.arch`. The token after
//! the final `.` is the artifact's own architecture, which may differ from the
//! architecture the artifact was observed under (multilib) or be `noarch`.
//!
//! Architectures are open-ended identifiers taken from the input data, so they
//! are kept as strings. [`ArchitectureSet`] is the ordered, de-duplicated
//! universe of architectures for one invocation.

use indexmap::IndexSet;

/// Suffix carried by architecture-independent artifacts.
pub const NOARCH: &str = "noarch";

/// Returns the architecture suffix of an artifact name.
///
/// A name without a `.` separator has an empty suffix.
///
/// ```
/// use catalog_sync::arch::artifact_arch;
///
/// assert_eq!(artifact_arch("bash-5.1-2.el9.x86_64"), "x86_64");
/// assert_eq!(artifact_arch("bash"), "");
/// ```
pub fn artifact_arch(artifact: &str) -> &str {
    artifact
        .rsplit_once('.')
        .map(|(_, suffix)| suffix)
        .unwrap_or("")
}

/// Whether the artifact is architecture independent.
pub fn is_noarch(artifact: &str) -> bool {
    artifact_arch(artifact) == NOARCH
}

/// Strips the `.noarch` suffix, leaving the bare `name-version-release`.
///
/// Names without that suffix are returned unchanged.
pub fn bare_name(artifact: &str) -> &str {
    artifact
        .strip_suffix(NOARCH)
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap_or(artifact)
}

/// Whether an artifact observed under `observed_arch` is evidence of
/// multilib packaging.
///
/// True when the artifact's suffix is non-empty, is not `noarch` and differs
/// from the architecture it was observed under.
pub fn is_multilib(artifact: &str, observed_arch: &str) -> bool {
    let suffix = artifact_arch(artifact);
    !suffix.is_empty() && suffix != NOARCH && suffix != observed_arch
}

/// Ordered, de-duplicated set of architecture identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchitectureSet {
    arches: IndexSet<String>,
}

impl ArchitectureSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an architecture, keeping the position of its first insertion.
    pub fn insert(&mut self, arch: impl Into<String>) -> bool {
        self.arches.insert(arch.into())
    }

    pub fn contains(&self, arch: &str) -> bool {
        self.arches.contains(arch)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.arches.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.arches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arches.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ArchitectureSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for arch in iter {
            set.insert(arch);
        }
        set
    }
}
