//! # Catalog Sync Library
//!
//! Converts the package map produced by a distribution compose tool into a
//! catalog-sync document: the declarative description, consumed by a package
//! build service, of which source packages exist, which binary artifacts each
//! repository should carry, and on which architectures.
//!
//! ## Quick Example
//!
//! ```
//! use catalog_sync::phases::{orchestrator, CatalogInputs};
//! use catalog_sync::prepopulate::PackageMap;
//! use catalog_sync::prototxt;
//!
//! let inputs = CatalogInputs {
//!     packages: PackageMap::new()
//!         .with("BaseOS", "x86_64", "foo", "foo-1-1.noarch")
//!         .with("BaseOS", "aarch64", "bar", "bar-2-1.aarch64"),
//!     ..Default::default()
//! };
//!
//! let document = orchestrator::synthesize(&inputs).unwrap();
//! assert_eq!(document.exclude_filter[0].repo_match, "^BaseOS$");
//!
//! let text = prototxt::render(&document);
//! assert!(text.starts_with("# kind: resf.peridot.v1.CatalogSync"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Inputs (`config`, `source`, `prepopulate`, `variants`, `modules`)**:
//!   the build configuration and the files it points at, parsed into typed
//!   values before any synthesis starts.
//! - **Catalog model (`catalog`)**: the document being produced.
//! - **Phases (`phases`)**: the synthesis pipeline, from artifact indexing to
//!   the final write.
//! - **Rendering (`prototxt`)**: the protobuf text form of a document.
//!
//! ## Execution Flow
//!
//! `phases::orchestrator` loads every input, then runs:
//!
//! 1.  **Index**: per package and repository, the artifacts to include and the
//!     architectures that contribute multilib artifacts.
//! 2.  **Asymmetry**: noarch artifacts absent from some architecture.
//! 3.  **Exclusion**: one anchored exclude rule per affected repository.
//! 4.  **Membership**: package classification and module streams.
//! 5.  **Assembly**: the complete `CatalogDocument`.
//! 6.  **Write**: render and atomically replace the output file.

pub mod arch;
pub mod catalog;
pub mod config;
pub mod error;
pub mod modules;
pub mod output;
pub mod phases;
pub mod prepopulate;
pub mod prototxt;
pub mod source;
pub mod suggestions;
pub mod variants;

#[cfg(test)]
mod phases_proptest;
