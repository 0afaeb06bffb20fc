//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_compose_tree();
//!     fixture.command().args(["generate", "-c", "build.yaml"]).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
#[allow(unused_imports)]
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::inputs;
    pub use super::TestFixture;
}

/// Input file contents describing a small compose.
#[allow(dead_code)]
pub mod inputs {
    /// Build configuration referencing every optional input.
    pub const CONFIG: &str = r#"
release_name: Rocky Linux
gather_prepopulate:
  scm: file
  file: prepopulate.json
multilib_whitelist:
  "*": [glibc]
multilib_blacklist:
  "*": [kernel]
filter_packages:
  - ["^.*$", {"*": ["foo-debuginfo"]}]
additional_packages:
  - ["^AppStream$", {"x86_64": ["extra-tools"]}]
variants_file:
  scm: file
  file: variants.xml
module_defaults_dir:
  scm: file
  dir: module_defaults
"#;

    /// Build configuration with only the required keys.
    pub const MINIMAL_CONFIG: &str = r#"
gather_prepopulate: {scm: file, file: prepopulate.json}
multilib_whitelist: {"*": []}
multilib_blacklist: {"*": []}
filter_packages: []
additional_packages: []
"#;

    /// Package map: `foo` noarch only on x86_64, `bar` with an x86_64
    /// artifact on aarch64, `httpd` module-owned, `rocky-release` a source
    /// fork and `common` noarch on both arches.
    pub const PREPOPULATE: &str = r#"{
  "BaseOS": {
    "x86_64": {
      "foo": ["foo-1-1.noarch"],
      "rocky-release": ["rocky-release-9.4-1.noarch"],
      "common": ["common-1-1.noarch"]
    },
    "aarch64": {
      "bar": ["bar-2-1.x86_64", "bar-2-1.aarch64"],
      "rocky-release": ["rocky-release-9.4-1.noarch"],
      "common": ["common-1-1.noarch"]
    }
  },
  "AppStream": {
    "x86_64": {
      "httpd": ["httpd-2.4.57-5.x86_64"]
    },
    "aarch64": {
      "httpd": ["httpd-2.4.57-5.aarch64"]
    }
  }
}"#;

    pub const VARIANTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<variants>
  <variant id="BaseOS" name="BaseOS" type="variant">
    <arches><arch>x86_64</arch><arch>aarch64</arch></arches>
    <groups><group default="true">core</group></groups>
  </variant>
  <variant id="AppStream" name="AppStream" type="variant">
    <arches><arch>x86_64</arch><arch>aarch64</arch></arches>
    <modules><module>httpd:2.4</module><module>nodejs:18</module></modules>
  </variant>
</variants>
"#;

    pub const HTTPD_DEFAULTS: &str = r#"---
document: modulemd-defaults
version: 1
data:
  module: httpd
  stream: "2.4"
  profiles:
    "2.4": [common]
...
"#;

    /// Defaults for a module no variant declares.
    pub const PHP_DEFAULTS: &str = r#"---
document: modulemd-defaults
version: 1
data:
  module: php
  stream: "8.1"
...
"#;
}

/// A temporary directory holding a build configuration and its inputs.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_config(inputs::MINIMAL_CONFIG)
///     .with_file("prepopulate.json", "{}");
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `build.yaml` with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file("build.yaml", content)
    }

    /// Write the full compose: configuration, package map, variants and
    /// module defaults.
    #[allow(dead_code)]
    pub fn with_compose_tree(self) -> Self {
        self.with_config(inputs::CONFIG)
            .with_file("prepopulate.json", inputs::PREPOPULATE)
            .with_file("variants.xml", inputs::VARIANTS)
            .with_file("module_defaults/httpd.yaml", inputs::HTTPD_DEFAULTS)
            .with_file("module_defaults/php.yaml", inputs::PHP_DEFAULTS)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("build.yaml")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Read a file from the fixture directory.
    #[allow(dead_code)]
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read file")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a command configured to run in this fixture's directory.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catalog-sync");
        cmd.current_dir(self.path());
        cmd.env_remove("CATALOG_SYNC_CONFIG").env_remove("RUST_LOG");
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_writes_compose_tree() {
        let fixture = TestFixture::new().with_compose_tree();
        assert!(fixture.config_path().exists());
        assert!(fixture.path().join("module_defaults/httpd.yaml").exists());
    }

    #[test]
    fn test_inputs_are_well_formed() {
        for config in [inputs::CONFIG, inputs::MINIMAL_CONFIG] {
            serde_yaml::from_str::<serde_yaml::Value>(config).expect("Config should be valid YAML");
        }
        serde_json::from_str::<serde_json::Value>(inputs::PREPOPULATE)
            .expect("Package map should be valid JSON");
    }
}
