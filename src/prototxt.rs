//! # Catalog Text Rendering
//!
//! Renders a [`CatalogDocument`] in protobuf text format. Rendering is pure
//! and order preserving: every list is written in the order the document holds
//! it, so identical documents always render to identical bytes.
//!
//! Layout, in order: the kind header, the optional `module_configuration`
//! block, `additional_multilib`, `exclude_multilib_filter`, `exclude_filter`
//! blocks, `include_filter` blocks, then one `package` block per package.

use crate::catalog::{CatalogDocument, GlobFilter, ModuleConfiguration, PackageCatalogEntry};

/// First line of every rendered catalog.
pub const KIND_HEADER: &str = "# kind: resf.peridot.v1.CatalogSync";

const INDENT: &str = "  ";

/// Indentation-aware line writer.
struct Writer {
    out: String,
    depth: usize,
}

impl Writer {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn field(&mut self, key: &str, value: &str) {
        self.line(&format!("{}: {}", key, quote(value)));
    }

    fn fields<'a>(&mut self, key: &str, values: impl IntoIterator<Item = &'a String>) {
        for value in values {
            self.field(key, value);
        }
    }

    fn open(&mut self, name: &str) {
        self.line(&format!("{} {{", name));
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth -= 1;
        self.line("}");
    }
}

/// Quote a string value, escaping backslashes and double quotes.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Render the whole document.
pub fn render(document: &CatalogDocument) -> String {
    let mut w = Writer {
        out: String::new(),
        depth: 0,
    };
    w.line(KIND_HEADER);

    if let Some(configuration) = &document.module_configuration {
        render_module_configuration(&mut w, configuration);
    }
    w.fields("additional_multilib", &document.additional_multilib);
    w.fields("exclude_multilib_filter", &document.exclude_multilib_filter);
    for filter in &document.exclude_filter {
        render_filter(&mut w, "exclude_filter", filter);
    }
    for filter in &document.include_filter {
        render_filter(&mut w, "include_filter", filter);
    }
    for package in &document.packages {
        render_package(&mut w, package);
    }

    w.out
}

fn render_module_configuration(w: &mut Writer, configuration: &ModuleConfiguration) {
    w.open("module_configuration");
    w.open("platform");
    let platform = configuration.platform;
    w.line(&format!("major: {}", platform.major));
    w.line(&format!("minor: {}", platform.minor));
    w.line("patch: 0");
    w.close();

    for default in &configuration.defaults {
        w.open("default");
        w.field("name", &default.name);
        if let Some(stream) = &default.stream {
            w.field("stream", stream);
        }
        for profile in &default.profiles {
            w.open("profile");
            w.field("stream", &profile.stream);
            w.fields("name", &profile.names);
            w.close();
        }
        w.close();
    }
    w.close();
}

fn render_filter(w: &mut Writer, kind: &str, filter: &GlobFilter) {
    w.open(kind);
    w.field("repo_match", &filter.repo_match);
    for (arch, globs) in &filter.arches {
        w.open("arch");
        w.field("key", arch);
        w.fields("glob_match", globs);
        w.close();
    }
    w.close();
}

fn render_package(w: &mut Writer, package: &PackageCatalogEntry) {
    w.open("package");
    w.field("name", &package.name);
    w.line(&format!("type: {}", package.package_type));
    w.fields("module_component", &package.module_components);
    for repository in &package.repositories {
        w.open("repository");
        w.field("name", &repository.name);
        w.fields("module_stream", &repository.module_streams);
        w.fields("include_filter", &repository.include_filter);
        w.fields("multilib", &repository.multilib);
        w.close();
    }
    w.close();
}
