//! Phase 6: Writing to Disk
//!
//! Renders the assembled document and persists it. The text goes to a
//! temporary file next to the destination, which is then renamed over the
//! destination. A failure at any point leaves the previous file untouched and
//! no partial catalog behind.

use std::io::Write;
use std::path::Path;

use crate::catalog::CatalogDocument;
use crate::error::{Error, Result};
use crate::prototxt;

/// Execute Phase 6: render `document` and write it to `output_path`.
pub fn execute(document: &CatalogDocument, output_path: &Path) -> Result<()> {
    let rendered = prototxt::render(document);
    let output_error = |message: String| Error::Output {
        path: output_path.display().to_string(),
        message,
    };

    let parent = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| output_error(e.to_string()))?;
    staged
        .write_all(rendered.as_bytes())
        .map_err(|e| output_error(e.to_string()))?;
    staged
        .persist(output_path)
        .map_err(|e| output_error(e.error.to_string()))?;

    log::info!("Wrote catalog to {}", output_path.display());
    Ok(())
}
