//! # Error Suggestions
//!
//! Helper functions for building error messages with hints. Errors should tell
//! users what went wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_sync::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Configuration file not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::config_not_found(path));
//! ```

use std::path::Path;

/// Generate an error for when the build configuration file is not found.
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Use -c/--config to point at the build configuration (YAML)\n\
         hint: Set the CATALOG_SYNC_CONFIG environment variable",
        path = path.display()
    )
}

/// Generate an error for an incomplete `--major`/`--minor` pair.
pub fn platform_version_incomplete() -> anyhow::Error {
    anyhow::anyhow!(
        "Both --major and --minor are required to emit the module platform block\n\n\
         hint: Pass the distribution version, e.g. --major 9 --minor 4"
    )
}

/// Hint for a missing configuration key, pointing at a present key that looks
/// like a misspelling of it.
pub fn missing_key_hint<'a>(
    key: &str,
    present: impl IntoIterator<Item = &'a str>,
) -> Option<String> {
    let present: Vec<&str> = present.into_iter().collect();
    find_similar(key, &present).map(|found| format!("found '{found}', did you mean '{key}'?"))
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance, two-row form.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, a_char) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != *b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
