//! # Terminal Output
//!
//! Status markers for the human-readable lines printed by `generate` and
//! `validate`. Markers are emoji on color-capable terminals and bracketed
//! words elsewhere, so logs captured from CI stay greppable.
//!
//! Color is decided by the global `--color` flag; in `auto` mode the
//! `NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE` and `TERM=dumb` conventions are
//! honored before falling back to TTY detection.

use console::style;
use std::env;

/// Whether styled output is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the `--color` flag value (`always`, `never` or `auto`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_ascii_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => detect_color_support(),
        };
        Self { use_color }
    }

    pub fn plain() -> Self {
        Self { use_color: false }
    }
}

fn detect_color_support() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }
    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }
    console::Term::stdout().features().colors_supported()
}

/// Kinds of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Scan,
    Ok,
    Info,
    Error,
}

impl Marker {
    fn emoji(self) -> &'static str {
        match self {
            Marker::Scan => "🔍",
            Marker::Ok => "✅",
            Marker::Info => "📊",
            Marker::Error => "❌",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Marker::Scan => "[SCAN]",
            Marker::Ok => "[OK]",
            Marker::Info => "[INFO]",
            Marker::Error => "[ERR]",
        }
    }
}

/// The marker text for `config`.
pub fn emoji(config: &OutputConfig, marker: Marker) -> &'static str {
    if config.use_color {
        marker.emoji()
    } else {
        marker.plain()
    }
}

/// A full status line: marker followed by `message`, bolded when colored.
pub fn status(config: &OutputConfig, marker: Marker, message: &str) -> String {
    if config.use_color {
        format!("{} {}", marker.emoji(), style(message).bold())
    } else {
        format!("{} {}", marker.plain(), message)
    }
}
