//! Default values for stylestamp paths.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication. Every default can be
//! overridden by a CLI flag or its `STYLESTAMP_*` environment variable.

use std::path::PathBuf;

/// Stylesheet source, relative to the project root.
pub const INPUT: &str = "src/main.scss";

/// Compiled stylesheet, relative to the project root.
pub const OUTPUT: &str = "dist/main.css";

/// Package metadata file, relative to the project root.
pub const METADATA: &str = "package.json";

/// Returns the default project root: the current directory, or `.` when it
/// cannot be determined.
pub fn default_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
