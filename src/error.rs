//! # Error Handling
//!
//! This module defines the centralized error type for the `stylestamp`
//! library. It uses the `thiserror` library to create an `Error` enum that
//! covers every fatal failure the build pipeline can hit.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the library. Each variant carries enough context (the file,
//!   the transform, the git command) to produce a useful diagnostic.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Only fatal conditions are modelled here. Auto-commit guard conditions are
//! soft by nature: the controller logs them and reports an outcome instead of
//! returning an error, so a `GitCommand` error never escapes the build.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for stylestamp operations
#[derive(Error, Debug)]
pub enum Error {
    /// The package metadata file could not be parsed, or a field required by
    /// the userstyle header is missing.
    #[error("Metadata error in {}: {message}", path.display())]
    Metadata { path: PathBuf, message: String },

    /// The preprocessor rejected the stylesheet (syntax error, unresolved
    /// import, undefined variable...).
    #[error("Compilation error in {file}: {message}")]
    Compile { file: String, message: String },

    /// A post-processing transform failed on the compiled CSS.
    #[error("Post-processing error ({transform}): {message}")]
    PostProcess { transform: String, message: String },

    /// A git command could not be spawned or exited unsuccessfully.
    #[error("Git command failed: git {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON (de)serialization error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
