//! # stylestamp
//!
//! This library compiles a userstyle stylesheet and prepares it for
//! distribution. It is designed to be used by the `stylestamp` command-line
//! tool, but every step is exposed so a build script can drive it directly.
//!
//! ## Quick Example
//!
//! ```
//! use stylestamp::compiler::{CompileRequest, Compiler, GrassCompiler};
//!
//! let request = CompileRequest::new("a { b { color: red; } }", "main.scss");
//! let css = GrassCompiler::new().compile(&request).unwrap();
//! assert!(css.contains("a b{color:red}"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Versions (`version`)**: versions are timestamps, `YYYYMMDD.HH.MM`.
//! - **Metadata (`metadata`, `header`)**: `package.json` holds the style's
//!   identity; it is rendered into a `==UserStyle==` header block.
//! - **Compilation (`compiler`)**: SCSS/Sass through `grass`, then vendor
//!   prefixing through `lightningcss`.
//! - **Output (`writer`)**: header and CSS written to a single file.
//! - **Auto-commit (`git`, `autocommit`)**: the version bump and the rebuilt
//!   stylesheet are committed when, and only when, nothing else is pending.
//!
//! ## Execution Flow
//!
//! [`pipeline::run_build`] runs the release build:
//!
//! 1.  **Stamp**: load the metadata and set the new version.
//! 2.  **Compile**: preprocess and post-process the stylesheet.
//! 3.  **Persist**: rewrite the metadata file.
//! 4.  **Write**: header + CSS to the output path.
//! 5.  **Commit**: attempt the guarded auto-commit.

pub mod autocommit;
pub mod compiler;
pub mod defaults;
pub mod error;
pub mod git;
pub mod header;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod version;
pub mod writer;
