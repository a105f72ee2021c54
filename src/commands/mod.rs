//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `stylestamp` command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `stylestamp` library.

pub mod build;
pub mod compile;
pub mod completions;
pub mod header;
pub mod version;
