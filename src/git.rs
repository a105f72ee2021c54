//! # Version Control
//!
//! The auto-commit step needs a narrow slice of git: detect a work tree, list
//! staged and changed files, stage a path, commit. This module puts that slice
//! behind the [`VersionControl`] trait so the controller can be driven by a
//! fake in tests, and provides [`SystemGit`], which runs the system `git`
//! binary and therefore honours the user's own git configuration.

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::Command;

/// Trait for git operations - allows mocking in tests
pub trait VersionControl {
    /// Returns true when the working directory is inside a git work tree.
    ///
    /// A probe that cannot run at all counts as "not a repository".
    fn probe_repository(&self) -> bool;

    /// Lists paths with staged (index) changes.
    fn list_staged(&self) -> Result<Vec<String>>;

    /// Path of the working directory relative to the repository top level,
    /// with a trailing `/`, or empty at the top level.
    fn repository_prefix(&self) -> Result<String>;

    /// Lists every changed path in the working tree, relative to the
    /// repository top level. Renames report the new path.
    fn list_status(&self) -> Result<Vec<String>>;

    /// Stages a path with a plain `git add`.
    fn stage_path(&self, path: &str) -> Result<()>;

    /// Stages a path even if it is ignored.
    fn stage_path_forced(&self, path: &str) -> Result<()>;

    /// Commits the index. Hooks are bypassed unless `run_hooks` is set.
    fn commit(&self, message: &str, run_hooks: bool) -> Result<()>;
}

/// The default implementation of `VersionControl`, which uses the system's
/// `git` command.
#[derive(Debug, Clone)]
pub struct SystemGit {
    workdir: PathBuf,
}

impl SystemGit {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Runs `git <args>` in the work directory and returns its stdout.
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        log::debug!("Running git {}", command);

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| Error::GitCommand {
                command: command.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::GitCommand {
                command,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn split_nul(output: &str) -> impl Iterator<Item = &str> {
    output.split('\0').filter(|record| !record.is_empty())
}

impl VersionControl for SystemGit {
    fn probe_repository(&self) -> bool {
        match self.run(&["rev-parse", "--is-inside-work-tree"]) {
            Ok(stdout) => stdout.trim() == "true",
            Err(e) => {
                log::debug!("Repository probe failed: {}", e);
                false
            }
        }
    }

    fn list_staged(&self) -> Result<Vec<String>> {
        self.run(&["diff", "--cached", "--name-only", "-z"])
            .map(|stdout| split_nul(&stdout).map(str::to_string).collect())
    }

    fn repository_prefix(&self) -> Result<String> {
        self.run(&["rev-parse", "--show-prefix"])
            .map(|stdout| stdout.trim_end_matches(['\n', '\r']).to_string())
    }

    fn list_status(&self) -> Result<Vec<String>> {
        // Untracked directories are expanded so each new file is judged on its own
        self.run(&["status", "--porcelain", "-z", "--untracked-files=all"])
            .map(|stdout| parse_status(&stdout))
    }

    fn stage_path(&self, path: &str) -> Result<()> {
        self.run(&["add", "--", path]).map(|_| ())
    }

    fn stage_path_forced(&self, path: &str) -> Result<()> {
        self.run(&["add", "-f", "--", path]).map(|_| ())
    }

    fn commit(&self, message: &str, run_hooks: bool) -> Result<()> {
        let mut args = vec!["commit", "-m", message];
        if !run_hooks {
            args.push("--no-verify");
        }
        self.run(&args).map(|_| ())
    }
}

/// Extracts the changed paths from `git status --porcelain -z` output.
///
/// With `-z` paths are NUL-terminated and never quoted or escaped. A rename
/// or copy record (`R  new`) is followed by a record holding the source path,
/// which is consumed and dropped. Records too short to carry a path are kept
/// verbatim so callers treat them as unknown changes.
pub fn parse_status(output: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut records = split_nul(output);
    while let Some(record) = records.next() {
        // Two status columns, a space, then the path
        let Some(path) = record.get(3..).filter(|path| !path.is_empty()) else {
            paths.push(record.to_string());
            continue;
        };
        if record.get(..2).is_some_and(|code| code.contains(['R', 'C'])) {
            records.next();
        }
        paths.push(path.to_string());
    }
    paths
}
