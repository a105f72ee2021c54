//! # Auto-Commit
//!
//! After a successful build the version bump and the rebuilt stylesheet can be
//! committed automatically. The commit is a convenience, strictly subordinate
//! to the build: the controller is a chain of conservative guards, and every
//! guard that trips ends the attempt with a logged [`SkipReason`] instead of
//! an error. Nothing in this module can fail the build.
//!
//! ## Guard Chain
//!
//! 1.  Disabled by `SKIP_GIT_COMMIT`, or running under CI.
//! 2.  Not inside a git work tree.
//! 3.  Something is already staged: never mix with a human's pending commit.
//! 4.  The working tree is clean.
//! 5.  A changed path other than the metadata file or the output file exists:
//!     never absorb unrelated edits.
//! 6.  Stage the metadata file, then the output file (forcing past ignore
//!     rules, since build artifacts are usually ignored). Each file that
//!     cannot be staged is logged and skipped on its own.
//! 7.  Nothing ended up staged.
//! 8.  Commit `chore: verbump <version>`, bypassing hooks unless
//!     `RUN_GIT_HOOKS` opts in. A failed commit is logged and swallowed.

use crate::git::VersionControl;
use std::fmt;
use std::path::PathBuf;

/// Environment variable that disables auto-commit.
pub const SKIP_COMMIT_VAR: &str = "SKIP_GIT_COMMIT";
/// Environment variable set by CI providers.
pub const CI_VAR: &str = "CI";
/// Environment variable that opts into running commit hooks.
pub const RUN_HOOKS_VAR: &str = "RUN_GIT_HOOKS";

/// Case-insensitive membership in `{"1", "true", "yes"}`.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Auto-commit options, resolved once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoCommitSettings {
    pub skip_commit: bool,
    pub ci_detected: bool,
    pub run_hooks: bool,
}

impl AutoCommitSettings {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |name: &str| lookup(name).is_some_and(|value| is_truthy(&value));
        Self {
            skip_commit: flag(SKIP_COMMIT_VAR),
            ci_detected: flag(CI_VAR),
            run_hooks: flag(RUN_HOOKS_VAR),
        }
    }

    pub fn enabled(&self) -> bool {
        !self.skip_commit && !self.ci_detected
    }
}

/// Why an auto-commit attempt stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    Ci,
    NotARepository,
    StagedChangesPresent,
    WorkingTreeClean,
    OtherChanges(Vec<String>),
    NothingStaged,
    GitFailed(String),
    CommitFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Disabled => write!(f, "disabled by {}", SKIP_COMMIT_VAR),
            SkipReason::Ci => write!(f, "running in CI"),
            SkipReason::NotARepository => write!(f, "not a git repo"),
            SkipReason::StagedChangesPresent => write!(f, "staged changes present"),
            SkipReason::WorkingTreeClean => write!(f, "working tree clean"),
            SkipReason::OtherChanges(paths) => write!(
                f,
                "other working tree changes present ({})",
                paths.join(", ")
            ),
            SkipReason::NothingStaged => write!(f, "nothing staged after add"),
            SkipReason::GitFailed(message) => write!(f, "git command failed ({})", message),
            SkipReason::CommitFailed(message) => write!(f, "git commit failed ({})", message),
        }
    }
}

/// Result of an auto-commit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoCommitOutcome {
    Committed { message: String },
    Skipped(SkipReason),
}

/// The commit message for a version bump.
pub fn commit_message(version: &str) -> String {
    format!("chore: verbump {}", version)
}

/// Runs the guard chain against a [`VersionControl`] implementation.
pub struct AutoCommitController<'a> {
    vcs: &'a dyn VersionControl,
    settings: AutoCommitSettings,
    root: PathBuf,
    metadata_path: String,
    output_path: String,
}

impl<'a> AutoCommitController<'a> {
    /// `metadata_path` and `output_path` are relative to `root` with `/`
    /// separators; `root` may sit anywhere inside the repository.
    pub fn new(
        vcs: &'a dyn VersionControl,
        settings: AutoCommitSettings,
        root: impl Into<PathBuf>,
        metadata_path: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Self {
        Self {
            vcs,
            settings,
            root: root.into(),
            metadata_path: metadata_path.into(),
            output_path: output_path.into(),
        }
    }

    fn skip(&self, reason: SkipReason) -> AutoCommitOutcome {
        log::info!("Skipping auto-commit: {}", reason);
        AutoCommitOutcome::Skipped(reason)
    }

    /// Status paths are relative to the repository top level, the tracked
    /// files to the root; `prefix` is the root's place in the repository.
    fn is_allowed(&self, prefix: &str, path: &str) -> bool {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest == self.metadata_path || rest == self.output_path)
    }

    /// Attempts to commit the bump to `version`.
    pub fn run(&self, version: &str) -> AutoCommitOutcome {
        if self.settings.skip_commit {
            return self.skip(SkipReason::Disabled);
        }
        if self.settings.ci_detected {
            return self.skip(SkipReason::Ci);
        }

        if !self.vcs.probe_repository() {
            return self.skip(SkipReason::NotARepository);
        }

        match self.vcs.list_staged() {
            Ok(staged) if !staged.is_empty() => {
                return self.skip(SkipReason::StagedChangesPresent)
            }
            Ok(_) => {}
            Err(e) => return self.skip(SkipReason::GitFailed(e.to_string())),
        }

        let prefix = match self.vcs.repository_prefix() {
            Ok(prefix) => prefix,
            Err(e) => return self.skip(SkipReason::GitFailed(e.to_string())),
        };

        let status = match self.vcs.list_status() {
            Ok(status) => status,
            Err(e) => return self.skip(SkipReason::GitFailed(e.to_string())),
        };
        if status.is_empty() {
            return self.skip(SkipReason::WorkingTreeClean);
        }

        let others: Vec<String> = status
            .into_iter()
            .filter(|path| !self.is_allowed(&prefix, path))
            .collect();
        if !others.is_empty() {
            return self.skip(SkipReason::OtherChanges(others));
        }

        self.try_stage(&self.metadata_path, false);
        self.try_stage(&self.output_path, true);

        match self.vcs.list_staged() {
            Ok(staged) if staged.is_empty() => return self.skip(SkipReason::NothingStaged),
            Ok(_) => {}
            Err(e) => return self.skip(SkipReason::GitFailed(e.to_string())),
        }

        let message = commit_message(version);
        if let Err(e) = self.vcs.commit(&message, self.settings.run_hooks) {
            return self.skip(SkipReason::CommitFailed(e.to_string()));
        }

        log::info!("Committed: {}", message);
        AutoCommitOutcome::Committed { message }
    }

    /// Stages one file, logging instead of failing. With `force_if_ignored`,
    /// a rejected plain add is retried with `git add -f`.
    fn try_stage(&self, path: &str, force_if_ignored: bool) -> bool {
        if !self.root.join(path).exists() {
            log::warn!("Not staging {}: file is missing", path);
            return false;
        }

        let error = match self.vcs.stage_path(path) {
            Ok(()) => return true,
            Err(e) => e,
        };
        if !force_if_ignored {
            log::warn!("Not staging {}: unable to add ({})", path, error);
            return false;
        }

        match self.vcs.stage_path_forced(path) {
            Ok(()) => {
                log::info!("Added ignored file: {}", path);
                true
            }
            Err(e) => {
                log::warn!("Not staging {}: unable to add ({})", path, e);
                false
            }
        }
    }
}
