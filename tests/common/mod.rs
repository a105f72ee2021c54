//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_project(sources::VALID);
//!     fixture.command().arg("build").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;
use std::process::Command as StdCommand;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::git_available;
    #[allow(unused_imports)]
    pub use super::sources;
    pub use super::TestFixture;
}

/// A complete `package.json` for a userstyle project.
pub const PACKAGE_JSON: &str = r#"{
  "name": "dark-docs",
  "description": "A dark theme for the docs site",
  "author": "Jane Doe",
  "repository": {
    "type": "git",
    "url": "https://github.com/jane/dark-docs"
  },
  "homepage": "https://github.com/jane/dark-docs#readme",
  "license": "MIT",
  "userStyle": {
    "version": "20240101.10.00",
    "namespace": "github.com/jane"
  },
  "scripts": {
    "build": "stylestamp build"
  }
}
"#;

/// Stylesheet sources for testing.
#[allow(dead_code)]
pub mod sources {
    /// Valid SCSS using nesting, a variable and a property that gets prefixed.
    pub const VALID: &str = r#"$bg: #111;

body {
  background: $bg;
  .toolbar { user-select: none; }
}
"#;

    /// SCSS with an unclosed block.
    pub const SYNTAX_ERROR: &str = "body {\n  color: red;\n";

    /// SCSS importing a partial that does not exist.
    pub const MISSING_IMPORT: &str = "@import 'nowhere';\n";
}

/// Returns true when a usable `git` binary is on the PATH.
#[allow(dead_code)]
pub fn git_available() -> bool {
    StdCommand::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A temporary userstyle project.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add `package.json` and `src/main.scss` with the given source.
    pub fn with_project(self, source: &str) -> Self {
        self.with_file("package.json", PACKAGE_JSON)
            .with_file("src/main.scss", source)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Turn the project into a git repository with everything committed.
    ///
    /// `dist/` is ignored, as build output usually is.
    pub fn with_git_repo(self) -> Self {
        let fixture = self.with_file(".gitignore", "dist/\n");
        fixture.git(&["init", "--quiet"]);
        fixture.git(&["config", "user.name", "Test User"]);
        fixture.git(&["config", "user.email", "test@example.com"]);
        fixture.git(&["config", "commit.gpgsign", "false"]);
        fixture.git(&["add", "."]);
        fixture.git(&["commit", "--quiet", "-m", "initial"]);
        fixture
    }

    /// Run git in the fixture and return its trimmed stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let output = StdCommand::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Read a file from the fixture.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read file")
    }

    /// The `userStyle.version` currently in `package.json`.
    pub fn style_version(&self) -> String {
        let json: serde_json::Value =
            serde_json::from_str(&self.read("package.json")).expect("Invalid package.json");
        json["userStyle"]["version"]
            .as_str()
            .expect("No userStyle.version")
            .to_string()
    }

    /// A `stylestamp` command running in the fixture with a neutral
    /// environment: no CI, no skip signal, no hooks, no colors.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stylestamp");
        cmd.current_dir(self.path())
            .env_remove("CI")
            .env_remove("SKIP_GIT_COMMIT")
            .env_remove("RUN_GIT_HOOKS")
            .env_remove("RUST_LOG")
            .env_remove("STYLESTAMP_ROOT")
            .env_remove("STYLESTAMP_INPUT")
            .env_remove("STYLESTAMP_OUTPUT")
            .env_remove("STYLESTAMP_METADATA")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
