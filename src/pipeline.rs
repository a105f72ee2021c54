//! # Build Pipeline
//!
//! This module sequences the build. Two entry points cover the build
//! variants:
//!
//! - [`run_build`]: the userstyle release build. Stamps a new version into the
//!   metadata file, prepends the userstyle header, writes the output and then
//!   attempts an auto-commit.
//! - [`run_compile`]: a plain compile. Source in, CSS out, no metadata, no
//!   header, no git.
//!
//! ## Release Build Order
//!
//! 1.  Load the metadata file and stamp the new version in memory.
//! 2.  Render the header.
//! 3.  Compile the stylesheet.
//! 4.  Persist the metadata file.
//! 5.  Write header + CSS to the output path.
//! 6.  Attempt the auto-commit.
//!
//! The metadata file is only rewritten once compilation has succeeded, so a
//! stylesheet error leaves the working tree exactly as it was. Auto-commit
//! runs last and reports an outcome rather than an error: once the stylesheet
//! is on disk the build has succeeded.

use crate::autocommit::{AutoCommitController, AutoCommitOutcome, AutoCommitSettings};
use crate::compiler::{CompileRequest, Compiler};
use crate::defaults;
use crate::error::{Error, Result};
use crate::git::VersionControl;
use crate::header::render_header;
use crate::metadata::MetadataFile;
use crate::version::is_collision;
use crate::writer::{assemble, write_output};
use std::fs;
use std::path::{Path, PathBuf};

/// File locations for a build. Relative paths resolve against `root`.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    pub root: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub metadata: PathBuf,
}

impl BuildPaths {
    /// Default locations under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            input: PathBuf::from(defaults::INPUT),
            output: PathBuf::from(defaults::OUTPUT),
            metadata: PathBuf::from(defaults::METADATA),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn input_path(&self) -> PathBuf {
        self.resolve(&self.input)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.resolve(&self.metadata)
    }

    /// `path` relative to the root with `/` separators.
    pub fn root_relative(&self, path: &Path) -> String {
        let resolved = self.resolve(path);
        let relative = resolved.strip_prefix(&self.root).unwrap_or(&resolved);
        relative.to_string_lossy().replace('\\', "/")
    }
}

/// Compiler settings shared by both build variants.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub compress: bool,
    pub load_paths: Vec<PathBuf>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            compress: true,
            load_paths: Vec::new(),
        }
    }
}

/// What a release build did.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub version: String,
    pub previous_version: Option<String>,
    pub output_path: PathBuf,
    pub bytes_written: usize,
    pub commit: AutoCommitOutcome,
}

/// What a plain compile did.
#[derive(Debug, Clone)]
pub struct CompileReport {
    pub output_path: PathBuf,
    pub bytes_written: usize,
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read {}: {}", path.display(), e),
        ))
    })
}

fn compile_source(
    paths: &BuildPaths,
    options: &BuildOptions,
    compiler: &dyn Compiler,
) -> Result<String> {
    let input = paths.input_path();
    let source = read_source(&input)?;
    let request = CompileRequest::new(source, input)
        .compress(options.compress)
        .load_paths(
            options
                .load_paths
                .iter()
                .map(|p| paths.resolve(p))
                .collect(),
        );

    log::info!("Building CSS...");
    compiler.compile(&request)
}

/// Runs the userstyle release build, stamping `version`.
pub fn run_build(
    paths: &BuildPaths,
    options: &BuildOptions,
    compiler: &dyn Compiler,
    vcs: &dyn VersionControl,
    settings: AutoCommitSettings,
    version: &str,
) -> Result<BuildReport> {
    let mut metadata = MetadataFile::load(&paths.metadata_path())?;
    let previous_version = metadata.set_style_version(version);
    if is_collision(previous_version.as_deref(), version) {
        log::warn!(
            "Version {} is unchanged: a build already ran within this minute",
            version
        );
    }

    let header = render_header(metadata.metadata(), version);
    let css = compile_source(paths, options, compiler)?;

    metadata.save()?;
    log::info!(
        "Bumped version to {} in {}",
        version,
        metadata.path().display()
    );

    let output_path = paths.output_path();
    let content = assemble(Some(&header), &css);
    write_output(&output_path, &content)?;
    log::info!("Build complete: {}", output_path.display());

    let commit = AutoCommitController::new(
        vcs,
        settings,
        paths.root.clone(),
        paths.root_relative(&paths.metadata),
        paths.root_relative(&paths.output),
    )
    .run(version);

    Ok(BuildReport {
        version: version.to_string(),
        previous_version,
        output_path,
        bytes_written: content.len(),
        commit,
    })
}

/// Compiles the stylesheet to the output path without header or version bump.
pub fn run_compile(
    paths: &BuildPaths,
    options: &BuildOptions,
    compiler: &dyn Compiler,
) -> Result<CompileReport> {
    let css = compile_source(paths, options, compiler)?;

    let output_path = paths.output_path();
    let content = assemble(None, &css);
    write_output(&output_path, &content)?;
    log::info!("Build complete: {}", output_path.display());

    Ok(CompileReport {
        output_path,
        bytes_written: content.len(),
    })
}
