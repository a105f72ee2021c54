//! # Stylesheet Compilation
//!
//! This module adapts the preprocessor and the post-processing transforms to
//! the build pipeline. The pipeline only ever talks to the [`Compiler`] trait,
//! so tests can substitute a fake and the production implementation stays a
//! thin configuration layer.
//!
//! ## Components
//!
//! - **`CompileRequest`**: the source text plus everything needed to compile
//!   it (file name, compression flag, extra load paths).
//! - **`Compiler`**: trait with a single `compile` method.
//! - **`GrassCompiler`**: compiles SCSS/Sass with `grass`, then runs an
//!   ordered list of post-processors over the result.
//! - **`PostProcessor`**: trait for CSS-to-CSS transforms.
//! - **`Autoprefixer`**: adds vendor prefixes with `lightningcss` for a fixed
//!   set of browser targets.

use crate::error::{Error, Result};
use grass::{InputSyntax, OutputStyle};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use std::path::{Path, PathBuf};

/// Everything the preprocessor needs to compile one stylesheet.
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// Stylesheet source text.
    pub source: String,
    /// Source file name, used in diagnostics and to resolve relative imports.
    pub filename: PathBuf,
    /// Emit compressed output instead of expanded.
    pub compress: bool,
    /// Additional directories searched for imported partials.
    pub load_paths: Vec<PathBuf>,
}

impl CompileRequest {
    pub fn new(source: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            filename: filename.into(),
            compress: true,
            load_paths: Vec::new(),
        }
    }

    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn load_paths(mut self, load_paths: Vec<PathBuf>) -> Self {
        self.load_paths = load_paths;
        self
    }
}

/// Trait for stylesheet compilation - allows substituting a fake in tests
pub trait Compiler {
    /// Compiles the request into CSS text.
    fn compile(&self, request: &CompileRequest) -> Result<String>;
}

/// A CSS-to-CSS transform applied after preprocessing.
pub trait PostProcessor {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// Transforms compiled CSS. `compress` mirrors the request's flag so the
    /// transform does not undo the preprocessor's output style.
    fn process(&self, css: &str, compress: bool) -> Result<String>;
}

/// Production compiler backed by `grass`.
#[derive(Default)]
pub struct GrassCompiler {
    post_processors: Vec<Box<dyn PostProcessor>>,
}

impl GrassCompiler {
    /// A compiler with no post-processing.
    pub fn new() -> Self {
        Self::default()
    }

    /// A compiler with the default transform chain (vendor prefixing).
    pub fn with_autoprefixer() -> Self {
        Self::new().post_processor(Autoprefixer::default())
    }

    /// Appends a transform; transforms run in the order they were added.
    pub fn post_processor(mut self, processor: impl PostProcessor + 'static) -> Self {
        self.post_processors.push(Box::new(processor));
        self
    }

    pub fn post_processor_names(&self) -> Vec<&str> {
        self.post_processors.iter().map(|p| p.name()).collect()
    }
}

/// Picks the preprocessor syntax from the file extension; SCSS otherwise.
fn input_syntax(filename: &Path) -> InputSyntax {
    match filename.extension().and_then(|ext| ext.to_str()) {
        Some("sass") => InputSyntax::Sass,
        Some("css") => InputSyntax::Css,
        _ => InputSyntax::Scss,
    }
}

impl Compiler for GrassCompiler {
    fn compile(&self, request: &CompileRequest) -> Result<String> {
        let style = if request.compress {
            OutputStyle::Compressed
        } else {
            OutputStyle::Expanded
        };
        let mut options = grass::Options::default()
            .style(style)
            .input_syntax(input_syntax(&request.filename));

        // Relative imports resolve against the source file's own directory first
        if let Some(dir) = request.filename.parent() {
            if !dir.as_os_str().is_empty() {
                options = options.load_path(dir);
            }
        }
        for path in &request.load_paths {
            options = options.load_path(path);
        }
        log::debug!(
            "Compiling {} (compress: {}, load paths: {:?})",
            request.filename.display(),
            request.compress,
            request.load_paths
        );

        let mut css =
            grass::from_string(request.source.clone(), &options).map_err(|e| Error::Compile {
                file: request.filename.display().to_string(),
                message: e.to_string(),
            })?;

        for processor in &self.post_processors {
            log::debug!("Running post-processor: {}", processor.name());
            css = processor.process(&css, request.compress)?;
        }

        Ok(css)
    }
}

/// Encodes a browser major version the way `lightningcss` expects.
const fn browser_version(major: u32) -> Option<u32> {
    Some(major << 16)
}

/// Vendor-prefixing transform.
#[derive(Debug, Clone)]
pub struct Autoprefixer {
    browsers: Browsers,
}

impl Autoprefixer {
    pub fn new(browsers: Browsers) -> Self {
        Self { browsers }
    }
}

impl Default for Autoprefixer {
    fn default() -> Self {
        Self::new(Browsers {
            chrome: browser_version(90),
            edge: browser_version(90),
            firefox: browser_version(78),
            opera: browser_version(76),
            safari: browser_version(13),
            ios_saf: browser_version(13),
            samsung: browser_version(14),
            android: browser_version(90),
            ..Browsers::default()
        })
    }
}

impl PostProcessor for Autoprefixer {
    fn name(&self) -> &str {
        "autoprefixer"
    }

    fn process(&self, css: &str, compress: bool) -> Result<String> {
        let failure = |message: String| Error::PostProcess {
            transform: self.name().to_string(),
            message,
        };
        let targets = Targets::from(self.browsers);

        let mut stylesheet =
            StyleSheet::parse(css, ParserOptions::default()).map_err(|e| failure(e.to_string()))?;
        stylesheet
            .minify(MinifyOptions {
                targets,
                ..MinifyOptions::default()
            })
            .map_err(|e| failure(e.to_string()))?;
        let output = stylesheet
            .to_css(PrinterOptions {
                minify: compress,
                targets,
                ..PrinterOptions::default()
            })
            .map_err(|e| failure(e.to_string()))?;

        Ok(output.code)
    }
}
