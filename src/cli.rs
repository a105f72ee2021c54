//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use crate::commands;
use stylestamp::compiler::GrassCompiler;
use stylestamp::defaults;
use stylestamp::output::OutputConfig;
use stylestamp::pipeline::{BuildOptions, BuildPaths};

/// stylestamp - Compile, stamp and commit userstyle stylesheets
#[derive(Parser, Debug)]
#[command(name = "stylestamp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Bump the version, compile with the userstyle header and auto-commit
    Build(commands::build::BuildArgs),

    /// Compile the stylesheet without header, version bump or commit
    Compile(commands::compile::CompileArgs),

    /// Print the version a build would stamp now
    Version(commands::version::VersionArgs),

    /// Print the userstyle header for the current metadata
    Header(commands::header::HeaderArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

/// Stylesheet location and compiler options shared by the build commands
#[derive(Args, Debug, Clone)]
pub struct StyleArgs {
    /// Project root; relative paths resolve against it and git runs in it
    #[arg(long, value_name = "DIR", env = "STYLESTAMP_ROOT")]
    pub root: Option<PathBuf>,

    /// Stylesheet source file
    #[arg(short, long, value_name = "PATH", env = "STYLESTAMP_INPUT", default_value = defaults::INPUT)]
    pub input: PathBuf,

    /// Compiled CSS output file
    #[arg(short, long, value_name = "PATH", env = "STYLESTAMP_OUTPUT", default_value = defaults::OUTPUT)]
    pub output: PathBuf,

    /// Additional directory to search for imported partials (repeatable)
    #[arg(short = 'I', long = "load-path", value_name = "DIR")]
    pub load_paths: Vec<PathBuf>,

    /// Emit expanded instead of compressed CSS
    #[arg(long)]
    pub no_compress: bool,

    /// Skip vendor prefixing
    #[arg(long)]
    pub no_prefix: bool,
}

impl StyleArgs {
    pub fn paths(&self, metadata: PathBuf) -> BuildPaths {
        let root = self.root.clone().unwrap_or_else(defaults::default_root);
        BuildPaths {
            root,
            input: self.input.clone(),
            output: self.output.clone(),
            metadata,
        }
    }

    pub fn options(&self) -> BuildOptions {
        BuildOptions {
            compress: !self.no_compress,
            load_paths: self.load_paths.clone(),
        }
    }

    pub fn compiler(&self) -> GrassCompiler {
        if self.no_prefix {
            GrassCompiler::new()
        } else {
            GrassCompiler::with_autoprefixer()
        }
    }
}

/// Installs the `env_logger` backend; `RUST_LOG` refines `--log-level`.
fn init_logging(log_level: &str, output: &OutputConfig) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Info)
        .parse_filters(log_level)
        .write_style(output.write_style())
        .format_timestamp(None)
        .format_target(false);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // A logger may already be installed when driven from tests
    let _ = builder.try_init();
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let output = OutputConfig::from_env_and_flag(&self.color);
        init_logging(&self.log_level, &output);

        match self.command {
            Commands::Build(args) => commands::build::execute(args, &output),
            Commands::Compile(args) => commands::compile::execute(args, &output),
            Commands::Version(args) => commands::version::execute(args),
            Commands::Header(args) => commands::header::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
