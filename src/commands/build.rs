//! Build command implementation
//!
//! The userstyle release build:
//! 1. Stamp a new timestamp version into the metadata file
//! 2. Compile the stylesheet
//! 3. Write it with the `==UserStyle==` header
//! 4. Auto-commit the bump when the working tree allows it

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::StyleArgs;
use stylestamp::autocommit::{AutoCommitOutcome, AutoCommitSettings};
use stylestamp::defaults;
use stylestamp::git::SystemGit;
use stylestamp::output::OutputConfig;
use stylestamp::pipeline::run_build;
use stylestamp::version::current_version;

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub style: StyleArgs,

    /// Package metadata file
    #[arg(short, long, value_name = "PATH", env = "STYLESTAMP_METADATA", default_value = defaults::METADATA)]
    pub metadata: PathBuf,

    /// Never auto-commit (same as SKIP_GIT_COMMIT=1)
    #[arg(long)]
    pub no_commit: bool,

    /// Suppress the summary; log output is still controlled by --log-level
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the build command
pub fn execute(args: BuildArgs, output: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();

    let paths = args.style.paths(args.metadata.clone());
    let mut settings = AutoCommitSettings::from_env();
    if args.no_commit {
        settings.skip_commit = true;
    }
    let vcs = SystemGit::new(paths.root.clone());
    let compiler = args.style.compiler();
    let version = current_version();

    let report = match run_build(
        &paths,
        &args.style.options(),
        &compiler,
        &vcs,
        settings,
        &version,
    ) {
        Ok(report) => report,
        Err(e) => {
            if !args.quiet {
                println!("{} Build failed", output.marker("❌", "[FAIL]"));
            }
            return Err(anyhow::Error::new(e).context("Build failed"));
        }
    };

    if !args.quiet {
        println!(
            "{} Built {} (version {}, {} bytes) in {:.2}s",
            output.marker("✅", "[OK]"),
            report.output_path.display(),
            report.version,
            report.bytes_written,
            start_time.elapsed().as_secs_f64()
        );
        match &report.commit {
            AutoCommitOutcome::Committed { message } => {
                println!("   Committed: {}", message)
            }
            AutoCommitOutcome::Skipped(reason) => {
                println!("   Auto-commit skipped: {}", reason)
            }
        }
    }

    Ok(())
}
