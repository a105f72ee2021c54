//! Compile command implementation
//!
//! Plain compilation: no metadata header, no version bump, no git.

use anyhow::{Context, Result};
use clap::Args;
use std::time::Instant;

use crate::cli::StyleArgs;
use stylestamp::output::OutputConfig;
use stylestamp::pipeline::run_compile;

/// Arguments for the compile command
#[derive(Args, Debug)]
pub struct CompileArgs {
    #[command(flatten)]
    pub style: StyleArgs,

    /// Suppress the summary
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the compile command
pub fn execute(args: CompileArgs, output: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();
    // The metadata file is never read by a plain compile
    let paths = args.style.paths(Default::default());

    let report = run_compile(&paths, &args.style.options(), &args.style.compiler())
        .context("Compile failed")?;

    if !args.quiet {
        println!(
            "{} Compiled {} ({} bytes) in {:.2}s",
            output.marker("✅", "[OK]"),
            report.output_path.display(),
            report.bytes_written,
            start_time.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args_for(root: &TempDir, no_compress: bool) -> CompileArgs {
        CompileArgs {
            style: StyleArgs {
                root: Some(root.path().to_path_buf()),
                input: PathBuf::from("styles/theme.scss"),
                output: PathBuf::from("public/theme.css"),
                load_paths: Vec::new(),
                no_compress,
                no_prefix: true,
            },
            quiet: true,
        }
    }

    #[test]
    fn test_execute_expanded_output() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("styles")).unwrap();
        fs::write(root.path().join("styles/theme.scss"), "a { b { c: d; } }").unwrap();

        execute(args_for(&root, true), &OutputConfig { use_color: false }).unwrap();

        let css = fs::read_to_string(root.path().join("public/theme.css")).unwrap();
        assert_eq!(css.trim_end(), "a b {\n  c: d;\n}");
    }

    #[test]
    fn test_execute_missing_source() {
        let root = TempDir::new().unwrap();

        let err = execute(args_for(&root, false), &OutputConfig { use_color: false }).unwrap_err();

        assert!(format!("{:#}", err).contains("theme.scss"));
    }
}
