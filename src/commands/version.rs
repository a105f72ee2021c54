//! Version command implementation
//!
//! Prints the version a build would stamp right now, or with `--current` the
//! version already recorded in the metadata file.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use stylestamp::defaults;
use stylestamp::metadata::MetadataFile;
use stylestamp::version::current_version;

/// Arguments for the version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Print the version recorded in the metadata file instead
    #[arg(long)]
    pub current: bool,

    /// Package metadata file
    #[arg(short, long, value_name = "PATH", env = "STYLESTAMP_METADATA", default_value = defaults::METADATA)]
    pub metadata: PathBuf,
}

/// Execute the version command
pub fn execute(args: VersionArgs) -> Result<()> {
    println!("{}", resolve(&args)?);
    Ok(())
}

fn resolve(args: &VersionArgs) -> Result<String> {
    if !args.current {
        return Ok(current_version());
    }

    let file = MetadataFile::load(&args.metadata)?;
    file.metadata()
        .user_style
        .version
        .clone()
        .with_context(|| format!("No version recorded in {}", args.metadata.display()))
}
