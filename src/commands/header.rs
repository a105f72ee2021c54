//! Header command implementation
//!
//! Renders the `==UserStyle==` block to stdout without building anything,
//! handy for checking the metadata before a release.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use stylestamp::defaults;
use stylestamp::header::render_header;
use stylestamp::metadata::MetadataFile;
use stylestamp::version::current_version;

/// Arguments for the header command
#[derive(Args, Debug)]
pub struct HeaderArgs {
    /// Package metadata file
    #[arg(short, long, value_name = "PATH", env = "STYLESTAMP_METADATA", default_value = defaults::METADATA)]
    pub metadata: PathBuf,

    /// Version to render; defaults to the recorded version, or the current
    /// time when none is recorded
    #[arg(value_name = "VERSION")]
    pub style_version: Option<String>,
}

/// Execute the header command
pub fn execute(args: HeaderArgs) -> Result<()> {
    let file = MetadataFile::load(&args.metadata)?;
    let version = args
        .style_version
        .or_else(|| file.metadata().user_style.version.clone())
        .unwrap_or_else(current_version);

    print!("{}", render_header(file.metadata(), &version));
    Ok(())
}
