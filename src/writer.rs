//! Output writing.

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Writes `content` to `path`, creating any missing parent directories first.
///
/// An existing file is replaced entirely. Errors are returned as-is; a failed
/// write is fatal for the build and nothing tries to recover partial output.
pub fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            log::debug!("Creating output directory {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}

/// Joins a header and compiled CSS into the final output bytes.
pub fn assemble(header: Option<&str>, css: &str) -> Vec<u8> {
    let mut out = String::with_capacity(header.map_or(0, str::len) + css.len());
    if let Some(header) = header {
        out.push_str(header);
    }
    out.push_str(css);
    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_output_creates_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dist/themes/main.css");

        write_output(&path, b"a{color:red}").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_write_output_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("main.css");
        let content = "/* ==UserStyle== */\n\n.a{color:red}\u{2014}é".as_bytes();

        write_output(&path, content).unwrap();

        assert_eq!(fs::read(&path).unwrap(), content);
    }

    #[test]
    fn test_write_output_replaces_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("main.css");
        fs::write(&path, "a much longer previous build output").unwrap();

        write_output(&path, b"new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_output_existing_parent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.css");
        write_output(&path, b"x").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"x");
    }

    #[test]
    fn test_write_output_fails_when_parent_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("dist");
        fs::write(&blocker, "not a directory").unwrap();

        let result = write_output(&blocker.join("main.css"), b"x");

        assert!(result.is_err());
    }

    #[test]
    fn test_assemble_with_header() {
        let bytes = assemble(Some("/* h */\n\n"), "a{}");
        assert_eq!(bytes, b"/* h */\n\na{}");
    }

    #[test]
    fn test_assemble_without_header() {
        assert_eq!(assemble(None, "a{}"), b"a{}");
    }
}
