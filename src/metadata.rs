//! # Package Metadata
//!
//! The userstyle's identity (name, author, namespace, current version...) lives
//! in the project's `package.json`. This module loads that file once, exposes
//! the fields the header needs as a typed [`PackageMetadata`], and writes the
//! file back after the version bump.
//!
//! The raw JSON document is kept alongside the typed view so that rewriting
//! the file only touches `userStyle.version`: every other key, including ones
//! this tool knows nothing about, keeps its value and its position.

use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A person field as npm allows it: either `"Jane <jane@example.com>"` or an
/// object with separate parts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Person {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Person::Name(name) => f.write_str(name),
            Person::Detailed { name, email, url } => {
                f.write_str(name)?;
                if let Some(email) = email {
                    write!(f, " <{}>", email)?;
                }
                if let Some(url) = url {
                    write!(f, " ({})", url)?;
                }
                Ok(())
            }
        }
    }
}

/// The `repository` field, either a bare URL or `{ "type": "git", "url": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Repository {
    Url(String),
    Detailed { url: String },
}

impl Repository {
    pub fn url(&self) -> &str {
        match self {
            Repository::Url(url) => url,
            Repository::Detailed { url } => url,
        }
    }
}

/// The `userStyle` block of the metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserStyle {
    /// Absent until the first build stamps one.
    #[serde(default)]
    pub version: Option<String>,
    pub namespace: String,
}

/// Typed view of the fields the userstyle header is rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub description: String,
    pub author: Person,
    pub repository: Repository,
    pub homepage: String,
    pub license: String,
    #[serde(rename = "userStyle")]
    pub user_style: UserStyle,
}

/// A loaded metadata file: its location, the raw document and the typed view.
#[derive(Debug, Clone)]
pub struct MetadataFile {
    path: PathBuf,
    document: Value,
    metadata: PackageMetadata,
}

impl MetadataFile {
    /// Reads and validates the metadata file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::Metadata {
            path: path.to_path_buf(),
            message: format!("failed to read file: {}", e),
        })?;
        Self::parse(path, &content)
    }

    /// Parses metadata from `content`, remembering `path` for [`save`](Self::save).
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let metadata_error = |message: String| Error::Metadata {
            path: path.to_path_buf(),
            message,
        };

        let document: Value =
            serde_json::from_str(content).map_err(|e| metadata_error(e.to_string()))?;
        if !document.is_object() {
            return Err(metadata_error("top-level value must be an object".to_string()));
        }
        let metadata: PackageMetadata =
            serde_json::from_value(document.clone()).map_err(|e| metadata_error(e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            document,
            metadata,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    /// Sets `userStyle.version`, returning the version it replaced.
    ///
    /// Only the in-memory copy changes; call [`save`](Self::save) to persist.
    pub fn set_style_version(&mut self, version: &str) -> Option<String> {
        if let Some(style) = self
            .document
            .get_mut("userStyle")
            .and_then(Value::as_object_mut)
        {
            style.insert("version".to_string(), Value::String(version.to_string()));
        }
        self.metadata.user_style.version.replace(version.to_string())
    }

    /// Serializes the document the way npm writes it: two-space indentation
    /// and a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(&self.document)?;
        json.push('\n');
        Ok(json)
    }

    /// Writes the document back to the path it was loaded from.
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, self.to_json_string()?)?;
        Ok(())
    }
}
