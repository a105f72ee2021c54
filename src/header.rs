//! Userstyle metadata header.
//!
//! Userstyle managers (Stylus, xStyle...) read a `==UserStyle==` comment block
//! at the top of a stylesheet to display and update the style. The block has a
//! fixed schema, so rendering it is plain templating.

use crate::metadata::PackageMetadata;

/// Renders the `==UserStyle==` block for `metadata` at `version`, followed by
/// a blank line so the compiled CSS starts on its own line.
pub fn render_header(metadata: &PackageMetadata, version: &str) -> String {
    format!(
        "/* ==UserStyle==\n\
         @name         {name}\n\
         @version      {version}\n\
         @namespace    {namespace}\n\
         @description  {description}\n\
         @author       {author}\n\
         @github       {repository}\n\
         @homepageURL  {homepage}\n\
         @license      {license}\n\
         ==/UserStyle== */\n\
         \n",
        name = metadata.name,
        version = version,
        namespace = metadata.user_style.namespace,
        description = metadata.description,
        author = metadata.author,
        repository = metadata.repository.url(),
        homepage = metadata.homepage,
        license = metadata.license,
    )
}
