pub mod build;
pub mod init;
pub mod preview;
pub mod validate;

use anyhow::{Context, Result};
use ssg_kit_core::{Site, parse_site_toml};
use std::path::Path;

/// Load the site from a site.toml, or fall back to the built-in posts
pub fn load_site(config: Option<&Path>) -> Result<Site> {
    let Some(path) = config else {
        return Ok(Site::default());
    };

    if !path.exists() {
        anyhow::bail!(
            "Config file does not exist: {}\nRun 'ssg-kit init <dir>' to create one",
            path.display()
        );
    }

    parse_site_toml(path).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Print a warning for every post id that is shadowed by an earlier post
pub fn warn_duplicates(site: &Site) {
    for id in site.store.duplicate_ids() {
        eprintln!("   ⚠ Warning: duplicate post id '{}' (first match wins)", id);
    }
}
