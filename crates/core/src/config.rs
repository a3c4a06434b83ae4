use crate::error::{Error, Result};
use crate::store::PostStore;
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    site: RawSite,
    #[serde(default)]
    post: Vec<RawPost>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSite {
    route: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    id: String,
    title: String,
}

/// A parsed site: its settings plus the posts to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub config: SiteConfig,
    pub store: PostStore,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            config: SiteConfig::default(),
            store: PostStore::seed(),
        }
    }
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<Site> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<Site> {
    let raw: RawConfig = toml::from_str(content)?;

    let route = match raw.site.route {
        Some(route) => {
            validate_segment(&route, "site.route")?;
            route
        }
        None => DEFAULT_ROUTE.to_string(),
    };

    let posts = raw
        .post
        .into_iter()
        .map(|p| -> Result<Post> {
            validate_segment(&p.id, "post.id")?;
            Ok(Post {
                id: p.id,
                title: p.title,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Site {
        config: SiteConfig { route },
        store: PostStore::new(posts),
    })
}

/// Check that a value can be used as a single URL path segment and directory name.
///
/// Rejects empty values, `.` and `..`, separators, and control characters so a
/// post id can never write outside its route directory. Also rejects characters
/// that change URL meaning (`?`, `#`, `%`) or are route syntax for the preview
/// router (`{`, `}`, a leading `:` or `*`).
fn validate_segment(value: &str, field_name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty value in '{}' field",
            field_name
        )));
    }

    if value == "." || value == ".." {
        return Err(Error::ConfigParse(format!(
            "Relative directory references not allowed in '{}': '{}'",
            field_name, value
        )));
    }

    if value.contains(['/', '\\']) || value.chars().any(char::is_control) {
        return Err(Error::ConfigParse(format!(
            "'{}' must be a single path segment, got '{}'",
            field_name, value
        )));
    }

    if value.contains(['?', '#', '%']) {
        return Err(Error::ConfigParse(format!(
            "'{}' must not contain '?', '#' or '%', got '{}'",
            field_name, value
        )));
    }

    if value.contains(['{', '}']) || value.starts_with([':', '*']) {
        return Err(Error::ConfigParse(format!(
            "'{}' must not contain route syntax ('{{', '}}', leading ':' or '*'), got '{}'",
            field_name, value
        )));
    }

    Ok(())
}
