use anyhow::{Context, Result};
use ssg_kit_core::{DEFAULT_ROUTE, PostStore};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "site.toml";

/// Escape a string for safe inclusion in a TOML basic string
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Render the starter site.toml, seeded with the built-in posts
fn starter_config(store: &PostStore) -> String {
    let mut out = String::new();
    out.push_str("# Site configuration for ssg-kit\n\n");
    out.push_str("[site]\n");
    out.push_str("# URL segment the post pages are generated under: /<route>/<id>\n");
    let _ = writeln!(out, "route = \"{}\"", DEFAULT_ROUTE);

    for post in store.posts() {
        out.push('\n');
        out.push_str("[[post]]\n");
        let _ = writeln!(out, "id = \"{}\"", toml_escape_string(&post.id));
        let _ = writeln!(out, "title = \"{}\"", toml_escape_string(&post.title));
    }

    out
}

/// Initialize a new site directory
pub async fn run(path: PathBuf) -> Result<()> {
    println!("🆕 Initializing site at: {}", path.display());

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!(
            "{} already exists in {}, refusing to overwrite",
            CONFIG_FILE,
            path.display()
        );
    }

    fs::create_dir_all(&path).context("Failed to create site directory")?;
    fs::write(&config_path, starter_config(&PostStore::seed()))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("   ✓ Created {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("   ssg-kit build --config {} --output out", config_path.display());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssg_kit_core::{Post, Site, parse_site_toml, parse_site_toml_str};
    use tempfile::TempDir;

    #[test]
    fn test_toml_escape_string() {
        assert_eq!(toml_escape_string("plain"), "plain");
        assert_eq!(toml_escape_string("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(toml_escape_string("a\\b"), "a\\\\b");
        assert_eq!(toml_escape_string("line\nbreak"), "line\\nbreak");
    }

    #[test]
    fn test_starter_config_parses_to_default_site() {
        let site = parse_site_toml_str(&starter_config(&PostStore::seed())).unwrap();
        assert_eq!(site, Site::default());
    }

    #[test]
    fn test_starter_config_escapes_titles() {
        let store = PostStore::new(vec![Post::new("q", "A \"quoted\" title")]);
        let site = parse_site_toml_str(&starter_config(&store)).unwrap();
        assert_eq!(site.store.find("q").unwrap().title, "A \"quoted\" title");
    }

    #[tokio::test]
    async fn test_init_creates_config() {
        let dir = TempDir::new().unwrap();
        let site_dir = dir.path().join("my-site");

        run(site_dir.clone()).await.unwrap();

        let site = parse_site_toml(site_dir.join(CONFIG_FILE)).unwrap();
        assert_eq!(site.store.len(), 1);
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "# mine\n").unwrap();

        let result = run(dir.path().to_path_buf()).await;
        assert!(result.is_err());
        assert_eq!(
            fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap(),
            "# mine\n"
        );
    }
}
