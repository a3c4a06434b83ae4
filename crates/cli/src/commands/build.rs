use anyhow::{Context, Result};
use ssg_kit_generator::{GeneratedSite, generate_site};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::{load_site, warn_duplicates};

pub const MANIFEST_FILE: &str = "prerender-manifest.json";
pub const DATA_DIR: &str = "_data";

/// Build static site
pub async fn run(config: Option<PathBuf>, output: PathBuf) -> Result<()> {
    println!("🔨 Building static site...");
    if let Some(path) = &config {
        println!("   Config: {}", path.display());
    }
    println!("   Output: {}", output.display());
    println!();

    let site = load_site(config.as_deref())?;

    println!("✓ Loaded {} posts", site.store.len());
    println!("  Route: /{}/[id]", site.config.route);
    warn_duplicates(&site);
    println!();

    println!("📄 Generating pages...");
    let generated = generate_site(&site.store, &site.config);
    let written = write_site(&generated, &output)?;
    println!("   ✓ Wrote {} pages", written);

    for failure in &generated.failures {
        eprintln!("   ✗ Route '{}' failed: {}", failure.id, failure.error);
    }

    if !generated.is_complete() {
        anyhow::bail!(
            "{} of {} routes failed to generate",
            generated.failures.len(),
            generated.manifest.paths.len()
        );
    }

    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();

    Ok(())
}

/// Write generated pages, their props and the prerender manifest under `output`.
///
/// Layout:
/// - `<route>/<id>/index.html`
/// - `_data/<route>/<id>.json`
/// - `prerender-manifest.json`
///
/// A repeated id is written once, from its first page. Returns the number of
/// pages written.
pub fn write_site(site: &GeneratedSite, output: &Path) -> Result<usize> {
    let route = &site.manifest.route;
    let data_dir = output.join(DATA_DIR).join(route);
    fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

    let mut written = HashSet::new();
    for page in &site.pages {
        if !written.insert(page.id.as_str()) {
            continue;
        }

        let page_dir = output.join(route).join(&page.id);
        fs::create_dir_all(&page_dir)
            .with_context(|| format!("Failed to create {}", page_dir.display()))?;
        fs::write(page_dir.join("index.html"), &page.html)
            .with_context(|| format!("Failed to write page for {}", page.route))?;

        let data_path = data_dir.join(format!("{}.json", page.id));
        fs::write(&data_path, &page.props_json)
            .with_context(|| format!("Failed to write {}", data_path.display()))?;

        tracing::debug!(route = %page.route, "wrote page");
    }

    let manifest =
        serde_json::to_string_pretty(&site.manifest).context("Failed to serialize manifest")?;
    fs::write(output.join(MANIFEST_FILE), manifest).context("Failed to write manifest")?;

    Ok(written.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssg_kit_core::{Post, PostStore, Props, SiteConfig};
    use tempfile::TempDir;

    #[test]
    fn test_write_seed_site() {
        let dir = TempDir::new().unwrap();
        let site = generate_site(&PostStore::seed(), &SiteConfig::default());

        let written = write_site(&site, dir.path()).unwrap();
        assert_eq!(written, 1);

        let html = fs::read_to_string(dir.path().join("ssg-dynamic/1/index.html")).unwrap();
        assert!(html.contains("First post"));

        let json = fs::read_to_string(dir.path().join("_data/ssg-dynamic/1.json")).unwrap();
        let props: Props = serde_json::from_str(&json).unwrap();
        assert_eq!(props.data, Some(Post::new("1", "First post")));
        assert!(html.contains(&props.time.to_string()));
    }

    #[test]
    fn test_write_manifest() {
        let dir = TempDir::new().unwrap();
        let site = generate_site(&PostStore::seed(), &SiteConfig::default());
        write_site(&site, dir.path()).unwrap();

        let manifest = fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(value["route"], "ssg-dynamic");
        assert_eq!(value["fallback"], false);
        assert_eq!(value["paths"][0]["id"], "1");
    }

    #[test]
    fn test_write_duplicate_ids_once() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::new(vec![Post::new("a", "Alpha"), Post::new("a", "Beta")]);
        let site = generate_site(&store, &SiteConfig::default());

        let written = write_site(&site, dir.path()).unwrap();
        assert_eq!(written, 1);

        let html = fs::read_to_string(dir.path().join("ssg-dynamic/a/index.html")).unwrap();
        assert!(html.contains("Alpha"));
        assert!(!html.contains("Beta"));
    }

    #[test]
    fn test_failed_route_is_not_written() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::new(vec![Post::new("ok", "Fine"), Post::new("", "Broken")]);
        let site = generate_site(&store, &SiteConfig::default());

        let written = write_site(&site, dir.path()).unwrap();
        assert_eq!(written, 1);
        assert!(dir.path().join("ssg-dynamic/ok/index.html").exists());
        assert_eq!(site.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_run_fails_with_broken_config() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("site.toml");
        fs::write(&config, "[[post]]\nid = \"../x\"\ntitle = \"Bad\"\n").unwrap();

        let result = run(Some(config), dir.path().join("out")).await;
        assert!(result.is_err());
        assert!(!dir.path().join("out").exists());
    }
}
