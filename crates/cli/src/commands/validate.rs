use super::{load_site, warn_duplicates};
use ssg_kit_generator::enumerate_paths;
use std::path::PathBuf;

pub async fn run(config: Option<PathBuf>) -> anyhow::Result<()> {
    match &config {
        Some(path) => println!("Validating site config at: {}", path.display()),
        None => println!("No config given, validating built-in posts"),
    }

    let site = load_site(config.as_deref())?;

    println!("✓ site config valid");
    println!("  Route: /{}/[id]", site.config.route);
    println!("  Posts: {}", site.store.len());

    warn_duplicates(&site);

    let paths = enumerate_paths(&site.store);
    for params in &paths.paths {
        println!("  → /{}/{}", site.config.route, params.id);
    }

    Ok(())
}
