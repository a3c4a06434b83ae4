use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Path as UrlPath, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use ssg_kit_core::parse_site_toml;
use ssg_kit_generator::{GeneratedSite, generate_site, html_escape};
use std::collections::HashSet;
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use super::{build::DATA_DIR, load_site, warn_duplicates};

/// Cache policy for pre-rendered routes: cache at the edge until the next build
pub const PRERENDER_CACHE_CONTROL: &str = "s-maxage=31536000, stale-while-revalidate";

#[derive(Clone)]
struct AppState {
    site: Arc<RwLock<GeneratedSite>>,
}

impl AppState {
    fn new(site: GeneratedSite) -> Self {
        Self {
            site: Arc::new(RwLock::new(site)),
        }
    }
}

/// Start preview server for the pre-rendered routes.
///
/// This command:
/// - Loads site.toml (or the built-in posts) and generates every route once
/// - Serves the frozen pages and props; unknown ids are a 404
/// - Watches site.toml and regenerates the site when it changes
///
/// # Arguments
///
/// * `config` - Optional path to site.toml
/// * `port` - Port to serve on (default: 8080)
pub async fn run(config: Option<PathBuf>, port: u16) -> Result<()> {
    println!("🚀 Starting preview server...");

    let site = load_site(config.as_deref())?;
    warn_duplicates(&site);

    let generated = generate_site(&site.store, &site.config);
    for failure in &generated.failures {
        eprintln!("   ✗ Route '{}' failed: {}", failure.id, failure.error);
    }
    println!("   ✓ Generated {} pages", generated.pages.len());

    let route = site.config.route.clone();
    let state = AppState::new(generated);
    let app = router(state.clone(), &route);

    if let Some(config_path) = config {
        let watch_route = route.clone();
        tokio::spawn(async move {
            if let Err(e) = watch_config(config_path, watch_route, state).await {
                eprintln!("File watcher error: {}", e);
            }
        });
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🌐 Preview ready at: http://localhost:{}/{}/", port, route);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState, route: &str) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route(&format!("/{}/{{id}}", route), get(page_handler))
        .route(&format!("/{}/{}/{{file}}", DATA_DIR, route), get(data_handler))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Watch site.toml and swap in a freshly generated site on change
async fn watch_config(config_path: PathBuf, route: String, state: AppState) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    // Editors often replace the file on save, so watch its directory
    let watch_dir = match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = config_path.file_name().map(|n| n.to_os_string());
    watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

    while let Some(event) = rx.recv().await {
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            continue;
        }
        if !event
            .paths
            .iter()
            .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name)
        {
            continue;
        }

        match reload_site(&config_path, &route, &state).await {
            Ok(Reload::Applied(pages)) => {
                println!("   📝 Config changed, regenerated {} pages", pages)
            }
            Ok(Reload::RouteChanged(new_route)) => eprintln!(
                "   ⚠ Route changed to '{}', restart preview to apply",
                new_route
            ),
            Err(e) => eprintln!("   ⚠ Keeping previous build, config invalid: {:#}", e),
        }
    }

    Ok(())
}

/// Outcome of re-reading site.toml while previewing
#[derive(Debug, PartialEq, Eq)]
enum Reload {
    /// The site was regenerated; holds the number of pages
    Applied(usize),
    /// The config now names a different route; the served site is untouched
    RouteChanged(String),
}

/// Re-read site.toml and swap a freshly generated site into `state`.
///
/// An invalid config is an error and leaves the served site as it was.
async fn reload_site(config_path: &Path, route: &str, state: &AppState) -> Result<Reload> {
    let site = parse_site_toml(config_path)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    if site.config.route != route {
        return Ok(Reload::RouteChanged(site.config.route));
    }

    let generated = generate_site(&site.store, &site.config);
    let pages = generated.pages.len();
    *state.site.write().await = generated;

    Ok(Reload::Applied(pages))
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let site = state.site.read().await;
    let mut listed = HashSet::new();
    let links: String = site
        .pages
        .iter()
        .filter(|page| listed.insert(page.id.clone()))
        .map(|page| {
            let route = html_escape(&page.route);
            format!(r#"<li><a href="{}">{}</a></li>"#, route, route)
        })
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Preview</title></head>
<body>
<h1>Pre-rendered routes</h1>
<ul>{}</ul>
</body>
</html>"#,
        links
    ))
}

async fn page_handler(State(state): State<AppState>, UrlPath(id): UrlPath<String>) -> Response {
    let site = state.site.read().await;
    match site.page(&id) {
        Some(page) => (
            [(header::CACHE_CONTROL, PRERENDER_CACHE_CONTROL)],
            Html(page.html.clone()),
        )
            .into_response(),
        None => not_found().await,
    }
}

async fn data_handler(
    State(state): State<AppState>,
    UrlPath(file): UrlPath<String>,
) -> Response {
    let Some(id) = file.strip_suffix(".json") else {
        return not_found().await;
    };

    let site = state.site.read().await;
    match site.page(id) {
        Some(page) => (
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::CACHE_CONTROL, PRERENDER_CACHE_CONTROL),
            ],
            page.props_json.clone(),
        )
            .into_response(),
        None => not_found().await,
    }
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html("<!DOCTYPE html><html><head><title>404</title></head><body><h1>404: This page could not be found</h1></body></html>"),
    )
        .into_response()
}
