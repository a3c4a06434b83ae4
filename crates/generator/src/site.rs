use crate::paths::enumerate_paths;
use crate::props::resolve_props;
use crate::render::render;
use serde::Serialize;
use ssg_kit_core::{Error, PathParams, PostStore, PropsContext, Result, SiteConfig};

/// A fully rendered route ready to be written or served
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub id: String,
    /// Public URL path, e.g. `/ssg-dynamic/1`
    pub route: String,
    pub html: String,
    pub props_json: String,
}

/// A route that could not be generated
#[derive(Debug)]
pub struct RouteFailure {
    pub id: String,
    pub error: Error,
}

/// Record of which routes were pre-rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrerenderManifest {
    pub route: String,
    pub paths: Vec<PathParams>,
    pub fallback: bool,
}

pub struct GeneratedSite {
    pub pages: Vec<GeneratedPage>,
    pub failures: Vec<RouteFailure>,
    pub manifest: PrerenderManifest,
}

impl GeneratedSite {
    pub fn page(&self, id: &str) -> Option<&GeneratedPage> {
        self.pages.iter().find(|page| page.id == id)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generate every enumerated route.
///
/// Paths are enumerated once, then each route is resolved and rendered on its
/// own. A failing route is recorded and the remaining routes still build.
pub fn generate_site(store: &PostStore, config: &SiteConfig) -> GeneratedSite {
    let static_paths = enumerate_paths(store);
    let mut pages = Vec::with_capacity(static_paths.paths.len());
    let mut failures = Vec::new();

    for params in &static_paths.paths {
        match generate_page(store, config, params) {
            Ok(page) => {
                tracing::debug!(route = %page.route, "generated page");
                pages.push(page);
            }
            Err(error) => {
                tracing::debug!(id = %params.id, %error, "failed to generate route");
                failures.push(RouteFailure {
                    id: params.id.clone(),
                    error,
                });
            }
        }
    }

    GeneratedSite {
        pages,
        failures,
        manifest: PrerenderManifest {
            route: config.route.clone(),
            paths: static_paths.paths,
            fallback: static_paths.fallback,
        },
    }
}

fn generate_page(
    store: &PostStore,
    config: &SiteConfig,
    params: &PathParams,
) -> Result<GeneratedPage> {
    let props = resolve_props(store, &PropsContext::from(params.clone()))?;
    let html = render(&props)?;
    let props_json = serde_json::to_string(&props)?;

    Ok(GeneratedPage {
        id: params.id.clone(),
        route: format!("/{}/{}", config.route, params.id),
        html,
        props_json,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssg_kit_core::{Post, Props};

    #[test]
    fn test_generate_seed_site() {
        let site = generate_site(&PostStore::seed(), &SiteConfig::default());
        assert!(site.is_complete());
        assert_eq!(site.pages.len(), 1);

        let page = site.page("1").unwrap();
        assert_eq!(page.route, "/ssg-dynamic/1");
        assert!(page.html.contains("First post"));

        let props: Props = serde_json::from_str(&page.props_json).unwrap();
        assert_eq!(props.data, Some(Post::new("1", "First post")));
        assert!(page.html.contains(&props.time.to_string()));
    }

    #[test]
    fn test_manifest_lists_paths_without_fallback() {
        let store = PostStore::new(vec![Post::new("a", "A"), Post::new("b", "B")]);
        let config = SiteConfig {
            route: "posts".to_string(),
        };
        let site = generate_site(&store, &config);

        assert_eq!(site.manifest.route, "posts");
        assert!(!site.manifest.fallback);
        assert_eq!(site.manifest.paths.len(), 2);
        assert_eq!(site.page("b").unwrap().route, "/posts/b");

        let json = serde_json::to_string(&site.manifest).unwrap();
        assert_eq!(
            json,
            r#"{"route":"posts","paths":[{"id":"a"},{"id":"b"}],"fallback":false}"#
        );
    }

    #[test]
    fn test_empty_id_fails_alone() {
        let store = PostStore::new(vec![
            Post::new("a", "A"),
            Post::new("", "Broken"),
            Post::new("c", "C"),
        ]);
        let site = generate_site(&store, &SiteConfig::default());

        assert!(!site.is_complete());
        assert_eq!(site.failures.len(), 1);
        assert!(matches!(site.failures[0].error, Error::InvalidInput(_)));

        let ids: Vec<&str> = site.pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_empty_store_generates_nothing() {
        let site = generate_site(&PostStore::default(), &SiteConfig::default());
        assert!(site.pages.is_empty());
        assert!(site.is_complete());
        assert!(site.manifest.paths.is_empty());
    }
}
