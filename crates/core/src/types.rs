use serde::{Deserialize, Serialize};

/// Route segment the post pages are generated under when none is configured
pub const DEFAULT_ROUTE: &str = "ssg-dynamic";

/// A single post record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
}

impl Post {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Route parameters for one pre-rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParams {
    pub id: String,
}

/// The set of routes to pre-render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPaths {
    pub paths: Vec<PathParams>,
    /// Whether routes outside `paths` may be generated on demand
    pub fallback: bool,
}

/// What the build hands to the props resolver for a single route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropsContext {
    pub params: Option<PathParams>,
}

impl PropsContext {
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            params: Some(PathParams { id: id.into() }),
        }
    }
}

impl From<PathParams> for PropsContext {
    fn from(params: PathParams) -> Self {
        Self {
            params: Some(params),
        }
    }
}

/// Props baked into a generated page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Props {
    pub data: Option<Post>,
    /// Milliseconds since the Unix epoch, captured when the props were resolved
    pub time: i64,
}

/// Site-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub route: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            route: DEFAULT_ROUTE.to_string(),
        }
    }
}
