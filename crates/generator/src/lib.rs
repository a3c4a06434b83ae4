// Static generation of the dynamic post route: paths, props, markup

pub mod paths;
pub mod props;
pub mod render;
pub mod site;

pub use paths::enumerate_paths;
pub use props::{resolve_props, resolve_props_at};
pub use render::{html_escape, render};
pub use site::{GeneratedPage, GeneratedSite, PrerenderManifest, RouteFailure, generate_site};
