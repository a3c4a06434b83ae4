use ssg_kit_core::{PathParams, PostStore, StaticPaths};

/// List the route parameters to pre-render, one per post in store order.
///
/// Fallback is always disabled: any id not listed here is a 404.
pub fn enumerate_paths(store: &PostStore) -> StaticPaths {
    StaticPaths {
        paths: store
            .posts()
            .iter()
            .map(|post| PathParams {
                id: post.id.clone(),
            })
            .collect(),
        fallback: false,
    }
}
