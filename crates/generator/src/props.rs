use chrono::{DateTime, Utc};
use ssg_kit_core::{Error, PostStore, Props, PropsContext, Result};

/// Resolve the props for one route, stamping them with the current time.
///
/// The clock is read once here. Callers freeze the result into the generated
/// artifact; nothing re-resolves it when the artifact is served.
pub fn resolve_props(store: &PostStore, ctx: &PropsContext) -> Result<Props> {
    resolve_props_at(store, ctx, Utc::now())
}

/// Resolve the props for one route with an explicit build time
pub fn resolve_props_at(
    store: &PostStore,
    ctx: &PropsContext,
    now: DateTime<Utc>,
) -> Result<Props> {
    let params = ctx
        .params
        .as_ref()
        .ok_or_else(|| Error::InvalidInput("route params are required".to_string()))?;

    if params.id.is_empty() {
        return Err(Error::InvalidInput(
            "route param 'id' must not be empty".to_string(),
        ));
    }

    Ok(Props {
        data: store.find(&params.id).cloned(),
        time: now.timestamp_millis(),
    })
}
