//! Shared handler state, injected into the depot once per request.

use std::sync::Arc;

use bitebuddy_app::context::AppContext;

/// Handlers reach every domain service through `app`.
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
