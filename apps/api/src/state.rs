use std::sync::Arc;

use crate::config::Config;
use crate::prose::ProseSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable prose source. Default: `StaticProse` with no sections, so render
    /// calls rely on caller-supplied prose.
    pub prose: Arc<dyn ProseSource>,
}
