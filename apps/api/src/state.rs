use crate::config::Config;
use crate::layout::PageConfig;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Read-only after startup. Each render builds its own canvas, so nothing here
/// is shared between requests beyond these values.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Page geometry and type sizes for every rendered resume.
    pub page_config: PageConfig,
}
