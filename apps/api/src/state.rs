use std::sync::Arc;

use crate::board::Sampler;
use crate::catalog::ThemeCatalog;
use crate::layout::PageConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub catalog: ThemeCatalog,
    /// Pluggable draw strategy. Default: ThreadRngSampler; tests use SeededSampler.
    pub sampler: Arc<dyn Sampler>,
    /// Page geometry and font-size range for the PDF renderer.
    pub page_config: PageConfig,
}
