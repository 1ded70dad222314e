use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::catalog::error::CatalogError;
use crate::catalog::store::ThemeStore;
use crate::catalog::theme::{Theme, ThemeSummary};

/// Resolves theme ids into validated themes. Nothing is cached: every call
/// reads the backing store again.
#[derive(Clone)]
pub struct ThemeCatalog {
    store: Arc<dyn ThemeStore>,
    timeout: Duration,
}

impl ThemeCatalog {
    pub fn new(store: Arc<dyn ThemeStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Loads and validates a single theme.
    pub async fn load(&self, theme_id: &str) -> Result<Theme, CatalogError> {
        let fetched = tokio::time::timeout(self.timeout, self.store.get(theme_id))
            .await
            .map_err(|_| {
                CatalogError::Storage(format!(
                    "timed out after {:?} fetching theme {theme_id}",
                    self.timeout
                ))
            })??;

        let bytes = fetched.ok_or_else(|| CatalogError::NotFound(theme_id.to_string()))?;
        Theme::from_json(theme_id, &bytes)
    }

    /// Lists every theme that loads cleanly. Themes that are missing or invalid
    /// are skipped with a warning rather than failing the whole listing.
    pub async fn list(&self) -> Result<Vec<ThemeSummary>, CatalogError> {
        let ids = tokio::time::timeout(self.timeout, self.store.list_ids())
            .await
            .map_err(|_| {
                CatalogError::Storage(format!("timed out after {:?} listing themes", self.timeout))
            })??;

        let mut summaries = Vec::with_capacity(ids.len());
        for theme_id in ids {
            match self.load(&theme_id).await {
                Ok(theme) => summaries.push(theme.summary()),
                Err(e @ (CatalogError::NotFound(_) | CatalogError::InvalidTheme { .. })) => {
                    warn!(theme_id = %theme_id, "Skipping theme in listing: {e}");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(summaries)
    }
}
