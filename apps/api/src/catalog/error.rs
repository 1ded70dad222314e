use thiserror::Error;

/// Failures while resolving a theme id into a validated `Theme`.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Theme {0} not found")]
    NotFound(String),

    #[error("Theme {theme_id} is invalid: {reason}")]
    InvalidTheme { theme_id: String, reason: String },

    #[error("{0}")]
    Storage(String),
}

impl CatalogError {
    pub(crate) fn invalid(theme_id: &str, reason: impl Into<String>) -> Self {
        CatalogError::InvalidTheme {
            theme_id: theme_id.to_string(),
            reason: reason.into(),
        }
    }
}
