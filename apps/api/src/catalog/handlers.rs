use axum::{
    extract::{Path, State},
    Json,
};

use crate::catalog::{Theme, ThemeSummary};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/themes
pub async fn handle_list_themes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ThemeSummary>>, AppError> {
    Ok(Json(state.catalog.list().await?))
}

/// GET /api/v1/themes/:theme_id
pub async fn handle_get_theme(
    State(state): State<AppState>,
    Path(theme_id): Path<String>,
) -> Result<Json<Theme>, AppError> {
    Ok(Json(state.catalog.load(&theme_id).await?))
}
