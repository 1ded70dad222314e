//! Axum route handlers for board generation.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::board::generator::{generate_board, Board};
use crate::catalog::Theme;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateBoardResponse {
    pub board: Board,
    pub theme: Theme,
}

/// GET /api/v1/generate/:theme_id
///
/// Loads the theme and returns a freshly drawn board alongside it.
pub async fn handle_generate_board(
    State(state): State<AppState>,
    Path(theme_id): Path<String>,
) -> Result<Json<GenerateBoardResponse>, AppError> {
    let theme = state.catalog.load(&theme_id).await?;
    let board = generate_board(&theme, state.sampler.as_ref())?;
    info!(theme_id = %theme_id, "Generated board");
    Ok(Json(GenerateBoardResponse { board, theme }))
}
