pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::board::handlers as board_handlers;
use crate::catalog::handlers as catalog_handlers;
use crate::render::handlers as render_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/v1/themes", get(catalog_handlers::handle_list_themes))
        .route(
            "/api/v1/themes/:theme_id",
            get(catalog_handlers::handle_get_theme),
        )
        // Boards
        .route(
            "/api/v1/generate/:theme_id",
            get(board_handlers::handle_generate_board),
        )
        // Printable documents
        .route(
            "/api/v1/download-pdf/:theme_id",
            post(render_handlers::handle_download_pdf),
        )
        .with_state(state)
}
