//! Axum route handler for the printable PDF download.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::board::{generate_board, Board};
use crate::errors::AppError;
use crate::render::pdf::{render_board_pdf, PDF_MIME};
use crate::state::AppState;

/// Optional request body. A missing, `null` or empty board means "draw one for me".
#[derive(Debug, Default, Deserialize)]
pub struct DownloadPdfRequest {
    #[serde(default, deserialize_with = "empty_board_as_none")]
    pub board: Option<Board>,
}

fn empty_board_as_none<'de, D>(deserializer: D) -> Result<Option<Board>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Vec<Vec<String>>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(rows) if rows.is_empty() => Ok(None),
        Some(rows) => Board::try_from(rows)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// POST /api/v1/download-pdf/:theme_id
///
/// Renders the supplied board (or a freshly generated one) as a PDF attachment
/// named `<theme_id>_bingo.pdf`.
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    Path(theme_id): Path<String>,
    body: Bytes,
) -> Result<Response, AppError> {
    let theme = state.catalog.load(&theme_id).await?;
    let request = parse_request(&body)?;

    let board = match request.board {
        Some(board) => board,
        None => generate_board(&theme, state.sampler.as_ref())?,
    };

    let page_config = state.page_config.clone();
    let pdf = tokio::task::spawn_blocking(move || render_board_pdf(&board, &theme, &page_config))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))?;

    info!(theme_id = %theme_id, bytes = pdf.len(), "Rendered board PDF");

    let disposition = format!("attachment; filename=\"{theme_id}_bingo.pdf\"");
    Ok((
        [
            (header::CONTENT_TYPE, PDF_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

fn parse_request(body: &[u8]) -> Result<DownloadPdfRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DownloadPdfRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_means_generate() {
        assert!(parse_request(b"").unwrap().board.is_none());
        assert!(parse_request(b"  \n").unwrap().board.is_none());
    }

    #[test]
    fn test_null_or_missing_board_means_generate() {
        assert!(parse_request(b"{}").unwrap().board.is_none());
        assert!(parse_request(br#"{"board": null}"#).unwrap().board.is_none());
    }

    #[test]
    fn test_empty_board_array_means_generate() {
        assert!(parse_request(br#"{"board": []}"#).unwrap().board.is_none());
    }

    #[test]
    fn test_supplied_board_is_parsed() {
        let body = serde_json::json!({
            "board": (0..5).map(|r| (0..5).map(|c| format!("{r}{c}")).collect::<Vec<_>>()).collect::<Vec<_>>()
        });
        let request = parse_request(body.to_string().as_bytes()).unwrap();
        assert_eq!(request.board.unwrap().cell(2, 2), "22");
    }

    #[test]
    fn test_malformed_board_is_rejected() {
        assert!(matches!(
            parse_request(br#"{"board": [["only one"]]}"#),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_request(b"not json"),
            Err(AppError::Validation(_))
        ));
    }
}
