use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::app::AppState;

pub const INDEX_NOT_FOUND: &str = "Erreur : fichier HTML non trouvé.";

/// `GET /`
pub async fn landing_page(State(state): State<AppState>) -> Response {
    match tokio::fs::read(state.index_file.as_path()).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!("Landing page {} unreadable: {}", state.index_file.display(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                INDEX_NOT_FOUND,
            )
                .into_response()
        }
    }
}
