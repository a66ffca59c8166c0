// POST /api/reset?session=<id>: forget a session's report.
//
// Always succeeds: resetting an unknown or already-expired session is a no-op.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

use super::SessionQuery;
use crate::web::AppState;

pub async fn reset_session(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> impl IntoResponse {
    if let Some(id) = query.session.as_deref() {
        if state.sessions.remove(id).await {
            info!(session = id, "Session reset");
        }
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Reset successful" })),
    )
}
