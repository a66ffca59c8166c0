// POST /api/download/{filetype}?session=<id>: export a session's report.
//
// filetype is "excel" or "pdf". The report is rendered in memory on a
// blocking task and returned as an attachment.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{error, info};

use super::SessionQuery;
use crate::export::ExportFormat;
use crate::web::{api_error, AppState};

pub async fn download_report(
    State(state): State<AppState>,
    Path(filetype): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Response {
    let report = match query.session.as_deref() {
        Some(id) => state.sessions.report(id).await,
        None => None,
    };
    let Some(report) = report else {
        return api_error(
            StatusCode::BAD_REQUEST,
            "No uploaded files found for current session.",
        );
    };

    let Ok(format) = filetype.parse::<ExportFormat>() else {
        return api_error(StatusCode::BAD_REQUEST, "Invalid download type");
    };

    let rendered = tokio::task::spawn_blocking(move || format.render(&report)).await;
    let bytes = match rendered {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            error!(error = %e, format = format.file_extension(), "Export failed");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to render report");
        }
        Err(e) => {
            error!(error = %e, "Export task panicked");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to render report");
        }
    };

    info!(format = format.file_extension(), bytes = bytes.len(), "Report exported");

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.download_name()),
            ),
        ],
        bytes,
    )
        .into_response()
}
