// POST /api/similarity: upload a batch and compute its similarity matrix.
//
// Files arrive as repeated multipart fields named "files". Each one is staged
// under <upload_dir>/<batch>/<index>/<name> so identical names in one batch
// cannot overwrite each other, then scored on a blocking task. The batch
// directory is a TempDir owned by the handler future, so it is removed on
// every exit path, including a client that disconnects mid-upload.
//
// Returns 200 {"session", "matrix", "files"} on success and 400 {"error"}
// for anything wrong with the upload itself.

use std::path::{Path, PathBuf};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Duration;
use tracing::{debug, error, info, warn};

use crate::extract::{display_name, DocumentFormat};
use crate::similarity::SimilarityReport;
use crate::web::{api_error, AppState};

enum UploadError {
    BadRequest(String),
    Internal(anyhow::Error),
}

impl From<std::io::Error> for UploadError {
    fn from(e: std::io::Error) -> Self {
        Self::Internal(e.into())
    }
}

pub async fn upload_and_compare(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let pruned = state
        .sessions
        .prune(Duration::minutes(state.config.session_ttl_mins))
        .await;
    if pruned > 0 {
        debug!(pruned, "Pruned expired sessions");
    }

    let staging = match tempfile::Builder::new()
        .prefix("batch-")
        .tempdir_in(&state.config.upload_dir)
    {
        Ok(dir) => dir,
        Err(e) => {
            error!(
                dir = %state.config.upload_dir.display(),
                error = %e,
                "Failed to create staging directory"
            );
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to process upload");
        }
    };
    let result = stage_and_score(&state, &mut multipart, staging.path()).await;

    let staging_path = staging.path().to_path_buf();
    if let Err(e) = staging.close() {
        warn!(dir = %staging_path.display(), error = %e, "Failed to remove staging directory");
    }

    match result {
        Ok(report) => {
            let session = state.sessions.insert(report.clone()).await;
            info!(session = %session, files = report.files.len(), "Batch scored");
            Json(serde_json::json!({
                "session": session,
                "matrix": report.matrix,
                "files": report.files,
            }))
            .into_response()
        }
        Err(UploadError::BadRequest(message)) => api_error(StatusCode::BAD_REQUEST, &message),
        Err(UploadError::Internal(e)) => {
            error!(error = %e, "Upload processing failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to process upload")
        }
    }
}

async fn stage_and_score(
    state: &AppState,
    multipart: &mut Multipart,
    staging: &Path,
) -> Result<SimilarityReport, UploadError> {
    let mut paths: Vec<PathBuf> = Vec::new();
    let mut saw_files_field = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("files") {
            continue;
        }
        saw_files_field = true;

        let Some(uploaded_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if uploaded_name.is_empty() {
            continue;
        }

        // Never trust client-supplied directories
        let base_name = match Path::new(&uploaded_name).file_name() {
            Some(name) if DocumentFormat::from_path(Path::new(name)).is_ok() => name.to_owned(),
            _ => {
                return Err(UploadError::BadRequest(format!(
                    "Unsupported file format: {uploaded_name}"
                )))
            }
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| UploadError::BadRequest(e.body_text()))?;

        let dir = staging.join(paths.len().to_string());
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(&base_name);
        tokio::fs::write(&path, &data).await?;
        debug!(file = %uploaded_name, bytes = data.len(), "Staged upload");
        paths.push(path);
    }

    if !saw_files_field {
        return Err(UploadError::BadRequest("No files uploaded".to_string()));
    }

    let engine = state.engine;
    let outcome = tokio::task::spawn_blocking(move || engine.compute(&paths))
        .await
        .map_err(|e| UploadError::Internal(e.into()))?;

    outcome.map_err(|e| {
        // Report the uploaded name, not the staging path
        let name = display_name(e.path());
        UploadError::BadRequest(e.with_path(name).to_string())
    })
}
