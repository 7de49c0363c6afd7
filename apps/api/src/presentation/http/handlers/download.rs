use crate::presentation::http::{errors::AppError, state::AppState};
use axum::{
    extract::State,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};

pub async fn download_errors(State(state): State<AppState>) -> Result<Response, AppError> {
    let store = &state.error_reports;
    let bytes = store
        .load()
        .await
        .map_err(|e| AppError::Storage(format!("{:#}", e)))?
        .ok_or_else(|| AppError::NotFound("No error file found".into()))?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        store.file_name().replace('"', "")
    ))
    .map_err(|e| AppError::Internal(format!("Invalid attachment header: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(store.content_type())),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
