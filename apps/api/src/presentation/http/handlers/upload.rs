use crate::{
    application::import_users::{dto::ImportSummary, use_case::ImportUsersUseCase},
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    response::Html,
};
use bytes::Bytes;

const UPLOAD_FORM: &str = r#"<!doctype html>
<html>
<body>
    <h2>Upload CSV File</h2>
    <form method="post" enctype="multipart/form-data">
        <input type="file" name="file" required>
        <input type="submit" value="Upload">
    </form>
</body>
</html>
"#;

pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

/// File part of the upload form.
struct UploadedFile {
    file_name: Option<String>,
    data: Bytes,
}

async fn read_file_part(multipart: &mut Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read uploaded file: {}", e)))?;
        return Ok(Some(UploadedFile { file_name, data }));
    }
    Ok(None)
}

pub async fn upload_csv(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImportSummary>, AppError> {
    // Not a multipart body at all, so there is no file part to read.
    let mut multipart = multipart.map_err(|rejection| {
        tracing::warn!(%rejection, "Upload is not multipart/form-data");
        AppError::BadRequest("No file uploaded".into())
    })?;

    let file = read_file_part(&mut multipart)
        .await?
        .ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;

    let file_name = file
        .file_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Empty filename".into()))?;

    tracing::info!(file_name, bytes = file.data.len(), "Received CSV upload");

    let summary = ImportUsersUseCase::new(state.user_repo.clone(), state.error_reports.clone())
        .execute(&file.data)
        .await?;

    Ok(Json(summary))
}
