use crate::AppState;
use crate::api::error::AppError;
use axum::{
    Json,
    extract::{Multipart, State, multipart::Field},
};
use futures::TryStreamExt;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tokio_util::io::StreamReader;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ResponseEntry {
    pub filename: String,
    /// Structured data returned by the extraction routine, passed through as-is
    #[schema(value_type = Object)]
    pub extracted_data: Value,
}

/// Accept a batch of uploaded report files and extract each one.
///
/// Files are processed strictly in input order. Each file is written to the
/// scratch directory under its client-supplied name, handed to the extractor,
/// and deleted again no matter how the extraction went. The first failing
/// file aborts the whole batch; earlier results are discarded.
#[utoipa::path(
    post,
    path = "/api/extract-text",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "One or more report files as multipart form parts"
    ),
    responses(
        (status = 200, description = "Extraction results in input order", body = Vec<ResponseEntry>),
        (status = 500, description = "A file failed to process; detail names it")
    ),
    tag = "extraction"
)]
pub async fn extract_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<ResponseEntry>>, AppError> {
    let mut responses = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        // Only fields carrying a filename are file parts; plain form fields
        // are ignored.
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };

        let scratch_path = state.config.scratch_dir.join(&filename);

        let outcome = save_and_extract(&state, field, &scratch_path).await;

        // Cleanup runs before the outcome can propagate, on every path.
        remove_scratch(&scratch_path).await;

        let extracted_data = outcome.map_err(|source| AppError::Processing {
            filename: filename.clone(),
            source,
        })?;

        tracing::info!("Extracted {}", filename);
        responses.push(ResponseEntry {
            filename,
            extracted_data,
        });
    }

    Ok(Json(responses))
}

/// Stream the uploaded part to the scratch path, then run extraction on it.
/// The caller owns scratch-file cleanup.
async fn save_and_extract(
    state: &AppState,
    field: Field<'_>,
    scratch_path: &Path,
) -> anyhow::Result<Value> {
    let body_with_io_error =
        field.map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err));
    let mut reader = StreamReader::new(body_with_io_error);

    let mut file = tokio::fs::File::create(scratch_path).await?;
    tokio::io::copy(&mut reader, &mut file).await?;
    drop(file);

    state.extractor.process_report(scratch_path).await
}

async fn remove_scratch(path: &Path) {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!("Failed to remove scratch file {}: {}", path.display(), e);
        }
    }
}
