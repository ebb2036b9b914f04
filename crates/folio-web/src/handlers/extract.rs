use axum::extract::{Multipart, State};
use axum::Json;
use std::sync::Arc;

use crate::models::{ApiError, ExtractResponse};
use crate::state::AppState;
use crate::upload;

/// Run the full backend cascade on an uploaded PDF.
pub async fn extract_text(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, ApiError> {
    let mut fields = upload::parse_multipart(multipart, state.max_upload_bytes).await?;
    let file = fields
        .take_pdf()
        .map_err(|r| ApiError::bad_request(r.message()))?;

    tracing::info!(filename = %file.filename, bytes = file.data.len(), "extracting");
    let permit = Arc::clone(&state.extraction_slots)
        .acquire_owned()
        .await
        .map_err(|e| ApiError::internal(format!("Internal server error: {e}")))?;
    let worker = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        worker.orchestrator.extract(&file.data)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "extraction worker failed");
        ApiError::internal(format!("Internal server error: {e}"))
    })?;

    if !result.success {
        let reason = result
            .failure_reason
            .unwrap_or_else(|| "Extraction failed".to_string());
        return Err(ApiError::unprocessable(reason));
    }

    Ok(Json(ExtractResponse::from_result(result, None)))
}
