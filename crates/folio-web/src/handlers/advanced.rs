use axum::extract::{Multipart, State};
use axum::Json;
use folio_core::extraction::{read_metadata, BACKENDS};
use std::sync::Arc;

use crate::models::{ApiError, ExtractResponse};
use crate::state::AppState;
use crate::upload::{self, Rejection};

/// `method` value that runs the whole cascade.
const AUTO: &str = "auto";

/// Extraction with a caller-chosen backend and optional document metadata.
///
/// A forced backend skips the quality gate; any non-empty text is returned.
pub async fn extract_text_advanced(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, ApiError> {
    let mut fields = upload::parse_multipart(multipart, state.max_upload_bytes).await?;
    let file = fields.take_pdf().map_err(|r| match r {
        Rejection::NoFile => ApiError::bad_request(r.message()),
        Rejection::NoFilename | Rejection::NotPdf => ApiError::bad_request("Invalid file"),
    })?;
    let backend = forced_backend(fields.method.as_deref())?;
    let include_metadata = fields.include_metadata;

    tracing::info!(
        filename = %file.filename,
        method = backend.as_deref().unwrap_or(AUTO),
        include_metadata,
        "extracting"
    );
    let permit = Arc::clone(&state.extraction_slots)
        .acquire_owned()
        .await
        .map_err(|e| ApiError::internal(format!("Processing error: {e}")))?;
    let worker = Arc::clone(&state);
    let (result, metadata) = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        let metadata = if include_metadata {
            match read_metadata(&file.data) {
                Ok(m) => Some(m),
                Err(e) => {
                    tracing::warn!(error = %e, "could not extract metadata");
                    None
                }
            }
        } else {
            None
        };
        let result = match backend.as_deref() {
            Some(name) => worker.orchestrator.extract_with(&file.data, name),
            None => Ok(worker.orchestrator.extract(&file.data)),
        };
        (result, metadata)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "extraction worker failed");
        ApiError::internal(format!("Processing error: {e}"))
    })?;

    let result = result.map_err(|e| ApiError::internal(format!("Processing error: {e}")))?;
    if !result.success || result.text.trim().is_empty() {
        return Err(ApiError::unprocessable("Could not extract text from PDF"));
    }

    Ok(Json(ExtractResponse::from_result(result, metadata)))
}

/// `None` for the cascade, or the backend to force.
fn forced_backend(method: Option<&str>) -> Result<Option<String>, ApiError> {
    match method {
        None | Some(AUTO) => Ok(None),
        Some(name) if BACKENDS.contains(&name) => Ok(Some(name.to_string())),
        Some(other) => Err(ApiError::bad_request(format!(
            "Unknown method '{}'. Available: {}, {}",
            other,
            AUTO,
            BACKENDS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_backend() {
        assert_eq!(forced_backend(None).unwrap(), None);
        assert_eq!(forced_backend(Some("auto")).unwrap(), None);
        assert_eq!(forced_backend(Some("lopdf")).unwrap().as_deref(), Some("lopdf"));
        let err = forced_backend(Some("pymupdf")).unwrap_err();
        assert!(err.message.contains("pymupdf"));
    }
}
