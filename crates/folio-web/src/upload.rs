use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use folio_core::extraction::has_pdf_extension;

use crate::models::ApiError;

/// An uploaded file with its data and metadata.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Parsed form fields from the multipart upload.
pub struct FormFields {
    pub file: Option<UploadedFile>,
    /// Raw `method` field, if sent.
    pub method: Option<String>,
    pub include_metadata: bool,
}

/// Why an upload was not accepted as a PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoFile,
    NoFilename,
    NotPdf,
}

impl Rejection {
    pub fn message(self) -> &'static str {
        match self {
            Rejection::NoFile => "No file provided",
            Rejection::NoFilename => "No file selected",
            Rejection::NotPdf => "Only PDF files are allowed",
        }
    }
}

impl FormFields {
    /// Take the uploaded file if it is present and named like a PDF.
    pub fn take_pdf(&mut self) -> Result<UploadedFile, Rejection> {
        let file = self.file.take().ok_or(Rejection::NoFile)?;
        if file.filename.is_empty() {
            return Err(Rejection::NoFilename);
        }
        if !has_pdf_extension(&file.filename) {
            return Err(Rejection::NotPdf);
        }
        Ok(file)
    }
}

/// Parse a multipart form upload into structured form fields.
///
/// The `file` part is capped at `max_bytes`; anything larger is a 413.
pub async fn parse_multipart(mut multipart: Multipart, max_bytes: usize) -> Result<FormFields, ApiError> {
    let mut file: Option<UploadedFile> = None;
    let mut method: Option<String> = None;
    let mut include_metadata = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read form field", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read file data", e))?
                    .to_vec();

                if data.len() > max_bytes {
                    return Err(ApiError::payload_too_large(format!(
                        "File exceeds the {max_bytes} byte upload limit"
                    )));
                }
                file = Some(UploadedFile { filename, data });
            }
            "method" => {
                let val = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Failed to read method", e))?;
                let val = val.trim().to_lowercase();
                if !val.is_empty() {
                    method = Some(val);
                }
            }
            "include_metadata" => {
                let val = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Failed to read include_metadata", e))?;
                include_metadata = val.trim().eq_ignore_ascii_case("true");
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    Ok(FormFields {
        file,
        method,
        include_metadata,
    })
}

fn multipart_error(context: &str, e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large("Upload exceeds the size limit")
    } else {
        ApiError::bad_request(format!("{context}: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(filename: Option<&str>) -> FormFields {
        FormFields {
            file: filename.map(|name| UploadedFile {
                filename: name.to_string(),
                data: b"%PDF-1.4".to_vec(),
            }),
            method: None,
            include_metadata: false,
        }
    }

    #[test]
    fn test_take_pdf_admission() {
        assert_eq!(fields(None).take_pdf().err(), Some(Rejection::NoFile));
        assert_eq!(fields(Some("")).take_pdf().err(), Some(Rejection::NoFilename));
        assert_eq!(fields(Some("notes.txt")).take_pdf().err(), Some(Rejection::NotPdf));
        assert_eq!(fields(Some("Scan.PDF")).take_pdf().unwrap().filename, "Scan.PDF");
    }
}
