use crate::error::FolioError;
use crate::extraction::PdfExtractor;
use crate::model::{DocumentMetadata, Page};
use ::lopdf::{Dictionary, Document, Object};

/// Minimal fallback backend: lopdf's content-stream text operator walk.
///
/// A page whose content stream cannot be decoded yields empty text rather
/// than failing the whole document.
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        LopdfExtractor
    }
}

impl Default for LopdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Page>, FolioError> {
        let doc = Document::load_mem(pdf_bytes).map_err(|e| FolioError::Backend {
            backend: self.backend_name().to_string(),
            reason: e.to_string(),
        })?;

        let mut pages = Vec::new();
        for page_number in doc.get_pages().into_keys() {
            let text = match doc.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(page = page_number, error = %e, "lopdf could not decode page");
                    String::new()
                }
            };
            pages.push(Page::new(page_number as usize, text));
        }

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "lopdf"
    }
}

/// Read page count and the document information dictionary.
///
/// Missing entries come back as empty strings; only an unreadable document is
/// an error.
pub fn read_metadata(pdf_bytes: &[u8]) -> Result<DocumentMetadata, FolioError> {
    let doc = Document::load_mem(pdf_bytes).map_err(|e| FolioError::Metadata(e.to_string()))?;

    let mut metadata = DocumentMetadata {
        page_count: doc.get_pages().len(),
        ..DocumentMetadata::default()
    };

    let Some(info) = info_dictionary(&doc) else {
        return Ok(metadata);
    };

    metadata.title = text_entry(info, b"Title");
    metadata.author = text_entry(info, b"Author");
    metadata.subject = text_entry(info, b"Subject");
    metadata.creator = text_entry(info, b"Creator");
    metadata.producer = text_entry(info, b"Producer");
    metadata.creation_date = text_entry(info, b"CreationDate");
    metadata.modification_date = text_entry(info, b"ModDate");

    Ok(metadata)
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        other => other.as_dict().ok(),
    }
}

fn text_entry(dict: &Dictionary, key: &[u8]) -> String {
    dict.get(key)
        .ok()
        .and_then(|obj| obj.as_str().ok())
        .map(decode_pdf_string)
        .unwrap_or_default()
}

/// PDF text strings are either UTF-16BE with a byte order mark or a
/// single-byte encoding close enough to Latin-1 for metadata fields.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE_u8, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    if let Ok(utf8) = std::str::from_utf8(bytes) {
        return utf8.to_string();
    }
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf16_string() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_pdf_string(&bytes), "Hi");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        assert_eq!(decode_pdf_string(&[0x43, 0x61, 0x66, 0xE9]), "Café");
    }

    #[test]
    fn test_read_metadata_rejects_garbage() {
        assert!(matches!(
            read_metadata(b"not a pdf"),
            Err(FolioError::Metadata(_))
        ));
    }

    #[test]
    fn test_lopdf_backend_rejects_garbage() {
        assert!(LopdfExtractor::new().extract_pages(b"not a pdf").is_err());
    }
}
