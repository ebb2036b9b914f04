use folio_core::cascade::ExtractionResult;
use folio_core::error::FolioError;
use folio_core::model::{DocumentMetadata, TextStats};
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    result: &'a ExtractionResult,
    #[serde(flatten)]
    stats: TextStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a DocumentMetadata>,
}

pub fn render(result: &ExtractionResult, metadata: Option<&DocumentMetadata>) -> Result<String, FolioError> {
    let report = Report {
        result,
        stats: result.stats(),
        metadata,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
