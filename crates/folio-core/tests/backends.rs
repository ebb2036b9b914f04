//! Real backends against a small PDF built in memory with lopdf.
//!
//! The pdftotext backend is only exercised through the default cascade, where
//! a missing poppler install simply falls through to the next backend.

use folio_core::cascade::Orchestrator;
use folio_core::config::schema::PipelineConfig;
use folio_core::extraction::{read_metadata, LopdfExtractor, PdfExtractExtractor, PdfExtractor};
use folio_core::trace::AttemptOutcome;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

const TITLE_LINE: &str = "Quarterly Research Summary";
const BODY_LINE: &str = "The committee reviewed the budget in detail.";
const APPENDIX_LINE: &str = "Appendix with hiring details for the research division.";

fn text_block(font_size: i64, y: i64, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), font_size.into()]),
        Operation::new("Td", vec![72.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

fn add_page(doc: &mut Document, pages_id: ObjectId, resources_id: ObjectId, lines: &[&str]) -> ObjectId {
    let mut operations = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        operations.extend(text_block(12, 720 - 20 * i as i64, line));
    }
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    })
}

/// Three pages where page 2 repeats page 1 exactly, plus an info dictionary.
fn scanned_report_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let first = [TITLE_LINE, BODY_LINE];
    let kids: Vec<Object> = [&first[..], &first[..], &[APPENDIX_LINE][..]]
        .iter()
        .map(|lines| add_page(&mut doc, pages_id, resources_id, lines).into())
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => 3,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Research Summary Q3"),
        "Author" => Object::string_literal("Finance Committee"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn assert_report_pages(backend: &dyn PdfExtractor) {
    let pages = backend.extract_pages(&scanned_report_pdf()).unwrap();

    let numbers: Vec<usize> = pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![1, 2, 3], "{}", backend.backend_name());
    assert!(pages[0].raw_text.contains(TITLE_LINE));
    assert!(pages[0].raw_text.contains(BODY_LINE));
    assert_eq!(pages[0].raw_text.trim(), pages[1].raw_text.trim());
    assert!(pages[2].raw_text.contains(APPENDIX_LINE));
}

#[test]
fn lopdf_backend_reads_every_page() {
    assert_report_pages(&LopdfExtractor::new());
}

#[test]
fn pdf_extract_backend_reads_every_page() {
    assert_report_pages(&PdfExtractExtractor::new());
}

#[test]
fn metadata_reads_info_dictionary() {
    let metadata = read_metadata(&scanned_report_pdf()).unwrap();

    assert_eq!(metadata.page_count, 3);
    assert_eq!(metadata.title, "Research Summary Q3");
    assert_eq!(metadata.author, "Finance Committee");
    assert_eq!(metadata.subject, "");
}

#[test]
fn in_process_cascade_drops_duplicate_page() {
    let config = PipelineConfig {
        backends: vec!["pdf-extract".into(), "lopdf".into()],
        ..PipelineConfig::default()
    };
    let result = Orchestrator::new(config).unwrap().extract(&scanned_report_pdf());

    assert!(result.success);
    assert_eq!(result.backend_name, "pdf-extract");
    assert!(result.text.contains("--- Page 1 ---"));
    assert!(!result.text.contains("--- Page 2 ---"));
    assert!(result.text.contains("--- Page 3 ---"));
    assert_eq!(result.text.matches(BODY_LINE).count(), 1);

    let accepted = &result.attempts[0];
    assert_eq!(accepted.outcome, AttemptOutcome::Accepted);
    assert_eq!(accepted.pages_extracted, 3);
    assert_eq!(accepted.pages_kept, 2);
}

#[test]
fn extract_text_with_default_config() {
    let result = folio_core::extract_text(&scanned_report_pdf(), &PipelineConfig::default()).unwrap();

    assert!(result.success);
    assert!(!result.text.contains("--- Page 2 ---"));
    assert_eq!(result.text.matches(BODY_LINE).count(), 1);
    assert!(result.text.contains(APPENDIX_LINE));
    let accepted = result.attempts.last().unwrap();
    assert_eq!(accepted.outcome, AttemptOutcome::Accepted);
    assert_eq!(accepted.pages_kept, 2);
}

#[test]
fn extract_text_rejects_invalid_config() {
    let config = PipelineConfig {
        backends: vec!["pymupdf".into()],
        ..PipelineConfig::default()
    };
    assert!(folio_core::extract_text(&scanned_report_pdf(), &config).is_err());
}
