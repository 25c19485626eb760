// src/services/extract.rs

//! Per-page text extraction from downloaded gazettes.

use std::path::Path;

use lopdf::Document;

use crate::error::{AppError, Result};

/// Extract the text of every page, index 0 holding page 1.
///
/// Pages without extractable text yield empty strings. Any parser failure
/// fails the whole document, wrapped with the offending path so the
/// orchestrator can report which document it gave up on.
pub fn extract_pages(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(AppError::DocumentMissing(path.display().to_string()));
    }

    let doc =
        Document::load(path).map_err(|e| AppError::extract(path.display().to_string(), e))?;

    let mut pages = Vec::new();
    for (page_num, _page_id) in doc.get_pages() {
        let text = doc
            .extract_text(&[page_num])
            .map_err(|e| AppError::extract(path.display().to_string(), e))?;
        pages.push(text);
    }
    Ok(pages)
}

/// Build a small in-memory PDF, one page per entry.
///
/// Fixture for the tests here and in the pipeline tests.
#[cfg(test)]
pub(crate) fn sample_pdf(page_texts: &[&str]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in page_texts {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 750.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode page content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize sample pdf");
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extract_missing_file() {
        let tmp = TempDir::new().unwrap();
        let result = extract_pages(&tmp.path().join("gone.pdf"));
        assert!(matches!(result, Err(AppError::DocumentMissing(_))));
    }

    #[test]
    fn test_extract_rejects_non_pdf() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("junk.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let result = extract_pages(&path);
        assert!(matches!(result, Err(AppError::Extract { .. })));
    }

    #[test]
    fn test_extract_reads_each_page() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("two-pages.pdf");
        std::fs::write(&path, sample_pdf(&["first page text", "second page text"])).unwrap();

        let pages = extract_pages(&path).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("first page text"));
        assert!(pages[1].contains("second page text"));
    }
}
