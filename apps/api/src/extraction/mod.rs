//! Document Text Extractor — turns an uploaded PDF into plain text.
//!
//! Pages are read in document order; pages with no extractable text (scanned
//! images, blank separators) are skipped. A document where every page is
//! empty is rejected outright.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::debug;

/// Leading bytes of every PDF file.
pub const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document could not be parsed as PDF: {0}")]
    Malformed(String),

    #[error("no text found in document ({pages} page(s) scanned)")]
    NoText { pages: usize },
}

/// Cheap content sniff used by the upload boundary before extraction runs.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Extracts the text of a PDF held in memory.
///
/// CPU-bound; async callers should run it on the blocking pool.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs instead of returning Err.
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| ExtractionError::Malformed("parser aborted on malformed input".to_string()))?
    .map_err(|e| ExtractionError::Malformed(e.to_string()))?;

    debug!("PDF parsed: {} page(s)", pages.len());
    join_pages(pages)
}

/// Concatenates page fragments in order, dropping pages that carry no text.
pub fn join_pages<I, S>(pages: I) -> Result<String, ExtractionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanned = 0;
    let mut text = String::new();

    for page in pages {
        scanned += 1;
        let page = page.as_ref();
        if page.trim().is_empty() {
            continue;
        }
        text.push_str(page);
    }

    if text.is_empty() {
        return Err(ExtractionError::NoText { pages: scanned });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_preserves_order_and_skips_empty() {
        let text = join_pages(["Page one. ", "", "   \n", "Page three."]).unwrap();
        assert_eq!(text, "Page one. Page three.");
    }

    #[test]
    fn test_join_pages_all_empty_fails() {
        let err = join_pages(["", " ", "\n\n"]).unwrap_err();
        assert!(matches!(err, ExtractionError::NoText { pages: 3 }));
    }

    #[test]
    fn test_join_pages_no_pages_fails() {
        let err = join_pages(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ExtractionError::NoText { pages: 0 }));
    }

    #[test]
    fn test_single_text_page_is_returned_verbatim() {
        let text = join_pages(["John Doe, 5 years experience"]).unwrap();
        assert_eq!(text, "John Doe, 5 years experience");
    }

    #[test]
    fn test_garbage_bytes_are_malformed() {
        let err = extract_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed(_)));
    }

    #[test]
    fn test_multi_page_pdf_skips_empty_page_and_keeps_order() {
        let pdf = crate::testing::pdf_with_pages(&["John Doe, 5 years", "", "experience"]);
        assert!(looks_like_pdf(&pdf));

        let text = extract_text(&pdf).unwrap();
        let name = text.find("John Doe, 5 years").expect("first page text");
        let rest = text.find("experience").expect("third page text");
        assert!(name < rest);
    }

    #[test]
    fn test_pdf_with_only_empty_pages_has_no_text() {
        let pdf = crate::testing::pdf_with_pages(&["", ""]);
        let err = extract_text(&pdf).unwrap_err();
        assert!(matches!(err, ExtractionError::NoText { .. }));
    }

    #[test]
    fn test_looks_like_pdf() {
        assert!(looks_like_pdf(b"%PDF-1.7\n..."));
        assert!(!looks_like_pdf(b"PK\x03\x04"));
        assert!(!looks_like_pdf(b""));
    }
}
