//! Scanned-vs-text document classification.

use std::path::Path;

/// A text-based first page must yield at least this many extractable
/// characters; anything less smells like a scan.
const MIN_TEXT_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub scanned: bool,
    /// Characters extracted from the first page during probing.
    pub probe_chars: usize,
}

/// Probe the first page's text layer to decide the extraction route.
///
/// A probe failure classifies the document as scanned; when we cannot tell,
/// the OCR path is the one that still has a chance.
pub fn classify(path: &Path) -> Classification {
    match pdf_extract::extract_text_by_pages(path) {
        Ok(pages) => {
            let probe_chars = pages
                .first()
                .map(|text| text.trim().chars().count())
                .unwrap_or(0);
            Classification {
                scanned: probe_chars < MIN_TEXT_CHARS,
                probe_chars,
            }
        }
        Err(_) => Classification {
            scanned: true,
            probe_chars: 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_fails_safe_to_scanned() {
        let verdict = classify(Path::new("/definitely/not/there.pdf"));
        assert!(verdict.scanned);
        assert_eq!(verdict.probe_chars, 0);
    }
}
