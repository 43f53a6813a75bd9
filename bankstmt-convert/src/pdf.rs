//! Text-layer document backend over pdf-extract.

use std::path::Path;

use anyhow::{Context, Result};
use bankstmt_core::{PageAccess, RuleSegment, TableGrid};

/// A text-based PDF, fully extracted up front, one entry per page.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pages: Vec<PdfPage>,
}

/// One page of extracted text.
///
/// pdf-extract surfaces the text layer only (no drawn-line geometry, no
/// native grid detection, no region cropping), so this backend reports empty
/// grid and rule sets and the cascade lands on the pattern detector.
#[derive(Debug, Clone)]
pub struct PdfPage {
    text: Option<String>,
}

impl PdfDocument {
    pub fn open(path: &Path) -> Result<Self> {
        let page_texts = pdf_extract::extract_text_by_pages(path)
            .map_err(|e| anyhow::anyhow!("pdf text extraction failed: {e}"))
            .with_context(|| format!("reading {}", path.display()))?;

        let pages = page_texts
            .into_iter()
            .map(|text| PdfPage {
                text: if text.trim().is_empty() { None } else { Some(text) },
            })
            .collect();

        Ok(Self { pages })
    }

    pub fn pages(&self) -> &[PdfPage] {
        &self.pages
    }
}

impl PageAccess for PdfPage {
    fn text(&self) -> Result<Option<String>> {
        Ok(self.text.clone())
    }

    fn table_grids(&self) -> Result<Vec<TableGrid>> {
        Ok(Vec::new())
    }

    fn rule_segments(&self) -> Result<Vec<RuleSegment>> {
        Ok(Vec::new())
    }

    fn band_text(&self, _top: f64, _bottom: f64) -> Result<Option<String>> {
        Ok(None)
    }
}
