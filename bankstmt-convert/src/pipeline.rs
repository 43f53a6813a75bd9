//! Document conversion: classify, extract per page, normalize, export.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bankstmt_core::{normalize_rows, Event, OcrEngine, PageAccess, RawRow, Record, Reporter};
use bankstmt_extract::{extract_ocr_page, extract_page};

use crate::export::{self, OutputFormat};
use crate::ocr::TesseractOcr;
use crate::pdf::PdfDocument;
use crate::scan;

/// One statement conversion, input to output file.
pub struct Converter {
    input: PathBuf,
    output: PathBuf,
    format: OutputFormat,
}

impl Converter {
    /// A missing input path is fatal here, before any extraction starts.
    /// The output's parent directory is created up front.
    pub fn new(input: PathBuf, output: PathBuf, format: OutputFormat) -> Result<Self> {
        if !input.exists() {
            anyhow::bail!("input PDF not found: {}", input.display());
        }

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating output directory {}", parent.display()))?;
            }
        }

        Ok(Self {
            input,
            output,
            format,
        })
    }

    /// Run the conversion.
    ///
    /// `Ok(Some(path))` on success, `Ok(None)` when the document produced no
    /// records at all (a distinct outcome, not an error). Collaborator
    /// crashes (unreadable document on the text route, OCR engine failure)
    /// propagate as errors.
    pub fn convert(&self, reporter: &dyn Reporter) -> Result<Option<PathBuf>> {
        let verdict = scan::classify(&self.input);
        reporter.event(Event::DocumentClassified {
            scanned: verdict.scanned,
            probe_chars: verdict.probe_chars,
        });

        let rows = if verdict.scanned {
            let engine = TesseractOcr::new(ocr_work_dir());
            let texts = engine
                .page_texts(&self.input)
                .with_context(|| format!("ocr failed for {}", self.input.display()))?;
            extract_ocr_texts(&texts, reporter)
        } else {
            let document = PdfDocument::open(&self.input)?;
            extract_text_pages(document.pages(), reporter)
        };

        let records = normalize_rows(rows, reporter);
        if records.is_empty() {
            return Ok(None);
        }

        self.export(&records, reporter)?;
        Ok(Some(self.output.clone()))
    }

    fn export(&self, records: &[Record], reporter: &dyn Reporter) -> Result<()> {
        export::write_records(records, &self.output, self.format)?;
        reporter.event(Event::Exported {
            path: self.output.clone(),
            rows: records.len(),
        });
        Ok(())
    }
}

/// Run the text-page cascade over every page, in order.
///
/// Pages are isolated: one page erroring or coming up empty never stops the
/// rest; its rows are simply missing from the accumulated set.
pub fn extract_text_pages<P: PageAccess>(pages: &[P], reporter: &dyn Reporter) -> Vec<RawRow> {
    let mut all_rows = Vec::new();
    for (i, page) in pages.iter().enumerate() {
        let page_no = i + 1;
        match extract_page(page, page_no, reporter) {
            Ok(rows) => all_rows.extend(rows),
            Err(e) => reporter.event(Event::PageFailed {
                page: page_no,
                reason: e.to_string(),
            }),
        }
    }
    all_rows
}

/// Run the OCR row pipeline over every recognized page text, in order, with
/// the same per-page isolation as the text route.
pub fn extract_ocr_texts(texts: &[String], reporter: &dyn Reporter) -> Vec<RawRow> {
    let mut all_rows = Vec::new();
    for (i, text) in texts.iter().enumerate() {
        let page_no = i + 1;
        match extract_ocr_page(text, page_no, reporter) {
            Ok(rows) => all_rows.extend(rows),
            Err(e) => reporter.event(Event::PageFailed {
                page: page_no,
                reason: e.to_string(),
            }),
        }
    }
    all_rows
}

fn ocr_work_dir() -> PathBuf {
    std::env::temp_dir().join(format!("bankstmt-ocr-{}", std::process::id()))
}
