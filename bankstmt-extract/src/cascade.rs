//! Ordered fallback cascade over a page's extraction strategies.
//!
//! Strategies are plain values returning `Extraction`, tried in sequence;
//! the first one to produce rows wins. Failure to apply is data, not an
//! exception.

use anyhow::Result;
use bankstmt_core::{Event, PageAccess, RawRow, Reporter, Stage, TableGrid};

use crate::ocr_layout::{infer_columns, parse_row};
use crate::pattern::{self, RowPattern};
use crate::ruled;

/// Outcome of one strategy on one page.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// At least one row recovered.
    Rows(Vec<RawRow>),
    /// Strategy not applicable; the reason is surfaced to the reporter.
    Nothing(String),
}

impl Extraction {
    fn from_rows(rows: Vec<RawRow>, empty_reason: &str) -> Self {
        if rows.is_empty() {
            Extraction::Nothing(empty_reason.to_string())
        } else {
            Extraction::Rows(rows)
        }
    }
}

/// Recover rows from one text-layer page.
///
/// Strategy order: native table grids, then ruled bands, then pattern rows.
/// A page where everything comes up empty reports `PageEmpty` and yields no
/// rows; it never errors the document.
pub fn extract_page(
    page: &impl PageAccess,
    page_no: usize,
    reporter: &dyn Reporter,
) -> Result<Vec<RawRow>> {
    if let Some(rows) = settle(grid_rows(page, page_no), Stage::NativeGrid, page_no, reporter) {
        return Ok(rows);
    }
    if let Some(rows) = settle(
        ruled::extract_ruled_rows(page, page_no),
        Stage::RuledBands,
        page_no,
        reporter,
    ) {
        return Ok(rows);
    }
    if let Some(rows) = settle(
        pattern_rows(page, page_no)?,
        Stage::PatternRows,
        page_no,
        reporter,
    ) {
        return Ok(rows);
    }

    reporter.event(Event::PageEmpty { page: page_no });
    Ok(Vec::new())
}

/// Report a strategy's outcome; rows mean the cascade stops here.
fn settle(
    outcome: Extraction,
    stage: Stage,
    page_no: usize,
    reporter: &dyn Reporter,
) -> Option<Vec<RawRow>> {
    match outcome {
        Extraction::Rows(rows) => {
            reporter.event(Event::PageExtracted {
                page: page_no,
                stage,
                rows: rows.len(),
            });
            Some(rows)
        }
        Extraction::Nothing(reason) => {
            reporter.event(Event::StageSkipped {
                page: page_no,
                stage,
                reason,
            });
            None
        }
    }
}

/// Last text fallback: date+amount pattern matching over the page text.
fn pattern_rows(page: &impl PageAccess, page_no: usize) -> Result<Extraction> {
    let text = match page.text() {
        Ok(Some(text)) => text,
        Ok(None) => return Ok(Extraction::Nothing("page has no text layer".to_string())),
        Err(e) => return Ok(Extraction::Nothing(format!("text lookup failed: {e}"))),
    };

    let rows = pattern::extract_rows(&text, page_no)?;
    Ok(Extraction::from_rows(
        rows,
        "no transaction-shaped lines found",
    ))
}

/// Recover rows from one OCR page's recognized text: pattern detection to
/// find candidates, then column inference to structure them.
pub fn extract_ocr_page(
    text: &str,
    page_no: usize,
    reporter: &dyn Reporter,
) -> Result<Vec<RawRow>> {
    let (candidates, header_hint) = pattern::candidate_lines(text)?;
    if candidates.is_empty() {
        reporter.event(Event::StageSkipped {
            page: page_no,
            stage: Stage::OcrColumns,
            reason: "no transaction-shaped lines recognized".to_string(),
        });
        reporter.event(Event::PageEmpty { page: page_no });
        return Ok(Vec::new());
    }

    let spec = infer_columns(&candidates, header_hint.as_deref());
    let row_pattern = RowPattern::new()?;
    let rows: Vec<RawRow> = candidates
        .iter()
        .map(|line| parse_row(line, &spec, &row_pattern, page_no))
        .collect();

    reporter.event(Event::PageExtracted {
        page: page_no,
        stage: Stage::OcrColumns,
        rows: rows.len(),
    });
    Ok(rows)
}

/// Pass native table grids through: header row labels the rest.
fn grid_rows(page: &impl PageAccess, page_no: usize) -> Extraction {
    let grids = match page.table_grids() {
        Ok(grids) => grids,
        Err(e) => return Extraction::Nothing(format!("grid lookup failed: {e}")),
    };
    if grids.is_empty() {
        return Extraction::Nothing("no native table grid detected".to_string());
    }

    let mut rows = Vec::new();
    for (table_idx, grid) in grids.iter().enumerate() {
        rows.extend(grid_table_rows(grid, page_no, table_idx + 1));
    }
    Extraction::from_rows(rows, "native grids were empty")
}

fn grid_table_rows(grid: &TableGrid, page_no: usize, table: usize) -> Vec<RawRow> {
    let Some((header, data)) = grid.cells.split_first() else {
        return Vec::new();
    };

    data.iter()
        .map(|cells| {
            let mut row = RawRow::new(page_no, table);
            for (label, value) in header.iter().zip(cells) {
                row.push(label.trim(), value);
            }
            row
        })
        .collect()
}
