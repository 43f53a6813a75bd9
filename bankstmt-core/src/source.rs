//! Contracts for the external document collaborators.
//!
//! PDF parsing, table-grid detection, rasterization and OCR are someone
//! else's job; the pipeline only sees these traits. Backends are free to
//! return empty grid/rule sets when they have no geometry to offer; the
//! cascade treats that as "try the next strategy", not an error.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A table already delimited by the document's own grid lines.
///
/// `cells` is row-major with the header row first, exactly as the backend
/// detected it. No cleanup has happened yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGrid {
    pub cells: Vec<Vec<String>>,
}

/// One drawn line segment, reduced to the vertical coordinates of its two
/// endpoints. A true horizontal rule has `y0 ≈ y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleSegment {
    pub y0: f64,
    pub y1: f64,
}

/// Read access to one document page.
pub trait PageAccess {
    /// Full recognized text of the page, `None` when the page has no text
    /// layer.
    fn text(&self) -> Result<Option<String>>;

    /// Native table grids detected on the page, header row first.
    fn table_grids(&self) -> Result<Vec<TableGrid>>;

    /// Drawn line segments, for rule-band row splitting.
    fn rule_segments(&self) -> Result<Vec<RuleSegment>>;

    /// Text of the full-width horizontal band between two y coordinates.
    fn band_text(&self, top: f64, bottom: f64) -> Result<Option<String>>;
}

/// Rasterizing OCR backend: one recognized-text string per page.
pub trait OcrEngine {
    fn page_texts(&self, document: &Path) -> Result<Vec<String>>;
}
