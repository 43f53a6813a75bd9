//! bankstmt-extract: table-recovery strategies for statement pages.
//!
//! A page either hands us a native table grid, or we fall back through
//! heuristics: ruled-band splitting, then date+amount pattern matching.
//! OCR text gets the pattern detector plus fixed-offset column slicing.

pub mod cascade;
pub mod columns;
pub mod ocr_layout;
pub mod pattern;
pub mod ruled;

pub use cascade::{extract_ocr_page, extract_page, Extraction};
pub use columns::split_columns;
pub use ocr_layout::{infer_columns, parse_row, ColumnSpec};
pub use pattern::{LineParts, RowPattern};
