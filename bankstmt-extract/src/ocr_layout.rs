//! Column inference for OCR-recognized transaction lines.
//!
//! OCR output keeps no geometry, so column boundaries are approximated as
//! character-offset ranges over a fixed-width layout. Lines that lost their
//! full-width spacing (dropped or shifted characters) are instead salvaged
//! with the same token decomposition the pattern detector uses.

use std::ops::Range;

use bankstmt_core::{Field, RawRow};

use crate::pattern::RowPattern;

/// Canonical field to half-open character-offset range, in fixed output
/// order. Derived per OCR batch; never persisted across batches.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    ranges: Vec<(Field, Range<usize>)>,
    header_hint: Option<String>,
}

impl ColumnSpec {
    /// Generic fixed-width approximation of common statement layouts.
    pub fn default_statement() -> Self {
        Self {
            ranges: vec![
                (Field::Date, 0..10),
                (Field::Description, 11..50),
                (Field::Amount, 51..65),
                (Field::Balance, 66..80),
            ],
            header_hint: None,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, &Range<usize>)> {
        self.ranges.iter().map(|(f, r)| (*f, r))
    }

    /// Largest end offset across all fields; lines shorter than this cannot
    /// be sliced positionally.
    pub fn max_end(&self) -> usize {
        self.ranges.iter().map(|(_, r)| r.end).max().unwrap_or(0)
    }

    /// Header line captured alongside the candidates, if any.
    pub fn header_hint(&self) -> Option<&str> {
        self.header_hint.as_deref()
    }
}

/// Derive a column spec from one OCR batch's candidate lines.
///
/// The line preceding the first candidate rides along as a header hint, but
/// the offsets themselves are currently always the fixed defaults; the hint
/// is not yet folded into inference. Known gap until header-aware refinement
/// lands.
pub fn infer_columns(candidates: &[String], header_hint: Option<&str>) -> ColumnSpec {
    let _ = candidates;
    ColumnSpec {
        header_hint: header_hint.map(str::to_string),
        ..ColumnSpec::default_statement()
    }
}

/// Parse one candidate line against the spec.
///
/// Lines shorter than the spec's maximum end offset were likely compressed
/// or misrecognized, so positional slicing would cut mid-field; those go
/// through token salvage instead. Full-width lines are sliced per field at
/// `[start, min(end, len))` in characters, with fields starting past the end
/// of the line left empty.
pub fn parse_row(line: &str, spec: &ColumnSpec, pattern: &RowPattern, page: usize) -> RawRow {
    let len = line.chars().count();

    if len < spec.max_end() {
        if let Some(parts) = pattern.decompose(line) {
            return parts.into_raw_row(page, 1);
        }
        // Candidate that no longer decomposes; hand back an empty row and
        // let the normalizer drop it.
        let mut row = RawRow::new(page, 1);
        for field in Field::ALL {
            row.push(field.name(), "");
        }
        return row;
    }

    let mut row = RawRow::new(page, 1);
    for (field, range) in spec.fields() {
        let value = if range.start < len {
            slice_chars(line, range.start, range.end.min(len))
        } else {
            String::new()
        };
        row.push(field.name(), value.trim());
    }
    row
}

fn slice_chars(line: &str, start: usize, end: usize) -> String {
    line.chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 80-char fixture laid out on the default offsets.
    fn full_width_line() -> String {
        let mut line = String::new();
        line.push_str(&pad("03/15/2024", 10));
        line.push(' ');
        line.push_str(&pad("GROCERY STORE PURCHASE", 39));
        line.push(' ');
        line.push_str(&pad("45.67", 14));
        line.push(' ');
        line.push_str(&pad("1,234.56", 14));
        line
    }

    fn pad(s: &str, width: usize) -> String {
        format!("{s:<width$}")
    }

    #[test]
    fn test_positional_slicing_on_full_width_line() {
        let line = full_width_line();
        assert!(line.chars().count() >= 80);

        let spec = ColumnSpec::default_statement();
        let pattern = RowPattern::new().unwrap();
        let row = parse_row(&line, &spec, &pattern, 1);

        assert_eq!(row.get("Date"), Some("03/15/2024"));
        assert_eq!(row.get("Description"), Some("GROCERY STORE PURCHASE"));
        assert_eq!(row.get("Amount"), Some("45.67"));
        assert_eq!(row.get("Balance"), Some("1,234.56"));
    }

    #[test]
    fn test_short_line_takes_salvage_path() {
        let spec = ColumnSpec::default_statement();
        let pattern = RowPattern::new().unwrap();
        let row = parse_row("03/15/2024 COFFEE 4.50 995.50", &spec, &pattern, 1);

        assert_eq!(row.get("Date"), Some("03/15/2024"));
        assert_eq!(row.get("Description"), Some("COFFEE"));
        assert_eq!(row.get("Amount"), Some("4.50"));
        assert_eq!(row.get("Balance"), Some("995.50"));
    }

    #[test]
    fn test_short_garbled_line_never_panics() {
        let spec = ColumnSpec::default_statement();
        let pattern = RowPattern::new().unwrap();
        let row = parse_row("garbled ocr noise", &spec, &pattern, 1);
        assert!(row.is_blank());
    }

    #[test]
    fn test_multibyte_text_slices_by_chars() {
        // 81 chars of non-ASCII must not land on a byte boundary panic.
        let line = "é".repeat(81);
        let spec = ColumnSpec::default_statement();
        let pattern = RowPattern::new().unwrap();
        let row = parse_row(&line, &spec, &pattern, 1);
        assert_eq!(row.get("Date"), Some("é".repeat(10).as_str()));
    }

    #[test]
    fn test_spec_max_end_and_hint() {
        let spec = infer_columns(&["x".to_string()], Some("Date  Amount"));
        assert_eq!(spec.max_end(), 80);
        assert_eq!(spec.header_hint(), Some("Date  Amount"));
    }

    #[test]
    fn test_inference_keeps_fixed_defaults() {
        let candidates = vec!["03/15/2024 COFFEE 4.50".to_string()];
        let spec = infer_columns(&candidates, None);
        assert_eq!(spec, ColumnSpec::default_statement());
    }
}
