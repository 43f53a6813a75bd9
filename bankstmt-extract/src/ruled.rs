//! Ruled-band table recovery: horizontal rules as row separators.
//!
//! Engaged when a page has no native table grid but does carry drawn lines.
//! Each pair of adjacent horizontal rules bounds one row band; the band's
//! text is column-split and the first band becomes the header.

use bankstmt_core::{PageAccess, RawRow};

use crate::cascade::Extraction;
use crate::columns::split_columns;

/// Endpoints further apart than this vertically are not a horizontal rule.
const HORIZONTAL_TOLERANCE: f64 = 1.0;

/// At least header band + one data band, so three rules.
const MIN_RULES: usize = 3;

/// Recover a table from a page's horizontal rules.
///
/// Best-effort stage in the cascade: lookup or crop failures come back as
/// `Nothing` with the reason, never as an error.
pub fn extract_ruled_rows(page: &impl PageAccess, page_no: usize) -> Extraction {
    let segments = match page.rule_segments() {
        Ok(segments) => segments,
        Err(e) => return Extraction::Nothing(format!("rule lookup failed: {e}")),
    };

    let mut rule_ys: Vec<f64> = segments
        .iter()
        .filter(|s| (s.y0 - s.y1).abs() < HORIZONTAL_TOLERANCE)
        .map(|s| s.y0)
        .collect();
    rule_ys.sort_by(f64::total_cmp);

    if rule_ys.len() < MIN_RULES {
        return Extraction::Nothing(format!(
            "{} horizontal rules, need at least {MIN_RULES}",
            rule_ys.len()
        ));
    }

    let mut bands: Vec<Vec<String>> = Vec::new();
    for pair in rule_ys.windows(2) {
        match page.band_text(pair[0], pair[1]) {
            Ok(Some(text)) if !text.trim().is_empty() => bands.push(split_columns(&text)),
            Ok(_) => {}
            Err(e) => return Extraction::Nothing(format!("band crop failed: {e}")),
        }
    }

    if bands.len() < 2 {
        return Extraction::Nothing("rules bounded no data rows".to_string());
    }

    let header = bands.remove(0);
    let rows = bands
        .into_iter()
        .map(|cells| {
            let mut row = RawRow::new(page_no, 1);
            for (label, value) in header.iter().zip(cells) {
                row.push(label.trim(), value);
            }
            row
        })
        .collect();

    Extraction::Rows(rows)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use bankstmt_core::{RuleSegment, TableGrid};

    use super::*;

    /// In-memory page: rules plus banded text keyed by y ranges.
    struct RuledPage {
        segments: Vec<RuleSegment>,
        bands: Vec<(f64, f64, &'static str)>,
    }

    impl PageAccess for RuledPage {
        fn text(&self) -> Result<Option<String>> {
            Ok(None)
        }

        fn table_grids(&self) -> Result<Vec<TableGrid>> {
            Ok(Vec::new())
        }

        fn rule_segments(&self) -> Result<Vec<RuleSegment>> {
            Ok(self.segments.clone())
        }

        fn band_text(&self, top: f64, bottom: f64) -> Result<Option<String>> {
            Ok(self
                .bands
                .iter()
                .find(|(t, b, _)| *t == top && *b == bottom)
                .map(|(_, _, text)| text.to_string()))
        }
    }

    fn rule(y: f64) -> RuleSegment {
        RuleSegment { y0: y, y1: y + 0.2 }
    }

    #[test]
    fn test_recovers_header_and_rows() {
        let page = RuledPage {
            // Deliberately unsorted, with one slanted segment to discard.
            segments: vec![
                rule(300.0),
                rule(100.0),
                RuleSegment { y0: 150.0, y1: 260.0 },
                rule(200.0),
            ],
            bands: vec![
                (100.0, 200.0, "Date    Description    Amount"),
                (200.0, 300.0, "01/02/2024    COFFEE    4.50"),
            ],
        };

        let Extraction::Rows(rows) = extract_ruled_rows(&page, 1) else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Date"), Some("01/02/2024"));
        assert_eq!(rows[0].get("Description"), Some("COFFEE"));
        assert_eq!(rows[0].get("Amount"), Some("4.50"));
    }

    #[test]
    fn test_too_few_rules_is_nothing() {
        let page = RuledPage {
            segments: vec![rule(100.0), rule(200.0)],
            bands: vec![],
        };
        assert!(matches!(
            extract_ruled_rows(&page, 1),
            Extraction::Nothing(_)
        ));
    }

    #[test]
    fn test_slanted_segments_do_not_count() {
        let page = RuledPage {
            segments: vec![
                rule(100.0),
                rule(200.0),
                RuleSegment { y0: 300.0, y1: 310.0 },
            ],
            bands: vec![],
        };
        // Two true horizontals only.
        assert!(matches!(
            extract_ruled_rows(&page, 1),
            Extraction::Nothing(_)
        ));
    }

    #[test]
    fn test_header_only_is_nothing() {
        let page = RuledPage {
            segments: vec![rule(100.0), rule(200.0), rule(300.0)],
            bands: vec![(100.0, 200.0, "Date    Amount")],
        };
        assert!(matches!(
            extract_ruled_rows(&page, 1),
            Extraction::Nothing(_)
        ));
    }

    #[test]
    fn test_ragged_rows_truncate_to_header() {
        let page = RuledPage {
            segments: vec![rule(0.0), rule(1.0), rule(2.0)],
            bands: vec![
                (0.0, 1.0, "Date    Amount"),
                (1.0, 2.0, "01/02/2024    4.50    EXTRA"),
            ],
        };
        let Extraction::Rows(rows) = extract_ruled_rows(&page, 1) else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].cells().len(), 2);
    }
}
