//! Schema normalization: merge every strategy's raw rows into one canonical
//! record set.

use std::collections::BTreeSet;

use crate::normalize::{normalize_amount, normalize_date};
use crate::report::{Event, Reporter};
use crate::types::{Field, RawRow, Record};

/// Merge raw rows (already in source page/line order) into canonical records.
///
/// Blank rows are dropped, column labels are rewritten through the synonym
/// tables, and per-field normalization is applied to whichever canonical
/// columns are actually present. Rows never get re-sorted, and page/table
/// provenance never reaches the output.
pub fn normalize_rows(rows: Vec<RawRow>, reporter: &dyn Reporter) -> Vec<Record> {
    let mut rows: Vec<RawRow> = rows.into_iter().filter(|r| !r.is_blank()).collect();

    let mut unmapped = BTreeSet::new();
    for row in &mut rows {
        row.relabel(|label| canonical_label(label, &mut unmapped));
    }
    for label in unmapped {
        reporter.event(Event::ColumnUnmapped { label });
    }

    for field in Field::ALL {
        let present = rows.iter().any(|r| r.get(field.name()).is_some());
        if !rows.is_empty() && !present {
            reporter.event(Event::ColumnMissing { field });
        }
    }

    rows.iter().map(|row| build_record(row, reporter)).collect()
}

fn canonical_label(label: &str, unmapped: &mut BTreeSet<String>) -> String {
    match Field::from_label(label) {
        Some(field) => field.name().to_string(),
        None => {
            let label = label.trim().to_string();
            unmapped.insert(label.clone());
            label
        }
    }
}

fn build_record(row: &RawRow, reporter: &dyn Reporter) -> Record {
    let date = match row.get(Field::Date.name()) {
        Some(raw) => match normalize_date(raw) {
            Some(iso) => iso,
            None => {
                reporter.event(Event::DateUnparsed {
                    raw: raw.to_string(),
                });
                raw.to_string()
            }
        },
        None => String::new(),
    };

    let description = row
        .get(Field::Description.name())
        .map(|d| d.trim().to_string())
        .unwrap_or_default();

    Record {
        date,
        description,
        amount: numeric_field(row, Field::Amount, reporter),
        balance: numeric_field(row, Field::Balance, reporter),
    }
}

fn numeric_field(row: &RawRow, field: Field, reporter: &dyn Reporter) -> f64 {
    let Some(raw) = row.get(field.name()) else {
        return 0.0;
    };
    match normalize_amount(raw) {
        Some(value) => value,
        None => {
            reporter.event(Event::AmountUnparsed {
                raw: raw.to_string(),
            });
            0.0
        }
    }
}
