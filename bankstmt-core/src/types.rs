//! Row and record types shared by every extraction strategy.

use serde::{Deserialize, Serialize};

/// The four canonical statement fields, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "amount")]
    Amount,
    #[serde(rename = "balance")]
    Balance,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Date, Field::Description, Field::Amount, Field::Balance];

    /// Canonical column label as it appears in the output schema.
    pub fn name(self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::Description => "Description",
            Field::Amount => "Amount",
            Field::Balance => "Balance",
        }
    }

    /// Map a source column label onto a canonical field.
    ///
    /// Matching is a case-insensitive exact match against the synonym set
    /// for each field (never a substring match), after trimming.
    pub fn from_label(label: &str) -> Option<Field> {
        let label = label.trim().to_lowercase();
        let synonyms: [(&[&str], Field); 4] = [
            (
                &["date", "transaction date", "trans date", "posted date"],
                Field::Date,
            ),
            (
                &[
                    "description",
                    "transaction",
                    "details",
                    "particulars",
                    "narration",
                ],
                Field::Description,
            ),
            (
                &[
                    "amount",
                    "transaction amount",
                    "debit",
                    "credit",
                    "withdrawal",
                    "deposit",
                ],
                Field::Amount,
            ),
            (
                &["balance", "closing balance", "running balance"],
                Field::Balance,
            ),
        ];

        for (names, field) in synonyms {
            if names.contains(&label.as_str()) {
                return Some(field);
            }
        }
        None
    }
}

/// One extracted row before schema normalization.
///
/// Column labels are whatever the extraction strategy saw (a header cell, a
/// canonical field name, or OCR guesswork); the label set may differ between
/// strategies. Page/table provenance rides along as typed metadata so it can
/// be dropped without ever appearing as an output column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// 1-based page the row came from.
    pub page: usize,
    /// 1-based table index within the page.
    pub table: usize,
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(page: usize, table: usize) -> Self {
        Self {
            page,
            table,
            cells: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.cells.push((label.into(), value.into()));
    }

    /// First cell with the given label, if any.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn cells(&self) -> &[(String, String)] {
        &self.cells
    }

    /// True when every cell is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.trim().is_empty())
    }

    /// Rewrite each label through `f`, preserving cell order.
    pub fn relabel(&mut self, mut f: impl FnMut(&str) -> String) {
        for (label, _) in &mut self.cells {
            *label = f(label);
        }
    }
}

/// A fully normalized transaction, ready for the serialization sink.
///
/// `date` holds an ISO `YYYY-MM-DD` string, or the original text when no
/// supported pattern matched. Amounts are always numeric; unparseable input
/// has already been collapsed to `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Balance")]
    pub balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_synonyms() {
        assert_eq!(Field::from_label("Trans Date"), Some(Field::Date));
        assert_eq!(Field::from_label("  DATE "), Some(Field::Date));
        assert_eq!(Field::from_label("Withdrawal"), Some(Field::Amount));
        assert_eq!(Field::from_label("Narration"), Some(Field::Description));
        assert_eq!(Field::from_label("Running Balance"), Some(Field::Balance));
    }

    #[test]
    fn test_label_match_is_exact_not_substring() {
        assert_eq!(Field::from_label("Date of Birth"), None);
        assert_eq!(Field::from_label("Reference"), None);
    }

    #[test]
    fn test_blank_row() {
        let mut row = RawRow::new(1, 1);
        row.push("Date", "  ");
        row.push("Amount", "");
        assert!(row.is_blank());

        row.push("Description", "COFFEE");
        assert!(!row.is_blank());
    }

    #[test]
    fn test_record_serializes_with_canonical_labels() {
        let record = Record {
            date: "2024-03-15".to_string(),
            description: "Grocery Store".to_string(),
            amount: 45.67,
            balance: 1234.56,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Date"], "2024-03-15");
        assert_eq!(json["Amount"], 45.67);
    }
}
