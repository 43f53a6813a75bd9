//! Pattern-based transaction row detection.
//!
//! A line is a transaction candidate iff it carries at least one date-shaped
//! token and one currency-amount token. Works as the last text-PDF fallback
//! and as the first OCR stage.
//!
//! Expected shape:
//!   03/15/2024 Grocery Store $45.67 $1,234.56

use anyhow::Result;
use bankstmt_core::{Field, RawRow};
use regex::Regex;

/// Compiled token patterns, built once per page of lines.
pub struct RowPattern {
    date: Regex,
    amount: Regex,
}

/// One decomposed candidate line. Values are verbatim token text; nothing is
/// normalized yet.
#[derive(Debug, Clone, PartialEq)]
pub struct LineParts {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub balance: String,
}

impl LineParts {
    pub fn into_raw_row(self, page: usize, table: usize) -> RawRow {
        let mut row = RawRow::new(page, table);
        row.push(Field::Date.name(), self.date);
        row.push(Field::Description.name(), self.description);
        row.push(Field::Amount.name(), self.amount);
        row.push(Field::Balance.name(), self.balance);
        row
    }
}

impl RowPattern {
    pub fn new() -> Result<Self> {
        Ok(Self {
            date: Regex::new(r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}")?,
            amount: Regex::new(r"\$?\s*\d{1,3}(?:,\d{3})*\.\d{2}")?,
        })
    }

    pub fn is_candidate(&self, line: &str) -> bool {
        self.date.is_match(line) && self.amount.is_match(line)
    }

    /// Decompose a candidate line into (date, description, amount, balance).
    ///
    /// The date is the first date token. Amount tokens are collected left to
    /// right: with two or more, the second-to-last is the amount and the last
    /// is the running balance (earlier numbers tend to be reference figures);
    /// with exactly one, it is the amount and the balance stays empty. The
    /// description is the span strictly between the date token and the
    /// designated amount token, or empty when that span is non-positive.
    ///
    /// Non-candidate lines return `None`; this never fails.
    pub fn decompose(&self, line: &str) -> Option<LineParts> {
        let date = self.date.find(line)?;
        let amounts: Vec<_> = self.amount.find_iter(line).collect();
        let designated = match amounts.len() {
            0 => return None,
            1 => &amounts[0],
            n => &amounts[n - 2],
        };
        // The optional `\s*` after the currency sign means a token can match
        // with leading whitespace; trim it off the stored value.
        let balance = if amounts.len() >= 2 {
            amounts[amounts.len() - 1].as_str().trim().to_string()
        } else {
            String::new()
        };

        let description = if designated.start() > date.end() {
            line[date.end()..designated.start()].trim().to_string()
        } else {
            String::new()
        };

        Some(LineParts {
            date: date.as_str().to_string(),
            description,
            amount: designated.as_str().trim().to_string(),
            balance,
        })
    }
}

/// Scan page text line by line and decompose every candidate into a raw row.
/// Lines that match nothing are skipped; order is preserved.
pub fn extract_rows(text: &str, page: usize) -> Result<Vec<RawRow>> {
    let pattern = RowPattern::new()?;

    let mut rows = Vec::new();
    for line in text.lines() {
        if let Some(parts) = pattern.decompose(line) {
            rows.push(parts.into_raw_row(page, 1));
        }
    }
    Ok(rows)
}

/// Candidate lines of one OCR page, plus the line immediately preceding the
/// first candidate as a header-label hint. Lines are trimmed and blanks are
/// dropped before candidacy is judged.
pub fn candidate_lines(text: &str) -> Result<(Vec<String>, Option<String>)> {
    let pattern = RowPattern::new()?;
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut candidates = Vec::new();
    let mut header_hint = None;
    for (i, line) in lines.iter().enumerate() {
        if pattern.is_candidate(line) {
            if candidates.is_empty() && i > 0 {
                header_hint = Some(lines[i - 1].to_string());
            }
            candidates.push(line.to_string());
        }
    }
    Ok((candidates, header_hint))
}
