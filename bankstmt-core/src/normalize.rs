//! Date and amount normalization for extracted statement cells.

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Every date layout we accept, tried in order; first parse wins.
///
/// Covers {day-month-year, month-day-year, year-month-day} orders with `/`,
/// `-` and `.` separators, in 4-digit and then 2-digit year variants. The
/// 2-digit patterns use chrono's `%y` pivot (00-68 maps to 20xx).
const DATE_FORMATS: [&str; 18] = [
    "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d",
    "%d-%m-%Y", "%m-%d-%Y", "%Y-%m-%d",
    "%d.%m.%Y", "%m.%d.%Y", "%Y.%m.%d",
    "%d/%m/%y", "%m/%d/%y", "%y/%m/%d",
    "%d-%m-%y", "%m-%d-%y", "%y-%m-%d",
    "%d.%m.%y", "%m.%d.%y", "%y.%m.%d",
];

/// Normalize a date cell to ISO `YYYY-MM-DD`.
///
/// Tries the explicit format list first, then falls back to pulling the
/// first three integer runs out of the string and reading them as
/// day/month/year. Returns `None` when both paths fail; the caller keeps the
/// original text in that case.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(String::new());
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            // chrono's %Y also accepts a bare 2-digit year, which would read
            // "31/12/23" as the year 23. Century-less input belongs to the
            // %y variants further down the list.
            if fmt.contains("%Y") && date.year() < 1000 {
                continue;
            }
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }

    salvage_date_components(raw)
}

/// Last-resort date recovery: take the first three integer runs as
/// day, month, year. Expands 2-digit years (<50 becomes 20xx) and checks
/// ranges only; a day of 31 in a short month is accepted as-is.
fn salvage_date_components(raw: &str) -> Option<String> {
    let digits = Regex::new(r"\d+").expect("digit-run pattern is valid");
    let runs: Vec<&str> = digits.find_iter(raw).map(|m| m.as_str()).take(3).collect();

    let [day, month, year] = runs[..] else {
        return None;
    };
    let day: i64 = day.parse().ok()?;
    let month: i64 = month.parse().ok()?;
    let mut year: i64 = year.parse().ok()?;

    if year < 100 {
        year += if year < 50 { 2000 } else { 1900 };
    }

    if (1..=31).contains(&day) && (1..=12).contains(&month) && (1900..=2100).contains(&year) {
        Some(format!("{year:04}-{month:02}-{day:02}"))
    } else {
        None
    }
}

/// Normalize an amount cell to a float.
///
/// Strips everything except digits, `.` and `-` (currency signs, thousands
/// separators, stray OCR noise) before parsing. `Some(0.0)` for an empty
/// cell; `None` when the scrubbed text still does not parse, so the caller
/// can warn before defaulting to zero.
pub fn normalize_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }

    let scrubbed: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    scrubbed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dmy_and_mdy_round_trip() {
        // DMY wins for day > 12, MDY picks up the rest of the list.
        assert_eq!(normalize_date("31/12/2023").unwrap(), "2023-12-31");
        assert_eq!(normalize_date("12/31/2023").unwrap(), "2023-12-31");
    }

    #[test]
    fn test_separator_variants() {
        assert_eq!(normalize_date("2023-12-31").unwrap(), "2023-12-31");
        assert_eq!(normalize_date("31.12.2023").unwrap(), "2023-12-31");
        assert_eq!(normalize_date("2023/12/31").unwrap(), "2023-12-31");
    }

    #[test]
    fn test_two_digit_years() {
        assert_eq!(normalize_date("31/12/23").unwrap(), "2023-12-31");
        assert_eq!(normalize_date("31-12-99").unwrap(), "1999-12-31");
    }

    #[test]
    fn test_component_salvage() {
        // Whitespace-separated components match no explicit pattern.
        assert_eq!(normalize_date("31 12 2023").unwrap(), "2023-12-31");
        assert_eq!(normalize_date("on 5, 3, 24").unwrap(), "2024-03-05");
    }

    #[test]
    fn test_salvage_range_checks() {
        assert_eq!(normalize_date("32 13 2023"), None);
        assert_eq!(normalize_date("1 1 2500"), None);
        assert_eq!(normalize_date("totally a date"), None);
    }

    #[test]
    fn test_empty_date_is_empty() {
        assert_eq!(normalize_date("").unwrap(), "");
        assert_eq!(normalize_date("   ").unwrap(), "");
    }

    #[test]
    fn test_amount_scrubbing() {
        assert_eq!(normalize_amount("$1,234.56"), Some(1234.56));
        assert_eq!(normalize_amount("  -15.00 "), Some(-15.0));
        assert_eq!(normalize_amount("USD 99.10"), Some(99.10));
    }

    #[test]
    fn test_amount_defaults() {
        assert_eq!(normalize_amount(""), Some(0.0));
        assert_eq!(normalize_amount("abc"), None);
        assert_eq!(normalize_amount("--"), None);
    }

    #[test]
    fn test_amount_idempotent_on_clean_values() {
        assert_eq!(normalize_amount("1234.56"), Some(1234.56));
    }
}
