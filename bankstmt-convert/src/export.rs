//! Serialization sinks for the canonical record set.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use bankstmt_core::{Field, Record};
use rust_xlsxwriter::Workbook;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "xlsx" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            other => anyhow::bail!("unsupported output format: {other} (expected xlsx or csv)"),
        }
    }
}

/// Write records to `path` in the chosen format. Column order is the
/// canonical one: Date, Description, Amount, Balance.
pub fn write_records(records: &[Record], path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(records, path),
        OutputFormat::Xlsx => write_xlsx(records, path),
    }
}

fn write_csv(records: &[Record], path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;

    // Serde serialization emits the canonical header row automatically.
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(records: &[Record], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, field) in Field::ALL.iter().enumerate() {
        worksheet.write_string(0, col as u16, field.name())?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &record.date)?;
        worksheet.write_string(row, 1, &record.description)?;
        worksheet.write_number(row, 2, record.amount)?;
        worksheet.write_number(row, 3, record.balance)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("xlsx".parse::<OutputFormat>().unwrap(), OutputFormat::Xlsx);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_csv_round_trip() {
        let records = vec![
            Record {
                date: "2024-03-15".to_string(),
                description: "Grocery Store".to_string(),
                amount: 45.67,
                balance: 1234.56,
            },
            Record {
                date: "2024-03-16".to_string(),
                description: "".to_string(),
                amount: 0.0,
                balance: 0.0,
            },
        ];

        let path = std::env::temp_dir().join(format!("bankstmt-export-{}.csv", std::process::id()));
        write_records(&records, &path, OutputFormat::Csv).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("Date,Description,Amount,Balance"));
        assert_eq!(lines.next(), Some("2024-03-15,Grocery Store,45.67,1234.56"));

        let _ = std::fs::remove_file(&path);
    }
}
