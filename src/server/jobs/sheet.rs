//! Adapters over the spreadsheet codecs.
//!
//! Reading goes through `calamine` (xlsx, xls, ods) or `csv` into a plain grid of
//! [`Cell`]s; writing produces an xlsx workbook with `rust_xlsxwriter`.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Format, Workbook};

use crate::server::{
    error::job::JobError,
    util::parse::{excel_serial_to_datetime, parse_datetime},
};

/// A single decoded spreadsheet value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Trimmed text of the cell, `None` when blank.
    pub fn text(&self) -> Option<String> {
        let text = match self {
            Self::Empty => return None,
            Self::Text(text) => text.trim().to_string(),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        };

        (!text.is_empty()).then_some(text)
    }

    /// Interprets the cell as a date: Excel serial numbers or date text.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Number(serial) => excel_serial_to_datetime(*serial),
            Self::Text(text) => {
                let text = text.trim();
                parse_datetime(text).or_else(|| {
                    text.parse::<f64>()
                        .ok()
                        .and_then(excel_serial_to_datetime)
                })
            }
            Self::Empty | Self::Bool(_) => None,
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Self::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Self::Text(s.clone()),
            Data::Float(f) => Self::Number(*f),
            Data::Int(i) => Self::Number(*i as f64),
            Data::Bool(b) => Self::Bool(*b),
            Data::DateTime(dt) => Self::Number(dt.as_f64()),
        }
    }
}

/// Returns the cell at `index`, `Cell::Empty` past the end of a short row.
pub fn cell(row: &[Cell], index: usize) -> &Cell {
    const EMPTY: &Cell = &Cell::Empty;
    row.get(index).unwrap_or(EMPTY)
}

/// Reads the first sheet of a workbook, or a whole CSV file, into rows of cells.
///
/// The format is chosen from the file extension.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<Cell>>, JobError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if extension == "csv" {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        return reader
            .records()
            .map(|record| -> Result<Vec<Cell>, JobError> {
                Ok(record?
                    .iter()
                    .map(|field| {
                        if field.is_empty() {
                            Cell::Empty
                        } else {
                            Cell::Text(field.to_string())
                        }
                    })
                    .collect())
            })
            .collect();
    }

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| JobError::Spreadsheet("workbook has no sheets".to_string()))??;

    // The range begins at the first used cell; pad so indexes match the sheet.
    let (top, left) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); top as usize];
    rows.extend(range.rows().map(|row| {
        std::iter::repeat_n(Cell::Empty, left as usize)
            .chain(row.iter().map(Cell::from))
            .collect()
    }));

    Ok(rows)
}

/// Renders an xlsx workbook: a title row, a bold label row, then the data rows.
pub fn write_table(title: &str, labels: &[&str], rows: &[Vec<String>]) -> Result<Vec<u8>, JobError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    sheet.write_string_with_format(0, 0, title, &bold)?;

    for (col, label) in labels.iter().enumerate() {
        sheet.write_string_with_format(1, col as u16, *label, &bold)?;
        sheet.set_column_width(col as u16, 20)?;
    }

    for (index, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            sheet.write_string(index as u32 + 2, col as u16, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests date interpretation of numeric and textual cells.
    ///
    /// Expected: serial 45658 and "2025-01-01 09:30" both resolve to 2025-01-01
    #[test]
    fn reads_serial_and_text_dates() {
        let serial = Cell::Number(45658.0).datetime().unwrap();
        assert_eq!(serial.format("%Y-%m-%d").to_string(), "2025-01-01");

        let text = Cell::Text(" 2025-01-01 09:30 ".to_string()).datetime().unwrap();
        assert_eq!(text.format("%Y-%m-%d %H:%M").to_string(), "2025-01-01 09:30");

        assert_eq!(Cell::Text("45658".to_string()).datetime(), Some(serial));
        assert!(Cell::Text("soon".to_string()).datetime().is_none());
        assert!(Cell::Empty.datetime().is_none());
    }

    /// Tests text extraction.
    ///
    /// Expected: trimmed text, integral numbers without a fraction, blanks as None
    #[test]
    fn extracts_text() {
        assert_eq!(Cell::Text("  Ana ".to_string()).text().as_deref(), Some("Ana"));
        assert_eq!(Cell::Number(42.0).text().as_deref(), Some("42"));
        assert_eq!(Cell::Text("   ".to_string()).text(), None);
        assert_eq!(cell(&[], 3), &Cell::Empty);
    }

    /// Tests reading a CSV file with ragged rows.
    ///
    /// Expected: every line becomes a row; empty fields become Cell::Empty
    #[test]
    fn reads_csv_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seminars.csv");
        std::fs::write(&path, "Seminar Import\ntitle,description\nBudgeting,,2025-01-01\n").unwrap();

        let rows = read_rows(&path).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2][0], Cell::Text("Budgeting".to_string()));
        assert_eq!(rows[2][1], Cell::Empty);
        assert_eq!(rows[2].len(), 3);
    }

    /// Tests a sheet whose first used cell is not A1.
    ///
    /// Expected: leading empty rows and columns are kept, so B2 is rows[1][1]
    #[test]
    fn keeps_offset_of_first_used_cell() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(1, 1, "Seminar Import").unwrap();
        sheet.write_string(2, 1, "title").unwrap();
        sheet.write_string(2, 2, "schedule").unwrap();
        sheet.write_string(3, 1, "Budgeting").unwrap();
        sheet.write_number(3, 2, 45658.0).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");
        std::fs::write(&path, workbook.save_to_buffer().unwrap()).unwrap();

        let rows = read_rows(&path).unwrap();

        assert_eq!(rows.len(), 4);
        assert!(rows[0].is_empty());
        assert_eq!(cell(&rows[1], 0), &Cell::Empty);
        assert_eq!(cell(&rows[1], 1).text().as_deref(), Some("Seminar Import"));
        assert_eq!(cell(&rows[3], 1).text().as_deref(), Some("Budgeting"));
        assert_eq!(cell(&rows[3], 2), &Cell::Number(45658.0));
    }

    /// Tests that written workbooks read back with the title and label rows first.
    ///
    /// Expected: three rows; data starts at row index 2
    #[test]
    fn written_workbook_reads_back() {
        let bytes = write_table(
            "Seminar Export",
            &["Title", "Active"],
            &[vec!["Budgeting".to_string(), "Yes".to_string()]],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        std::fs::write(&path, bytes).unwrap();

        let rows = read_rows(&path).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(cell(&rows[0], 0).text().as_deref(), Some("Seminar Export"));
        assert_eq!(cell(&rows[1], 1).text().as_deref(), Some("Active"));
        assert_eq!(cell(&rows[2], 0).text().as_deref(), Some("Budgeting"));
    }
}
