//! Source workbook reader using calamine

use crate::error::ReportError;
use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto, open_workbook_auto_from_rs};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

pub mod row;

pub use row::{CellValue, RawRow, parse_date_text};

/// Anything that yields positional rows of a named sheet
pub trait RowSource {
    /// Rows of `sheet`, dropping the first `skip` rows of the sheet
    fn source_rows(&mut self, sheet: &str, skip: usize) -> Result<Vec<RawRow>>;
}

impl<RS: Read + Seek> RowSource for Sheets<RS> {
    fn source_rows(&mut self, sheet: &str, skip: usize) -> Result<Vec<RawRow>> {
        if !self.sheet_names().iter().any(|name| name == sheet) {
            return Err(ReportError::MissingSheet {
                sheet: sheet.to_string(),
            }
            .into());
        }

        let range = self.worksheet_range(sheet).map_err(ReportError::from)?;
        Ok(rows_from_range(&range, skip))
    }
}

/// Read the rows of `sheet` from a workbook file
pub fn read_source_rows<P: AsRef<Path>>(path: P, sheet: &str, skip: usize) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let mut excel = open_workbook_auto(path)
        .map_err(ReportError::from)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;
    excel.source_rows(sheet, skip)
}

/// Read the rows of `sheet` from an in-memory workbook (e.g. an upload)
pub fn read_source_rows_from_bytes(bytes: Vec<u8>, sheet: &str, skip: usize) -> Result<Vec<RawRow>> {
    let mut excel = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(ReportError::from)?;
    excel.source_rows(sheet, skip)
}

/// Convert a calamine range into absolute-position rows.
///
/// Row and column indices are relative to cell A1 even when the used range
/// starts later, so that configured column positions stay valid.
fn rows_from_range(range: &Range<Data>, skip: usize) -> Vec<RawRow> {
    let (start_row, start_col) = match range.start() {
        Some(start) => start,
        None => return Vec::new(),
    };

    range
        .rows()
        .enumerate()
        .filter_map(|(offset, cells)| {
            let index = start_row + offset as u32;
            if (index as usize) < skip {
                return None;
            }

            let mut values = vec![CellValue::Empty; start_col as usize];
            values.extend(cells.iter().map(parse_cell_value));
            Some(RawRow::new(index, values))
        })
        .collect()
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(format!("{:?}", e)),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) if dt.is_duration() => CellValue::Number(dt.as_f64()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::Date(ndt),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match parse_date_text(s) {
            Some(date) => CellValue::Date(date.and_time(chrono::NaiveTime::MIN)),
            None => CellValue::Text(s.clone()),
        },
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
