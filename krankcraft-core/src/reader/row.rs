//! Raw row data structures

use chrono::{NaiveDate, NaiveDateTime};

/// One source row, addressed by zero-based column position
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// Zero-based row index within the source sheet
    pub index: u32,
    pub cells: Vec<CellValue>,
}

impl RawRow {
    pub fn new(index: u32, cells: Vec<CellValue>) -> Self {
        Self { index, cells }
    }

    /// Get the cell at a column; `None` when the row is shorter
    pub fn get(&self, col: usize) -> Option<&CellValue> {
        self.cells.get(col)
    }

    /// Text of a cell as written, `None` when empty
    pub fn text(&self, col: usize) -> Option<String> {
        self.get(col)
            .and_then(CellValue::as_text)
            .filter(|s| !s.is_empty())
    }

    /// Calendar date of a cell, if it holds or spells one
    pub fn date(&self, col: usize) -> Option<NaiveDate> {
        self.get(col).and_then(CellValue::as_date)
    }
}

/// Cell value types
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Date(NaiveDateTime),
    Error(String),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Render the cell as text; empty and error cells have none
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty | CellValue::Error(_) => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Boolean(b) => Some(b.to_string()),
            CellValue::Date(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }

    /// Interpret the cell as a calendar date.
    ///
    /// Native date cells and date-like text qualify. Bare numbers do not: a
    /// serial number without a date format is not treated as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(dt) => Some(dt.date()),
            CellValue::Text(s) => parse_date_text(s),
            _ => None,
        }
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%Y/%m/%d"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse date text in ISO or German day-first notation
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}
