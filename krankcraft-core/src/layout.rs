//! Display row model for month and overview sheets
//!
//! Layout is computed without touching a workbook: every row carries a
//! [`RowKind`] tag which the writer maps to concrete formatting.

use crate::aggregate::{MonthGroup, OverviewRow};
use crate::config::ReportConfig;
use std::fmt;

/// Internal header row written above every month table and hidden on render
pub const MONTH_SHEET_HEADER: [&str; 2] = ["Spalte A", "Spalte B"];
pub const MONTH_COLUMN_HEADER: [&str; 2] = ["Datum", "Kommentar"];
pub const OVERVIEW_COLUMN_HEADER: [&str; 3] = ["Nachname", "Vorname", "Anzahl Krank-Meldungen"];
pub const OVERVIEW_COLUMN_WIDTHS: [f64; 3] = [18.0, 18.0, 24.0];

/// Style tag of a display row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Month sheets: hidden internal header
    HiddenHeader,
    /// Month sheets: "<Vorname> <Nachname>" block title
    NameHeader,
    /// Month sheets: "Datum" / "Kommentar"
    ColumnHeader,
    /// Month sheets: one entry
    Data,
    /// Month sheets: blank row closing an employee block
    Separator,
    /// Overview: merged title
    Title,
    /// Overview: unstyled spacer
    Blank,
    /// Overview: table column names
    TableHeader,
    /// Overview: one employee total
    Ranked,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    Text(String),
    Count(usize),
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Text(s) => f.write_str(s),
            DisplayValue::Count(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for DisplayValue {
    fn from(value: &str) -> Self {
        DisplayValue::Text(value.to_string())
    }
}

impl From<String> for DisplayValue {
    fn from(value: String) -> Self {
        DisplayValue::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub kind: RowKind,
    pub cells: Vec<DisplayValue>,
}

impl DisplayRow {
    pub fn new<V: Into<DisplayValue>>(kind: RowKind, cells: impl IntoIterator<Item = V>) -> Self {
        Self {
            kind,
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Rendered text of every cell
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(ToString::to_string).collect()
    }
}

/// A fully laid out worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub name: String,
    pub rows: Vec<DisplayRow>,
    /// Column widths in Excel character units
    pub widths: Vec<f64>,
    pub columns: usize,
}

/// Width per column: `floor(longest * 1.2) + 2`, longest in characters
pub fn auto_column_widths(rows: &[DisplayRow], columns: usize) -> Vec<f64> {
    (0..columns)
        .map(|col| {
            let longest = rows
                .iter()
                .filter_map(|row| row.cells.get(col))
                .map(|value| value.to_string().chars().count())
                .max()
                .unwrap_or(0);
            (longest as f64 * 1.2).floor() + 2.0
        })
        .collect()
}

/// Lays out one month sheet
pub struct SheetLayoutBuilder<'a> {
    config: &'a ReportConfig,
}

impl<'a> SheetLayoutBuilder<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, month: &MonthGroup<'_>) -> SheetLayout {
        let mut rows = vec![DisplayRow::new(RowKind::HiddenHeader, MONTH_SHEET_HEADER)];

        for group in &month.groups {
            rows.push(DisplayRow::new(
                RowKind::NameHeader,
                [self.name_header(group.first_name, group.last_name, group.count()), String::new()],
            ));
            rows.push(DisplayRow::new(RowKind::ColumnHeader, MONTH_COLUMN_HEADER));
            for entry in &group.entries {
                rows.push(DisplayRow::new(
                    RowKind::Data,
                    [entry.date_display(), entry.comment().to_string()],
                ));
            }
            rows.push(DisplayRow::new(RowKind::Separator, ["", ""]));
        }

        let widths = auto_column_widths(&rows, 2);
        SheetLayout {
            name: month.key.sheet_name(),
            rows,
            widths,
            columns: 2,
        }
    }

    fn name_header(&self, first_name: &str, last_name: &str, days: usize) -> String {
        if self.config.name_header_day_count {
            format!("{} {} ({} Tage)", first_name, last_name, days)
        } else {
            format!("{} {}", first_name, last_name)
        }
    }
}

/// Lays out the ranked overview sheet
pub struct OverviewBuilder<'a> {
    config: &'a ReportConfig,
}

impl<'a> OverviewBuilder<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, overview: &[OverviewRow]) -> SheetLayout {
        let mut rows = vec![
            DisplayRow::new(RowKind::Title, [self.config.overview_title.as_str()]),
            DisplayRow::new(RowKind::Blank, [""]),
            DisplayRow::new(RowKind::TableHeader, OVERVIEW_COLUMN_HEADER),
        ];

        rows.extend(overview.iter().map(|row| DisplayRow {
            kind: RowKind::Ranked,
            cells: vec![
                DisplayValue::from(row.last_name.as_str()),
                DisplayValue::from(row.first_name.as_str()),
                DisplayValue::Count(row.total_count),
            ],
        }));

        SheetLayout {
            name: self.config.overview_sheet_name.clone(),
            rows,
            widths: OVERVIEW_COLUMN_WIDTHS.to_vec(),
            columns: 3,
        }
    }
}
