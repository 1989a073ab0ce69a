//! Configuration for the extraction and report pipeline

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Excel sheet name maximum length
pub const SHEET_NAME_MAX_LEN: usize = 31;

/// Characters not allowed in sheet names
pub const SHEET_NAME_ILLEGAL: [char; 7] = ['*', ':', '?', '/', '\\', '[', ']'];

/// Main report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Sheet read from every input workbook
    pub source_sheet: String,
    /// Leading rows of the source sheet discarded as title/header band
    pub header_rows_to_skip: usize,
    /// Entries dated before this year are ignored
    pub minimum_year: i32,
    /// Case-insensitive substring a comment must contain
    pub comment_token: String,
    /// Zero-based column holding the date
    pub date_column: usize,
    /// Zero-based column holding the comment
    pub comment_column: usize,
    /// Name column pairs, one employee per pair and row
    pub column_mappings: Vec<ColumnMapping>,
    /// Append " (<n> Tage)" to the name header rows of month sheets
    pub name_header_day_count: bool,
    /// Order of employee blocks on month sheets and of overview ties
    pub group_order: GroupOrder,
    /// File name used when the output path is a directory
    pub output_file_name: String,
    pub overview_sheet_name: String,
    pub overview_title: String,
}

impl ReportConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ReportConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check column and naming constraints that would make extraction or rendering misbehave
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.column_mappings.is_empty() {
            return Err(ReportError::Config(
                "at least one column mapping is required".to_string(),
            ));
        }

        if self.date_column == self.comment_column {
            return Err(ReportError::Config(format!(
                "date and comment column are both {}",
                self.date_column
            )));
        }

        for (index, mapping) in self.column_mappings.iter().enumerate() {
            if mapping.last_name == mapping.first_name {
                return Err(ReportError::Config(format!(
                    "column mapping {} uses column {} for both names",
                    index + 1,
                    mapping.last_name
                )));
            }
            for column in [mapping.last_name, mapping.first_name] {
                if column == self.date_column || column == self.comment_column {
                    return Err(ReportError::Config(format!(
                        "column mapping {} overlaps date/comment column {}",
                        index + 1,
                        column
                    )));
                }
            }
        }

        if self.comment_token.trim().is_empty() {
            return Err(ReportError::Config(
                "comment_token must not be empty".to_string(),
            ));
        }

        validate_sheet_name(&self.overview_sheet_name)?;

        Ok(())
    }

    /// Highest column index any rule reads
    pub fn max_column(&self) -> usize {
        self.column_mappings
            .iter()
            .flat_map(|m| [m.last_name, m.first_name])
            .chain([self.date_column, self.comment_column])
            .max()
            .unwrap_or(0)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source_sheet: "Touren".to_string(),
            header_rows_to_skip: 4,
            minimum_year: 2025,
            comment_token: "krank".to_string(),
            date_column: 14,
            comment_column: 15,
            column_mappings: vec![
                ColumnMapping {
                    last_name: 3,
                    first_name: 4,
                },
                ColumnMapping {
                    last_name: 6,
                    first_name: 7,
                },
            ],
            name_header_day_count: true,
            group_order: GroupOrder::Encounter,
            output_file_name: "Krank_Monatsauswertung.xlsx".to_string(),
            overview_sheet_name: "Übersicht".to_string(),
            overview_title: "Krank-Meldungen Übersicht ab 2025".to_string(),
        }
    }
}

/// One employee's name columns within a source row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub last_name: usize,
    pub first_name: usize,
}

/// Ordering of employee groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrder {
    /// First appearance in the extracted entry list
    #[default]
    Encounter,
    /// Last name, then first name
    Name,
}

fn validate_sheet_name(name: &str) -> Result<(), ReportError> {
    if name.trim().is_empty() {
        return Err(ReportError::Config("sheet name must not be empty".to_string()));
    }
    if name.chars().count() > SHEET_NAME_MAX_LEN {
        return Err(ReportError::Config(format!(
            "sheet name '{}' exceeds {} characters",
            name, SHEET_NAME_MAX_LEN
        )));
    }
    if let Some(c) = name.chars().find(|c| SHEET_NAME_ILLEGAL.contains(c)) {
        return Err(ReportError::Config(format!(
            "sheet name '{}' contains illegal character '{}'",
            name, c
        )));
    }
    Ok(())
}
