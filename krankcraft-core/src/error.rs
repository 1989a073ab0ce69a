//! Error types surfaced by the pipeline

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// The input workbook does not contain the configured source sheet
    #[error("worksheet '{sheet}' not found")]
    MissingSheet { sheet: String },

    #[error("cannot read workbook: {0}")]
    Open(#[from] calamine::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// Two output sheets would share a name (Excel compares case-insensitively)
    #[error("duplicate sheet name '{0}'")]
    DuplicateSheetName(String),

    #[error("no qualifying entries found")]
    NoEntries,

    #[error("cannot write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
