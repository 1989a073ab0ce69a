//! krankcraft-core: monthly sick-leave reports from tour schedule workbooks
//!
//! Input workbooks are scanned for "krank" comments, the matching entries are
//! grouped per month and employee, and an XLSX report with one sheet per
//! month plus a ranked overview sheet is rendered.

pub mod aggregate;
pub mod batch;
pub mod config;
pub mod entry;
pub mod error;
pub mod extract;
pub mod layout;
pub mod reader;
pub mod writer;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use aggregate::{EntryAggregator, OverviewRow};
pub use batch::{BatchReport, FileOutcome, FileReport};
pub use config::{ColumnMapping, GroupOrder, ReportConfig};
pub use entry::{MonthKey, SickLeaveEntry};
pub use error::ReportError;
pub use extract::RecordExtractor;
pub use layout::{OverviewBuilder, SheetLayout, SheetLayoutBuilder};
pub use writer::WorkbookRenderer;

/// Main report interface
pub struct Reporter {
    config: ReportConfig,
}

impl Reporter {
    /// Create a new reporter with default configuration
    pub fn new() -> Self {
        Self::with_config(ReportConfig::default())
    }

    /// Create a new reporter with custom configuration
    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Scan one workbook file. Failures are captured in the report, never returned.
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> FileReport {
        let path = path.as_ref();
        let rows = reader::read_source_rows(
            path,
            &self.config.source_sheet,
            self.config.header_rows_to_skip,
        );
        self.file_report(path.display().to_string(), rows)
    }

    /// Scan one in-memory workbook, e.g. an uploaded file
    pub fn process_bytes(&self, name: &str, bytes: Vec<u8>) -> FileReport {
        let rows = reader::read_source_rows_from_bytes(
            bytes,
            &self.config.source_sheet,
            self.config.header_rows_to_skip,
        );
        self.file_report(name.to_string(), rows)
    }

    /// Scan every file in order; one bad file does not stop the others
    pub fn process_files<P: AsRef<Path>>(&self, paths: &[P]) -> BatchReport {
        let mut batch = BatchReport::default();
        for path in paths {
            batch.push(self.process_file(path));
        }
        batch
    }

    /// Lay out the month sheets (oldest first) and the overview sheet
    pub fn layouts(&self, batch: &BatchReport) -> Result<(Vec<SheetLayout>, SheetLayout), ReportError> {
        let aggregator = EntryAggregator::new(batch.entries(), self.config.group_order);
        if aggregator.is_empty() {
            return Err(ReportError::NoEntries);
        }

        let month_builder = SheetLayoutBuilder::new(&self.config);
        let months = aggregator
            .months()
            .iter()
            .map(|month| month_builder.build(month))
            .collect();
        let overview = OverviewBuilder::new(&self.config).build(&aggregator.overview_rows());

        Ok((months, overview))
    }

    /// Render the report workbook to bytes
    pub fn render(&self, batch: &BatchReport) -> Result<Vec<u8>, ReportError> {
        let (months, overview) = self.layouts(batch)?;
        WorkbookRenderer::new().render(&months, &overview)
    }

    /// Render and save the workbook. A directory output receives the configured file name.
    pub fn write_report<P: AsRef<Path>>(&self, batch: &BatchReport, output: P) -> Result<PathBuf> {
        let output = output.as_ref();
        let path = if output.is_dir() {
            output.join(&self.config.output_file_name)
        } else {
            output.to_path_buf()
        };

        let bytes = self.render(batch)?;
        fs::write(&path, bytes)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        info!(path = %path.display(), entries = batch.entry_count(), "report written");

        Ok(path)
    }

    fn file_report(&self, source: String, rows: Result<Vec<reader::RawRow>>) -> FileReport {
        let outcome = match rows {
            Ok(rows) => {
                let entries = RecordExtractor::new(&self.config).extract(&rows);
                info!(file = %source, rows = rows.len(), entries = entries.len(), "processed");
                FileOutcome::Processed { entries }
            }
            Err(e) => {
                let message = format!("{:#}", e);
                warn!("Fehler in Datei {}: {}", source, message);
                FileOutcome::Failed { message }
            }
        };

        FileReport { source, outcome }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
