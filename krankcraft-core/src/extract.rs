//! Extraction of sick-leave entries from source rows

use crate::config::ReportConfig;
use crate::entry::SickLeaveEntry;
use crate::reader::RawRow;
use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Scans source rows for qualifying entries under every configured column mapping
pub struct RecordExtractor<'a> {
    config: &'a ReportConfig,
    token: String,
}

impl<'a> RecordExtractor<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            token: config.comment_token.to_lowercase(),
        }
    }

    pub fn extract(&self, rows: &[RawRow]) -> Vec<SickLeaveEntry> {
        let mut entries = Vec::new();
        let mut skipped = 0usize;

        for row in rows {
            let Some((date, comment)) = self.qualifying_row(row) else {
                skipped += 1;
                continue;
            };

            for mapping in &self.config.column_mappings {
                let (Some(last_name), Some(first_name)) =
                    (row.text(mapping.last_name), row.text(mapping.first_name))
                else {
                    continue;
                };
                entries.push(SickLeaveEntry::new(last_name, first_name, date, comment.clone()));
            }
        }

        debug!(
            rows = rows.len(),
            skipped,
            entries = entries.len(),
            "extracted sick-leave entries"
        );
        entries
    }

    /// Row-level filter shared by all mappings: token in comment, parseable date, year threshold
    fn qualifying_row(&self, row: &RawRow) -> Option<(NaiveDate, String)> {
        let comment = row
            .get(self.config.comment_column)
            .and_then(|cell| cell.as_text())
            .unwrap_or_default();
        if !comment.to_lowercase().contains(&self.token) {
            return None;
        }

        let date = row.date(self.config.date_column)?;
        if date.year() < self.config.minimum_year {
            return None;
        }

        Some((date, comment))
    }
}
