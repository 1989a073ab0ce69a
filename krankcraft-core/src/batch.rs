//! Per-file results of one report run

use crate::entry::SickLeaveEntry;

/// Outcome of reading and scanning one input file
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Processed { entries: Vec<SickLeaveEntry> },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// File name or path as given by the caller
    pub source: String,
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn entry_count(&self) -> usize {
        match &self.outcome {
            FileOutcome::Processed { entries } => entries.len(),
            FileOutcome::Failed { .. } => 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, FileOutcome::Failed { .. })
    }

    /// Diagnostic shown to the user for a failed file
    pub fn failure_message(&self) -> Option<String> {
        match &self.outcome {
            FileOutcome::Failed { message } => {
                Some(format!("Fehler in Datei {}: {}", self.source, message))
            }
            FileOutcome::Processed { .. } => None,
        }
    }
}

/// All file results of one run, in processing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn push(&mut self, report: FileReport) {
        self.files.push(report);
    }

    /// Entries of every processed file, in file then row order
    pub fn entries(&self) -> impl Iterator<Item = &SickLeaveEntry> {
        self.files.iter().flat_map(|file| match &file.outcome {
            FileOutcome::Processed { entries } => entries.as_slice(),
            FileOutcome::Failed { .. } => &[][..],
        })
    }

    pub fn entry_count(&self) -> usize {
        self.files.iter().map(FileReport::entry_count).sum()
    }

    /// No file contributed a qualifying entry
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|file| file.is_failed())
    }

    pub fn all_failed(&self) -> bool {
        !self.files.is_empty() && self.files.iter().all(FileReport::is_failed)
    }
}
