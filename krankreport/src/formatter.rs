//! Output formatters for the batch report

use anyhow::Result;
use colored::*;
use krankcraft_core::{BatchReport, EntryAggregator, ReportConfig};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct FileSummary<'a> {
    file: &'a str,
    status: &'static str,
    entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Serialize)]
struct MonthSummary {
    sheet: String,
    employees: usize,
    entries: usize,
}

fn no_data_warning(config: &ReportConfig) -> String {
    format!(
        "Keine gültigen Krank-Meldungen ab {} gefunden.",
        config.minimum_year
    )
}

/// Print the batch in human-readable format with colors
pub fn print_human(batch: &BatchReport, config: &ReportConfig, written: Option<&Path>) {
    println!("{}", "Krank-Meldungen Monatsübersicht".bold());
    println!();

    for file in &batch.files {
        match file.failure_message() {
            Some(message) => println!("  {} {}", "ERROR".red().bold(), message),
            None => println!(
                "  {} {} ({} Einträge)",
                "OK".green().bold(),
                file.source,
                file.entry_count()
            ),
        }
    }
    println!();

    if batch.is_empty() {
        println!("{}", no_data_warning(config).yellow().bold());
        return;
    }

    let aggregator = EntryAggregator::new(batch.entries(), config.group_order);
    println!("{}", "Monate:".bold().underline());
    for month in aggregator.months() {
        let entries: usize = month.groups.iter().map(|g| g.count()).sum();
        println!(
            "  {} {} Mitarbeiter, {} Tage",
            month.key.sheet_name().cyan().bold(),
            month.groups.len(),
            entries
        );
    }
    println!();

    match written {
        Some(path) => println!("{} {}", "✓ Report written:".green().bold(), path.display()),
        None => println!("{}", "[DRY RUN] no workbook written".bright_black()),
    }
}

/// Print the batch in JSON format
pub fn print_json(batch: &BatchReport, config: &ReportConfig, written: Option<&Path>) -> Result<()> {
    let files: Vec<FileSummary> = batch
        .files
        .iter()
        .map(|file| FileSummary {
            file: &file.source,
            status: if file.is_failed() { "failed" } else { "processed" },
            entries: file.entry_count(),
            message: file.failure_message(),
        })
        .collect();

    let aggregator = EntryAggregator::new(batch.entries(), config.group_order);
    let months: Vec<MonthSummary> = aggregator
        .months()
        .iter()
        .map(|month| MonthSummary {
            sheet: month.key.sheet_name(),
            employees: month.groups.len(),
            entries: month.groups.iter().map(|g| g.count()).sum(),
        })
        .collect();

    let output = serde_json::json!({
        "files": files,
        "months": months,
        "overview": aggregator.overview_rows(),
        "output": written.map(|p| p.display().to_string()),
        "warning": batch.is_empty().then(|| no_data_warning(config)),
        "summary": {
            "total_entries": batch.entry_count(),
            "failed_files": batch.failed().count(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
