//! Sick-leave entries and month keys

use crate::config::SHEET_NAME_MAX_LEN;
use chrono::{Datelike, NaiveDate};
use std::fmt;

pub const GERMAN_MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Indexed by days from Monday
pub const GERMAN_WEEKDAYS: [&str; 7] = [
    "Montag",
    "Dienstag",
    "Mittwoch",
    "Donnerstag",
    "Freitag",
    "Samstag",
    "Sonntag",
];

/// A calendar month. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn month_name(&self) -> &'static str {
        GERMAN_MONTHS[(self.month - 1) as usize]
    }

    /// Display label, e.g. "März 2025"
    pub fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    /// Composite key `MM-YYYY_<Monat> YYYY`
    pub fn composite(&self) -> String {
        format!("{:02}-{}_{}", self.month, self.year, self.label())
    }

    /// Worksheet name: the label cut to Excel's sheet name limit
    pub fn sheet_name(&self) -> String {
        truncate_sheet_name(&self.label())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.composite())
    }
}

/// Cut a name to at most 31 characters (not bytes)
pub fn truncate_sheet_name(name: &str) -> String {
    name.chars().take(SHEET_NAME_MAX_LEN).collect()
}

/// One qualifying sick-leave record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SickLeaveEntry {
    last_name: String,
    first_name: String,
    date: NaiveDate,
    iso_week: u32,
    weekday_name: &'static str,
    comment: String,
    month_key: MonthKey,
}

impl SickLeaveEntry {
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        date: NaiveDate,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            date,
            iso_week: date.iso_week().week(),
            weekday_name: GERMAN_WEEKDAYS[date.weekday().num_days_from_monday() as usize],
            comment: comment.into(),
            month_key: MonthKey::from_date(date),
        }
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn iso_week(&self) -> u32 {
        self.iso_week
    }

    pub fn weekday_name(&self) -> &'static str {
        self.weekday_name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn month_key(&self) -> MonthKey {
        self.month_key
    }

    /// `DD.MM.YYYY (KW <week>, <weekday>)`
    pub fn date_display(&self) -> String {
        format!(
            "{} (KW {}, {})",
            self.date.format("%d.%m.%Y"),
            self.iso_week,
            self.weekday_name
        )
    }
}
