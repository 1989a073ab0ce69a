//! Grouping of entries by month and employee

use crate::config::GroupOrder;
use crate::entry::{MonthKey, SickLeaveEntry};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Entries of one employee, in encounter order
#[derive(Debug, Clone)]
pub struct EmployeeGroup<'a> {
    pub last_name: &'a str,
    pub first_name: &'a str,
    pub entries: Vec<&'a SickLeaveEntry>,
}

impl EmployeeGroup<'_> {
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// All employee groups of one month
#[derive(Debug, Clone)]
pub struct MonthGroup<'a> {
    pub key: MonthKey,
    pub groups: Vec<EmployeeGroup<'a>>,
}

/// Total count of one employee across all months
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewRow {
    pub last_name: String,
    pub first_name: String,
    pub total_count: usize,
}

/// Structural regrouping of the full entry collection. Nothing is dropped or merged.
pub struct EntryAggregator<'a> {
    entries: Vec<&'a SickLeaveEntry>,
    order: GroupOrder,
}

impl<'a> EntryAggregator<'a> {
    pub fn new(entries: impl IntoIterator<Item = &'a SickLeaveEntry>, order: GroupOrder) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            order,
        }
    }

    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct months, oldest first
    pub fn month_keys(&self) -> Vec<MonthKey> {
        self.entries
            .iter()
            .map(|e| e.month_key())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn month_group(&self, key: MonthKey) -> MonthGroup<'a> {
        let in_month = self
            .entries
            .iter()
            .copied()
            .filter(|e| e.month_key() == key);
        MonthGroup {
            key,
            groups: group_by_employee(in_month, self.order),
        }
    }

    /// Every month group, oldest first
    pub fn months(&self) -> Vec<MonthGroup<'a>> {
        self.month_keys()
            .into_iter()
            .map(|key| self.month_group(key))
            .collect()
    }

    /// Per-employee totals in group order
    pub fn person_totals(&self) -> Vec<OverviewRow> {
        group_by_employee(self.entries.iter().copied(), self.order)
            .into_iter()
            .map(|group| OverviewRow {
                last_name: group.last_name.to_string(),
                first_name: group.first_name.to_string(),
                total_count: group.count(),
            })
            .collect()
    }

    /// Per-employee totals, highest count first; ties keep group order
    pub fn overview_rows(&self) -> Vec<OverviewRow> {
        let mut rows = self.person_totals();
        rows.sort_by(|a, b| b.total_count.cmp(&a.total_count));
        rows
    }
}

fn group_by_employee<'a>(
    entries: impl Iterator<Item = &'a SickLeaveEntry>,
    order: GroupOrder,
) -> Vec<EmployeeGroup<'a>> {
    let mut groups: Vec<EmployeeGroup<'a>> = Vec::new();
    let mut positions: HashMap<(&'a str, &'a str), usize> = HashMap::new();

    for entry in entries {
        let name = (entry.last_name(), entry.first_name());
        let position = *positions.entry(name).or_insert_with(|| {
            groups.push(EmployeeGroup {
                last_name: name.0,
                first_name: name.1,
                entries: Vec::new(),
            });
            groups.len() - 1
        });
        groups[position].entries.push(entry);
    }

    if order == GroupOrder::Name {
        groups.sort_by(|a, b| {
            (a.last_name, a.first_name).cmp(&(b.last_name, b.first_name))
        });
    }

    groups
}
