//! Workbook renderer using rust_xlsxwriter

mod styles;

pub use styles::StyleSheet;

use crate::error::ReportError;
use crate::layout::{DisplayValue, RowKind, SheetLayout};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::collections::HashSet;

/// Writes laid out sheets into an XLSX byte stream
#[derive(Debug, Default)]
pub struct WorkbookRenderer {
    styles: StyleSheet,
}

impl WorkbookRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render month sheets in the given order, then the overview sheet last
    pub fn render(
        &self,
        months: &[SheetLayout],
        overview: &SheetLayout,
    ) -> Result<Vec<u8>, ReportError> {
        let mut workbook = Workbook::new();
        let mut used_names = HashSet::new();

        for layout in months.iter().chain(std::iter::once(overview)) {
            // Excel compares sheet names case-insensitively
            if !used_names.insert(layout.name.to_lowercase()) {
                return Err(ReportError::DuplicateSheetName(layout.name.clone()));
            }

            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&layout.name)?;
            self.write_sheet(worksheet, layout)?;
        }

        Ok(workbook.save_to_buffer()?)
    }

    fn write_sheet(&self, worksheet: &mut Worksheet, layout: &SheetLayout) -> Result<(), ReportError> {
        for (index, row) in layout.rows.iter().enumerate() {
            let row_num = index as u32;

            match row.kind {
                RowKind::Title => {
                    let title = row.cells.first().map(ToString::to_string).unwrap_or_default();
                    let format = self.styles.format_for(row.kind, row_num, 0);
                    let last_col = layout.columns.saturating_sub(1) as u16;
                    if let Some(format) = format {
                        worksheet.merge_range(row_num, 0, row_num, last_col, &title, format)?;
                    }
                    continue;
                }
                RowKind::HiddenHeader => {
                    worksheet.set_row_hidden(row_num)?;
                }
                _ => {}
            }

            for col in 0..layout.columns {
                let col_num = col as u16;
                let Some(format) = self.styles.format_for(row.kind, row_num, col_num) else {
                    continue;
                };

                match row.cells.get(col) {
                    Some(DisplayValue::Count(n)) => {
                        worksheet.write_number_with_format(row_num, col_num, *n as f64, format)?;
                    }
                    Some(DisplayValue::Text(text)) if !text.is_empty() => {
                        worksheet.write_string_with_format(row_num, col_num, text, format)?;
                    }
                    _ => {
                        worksheet.write_blank(row_num, col_num, format)?;
                    }
                }
            }
        }

        for (col, width) in layout.widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        Ok(())
    }
}
