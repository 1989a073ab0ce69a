//! Concrete cell formats per row kind

use crate::layout::RowKind;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern};

const NAME_HEADER_FILL: u32 = 0xFFC000;
const COLUMN_HEADER_FILL: u32 = 0x95B3D7;
const ZEBRA_EVEN_FILL: u32 = 0xF7F7F7;
const ZEBRA_ODD_FILL: u32 = 0xDDEEFF;

/// Formats shared by all sheets of one workbook
#[derive(Debug, Clone)]
pub struct StyleSheet {
    month_base: Format,
    name_header: Format,
    column_header: Format,
    title: Format,
    table_header: Format,
    zebra: [ZebraFormats; 2],
}

#[derive(Debug, Clone)]
struct ZebraFormats {
    text: Format,
    count: Format,
}

impl StyleSheet {
    pub fn new() -> Self {
        let bordered = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::VerticalCenter);
        let left = bordered.clone().set_align(FormatAlign::Left);

        let month_base = left.clone().set_font_name("Calibri").set_font_size(11);
        let name_header = left
            .clone()
            .set_bold()
            .set_font_size(12)
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(NAME_HEADER_FILL));
        let column_header = left
            .set_bold()
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(COLUMN_HEADER_FILL));

        let title = Format::new()
            .set_bold()
            .set_font_size(16)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        let table_header = bordered
            .clone()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(COLUMN_HEADER_FILL));

        let zebra = |fill: u32| {
            let filled = bordered
                .clone()
                .set_pattern(FormatPattern::Solid)
                .set_background_color(Color::RGB(fill));
            ZebraFormats {
                text: filled.clone().set_align(FormatAlign::Center),
                count: filled.set_bold().set_align(FormatAlign::Right),
            }
        };

        Self {
            month_base,
            name_header,
            column_header,
            title,
            table_header,
            zebra: [zebra(ZEBRA_EVEN_FILL), zebra(ZEBRA_ODD_FILL)],
        }
    }

    /// Format of a cell, or `None` when the cell stays unstyled.
    ///
    /// `row` and `col` are zero-based; zebra striping follows the 1-based
    /// worksheet row number (even rows get the light grey fill).
    pub fn format_for(&self, kind: RowKind, row: u32, col: u16) -> Option<&Format> {
        match kind {
            RowKind::HiddenHeader | RowKind::Data | RowKind::Separator => Some(&self.month_base),
            RowKind::NameHeader => Some(&self.name_header),
            RowKind::ColumnHeader => Some(&self.column_header),
            RowKind::Title => Some(&self.title),
            RowKind::Blank => None,
            RowKind::TableHeader => Some(&self.table_header),
            RowKind::Ranked => {
                let stripe = &self.zebra[(row as usize + 1) % 2];
                if col == 2 {
                    Some(&stripe.count)
                } else {
                    Some(&stripe.text)
                }
            }
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new()
    }
}
