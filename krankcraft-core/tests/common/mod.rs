//! Shared helpers: build tour workbooks and inspect rendered reports

#![allow(dead_code)]

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use quick_xml::Reader as XmlReader;
use quick_xml::events::{BytesStart, Event};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::io::{BufReader, Cursor};
use zip::ZipArchive;

pub enum DateCell {
    Native(u16, u8, u8),
    Text(&'static str),
    Missing,
}

pub struct TourRow {
    pub names: [(&'static str, &'static str); 2],
    pub date: DateCell,
    pub comment: &'static str,
}

impl TourRow {
    pub fn one(last: &'static str, first: &'static str, date: DateCell, comment: &'static str) -> Self {
        Self {
            names: [(last, first), ("", "")],
            date,
            comment,
        }
    }
}

/// Workbook with a four-row title band followed by the given rows
pub fn tour_workbook(sheet_name: &str, rows: &[TourRow]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).unwrap();
    let date_format = Format::new().set_num_format("dd.mm.yyyy");

    worksheet.write_string(0, 0, "Tourenplan KW 10-12").unwrap();
    worksheet.write_string(1, 0, "Fahrer").unwrap();
    for (col, header) in [(3, "Name"), (4, "Vorname"), (6, "Name"), (7, "Vorname"), (14, "Datum"), (15, "Bemerkung")] {
        worksheet.write_string(3, col, header).unwrap();
    }

    for (offset, row) in rows.iter().enumerate() {
        let r = 4 + offset as u32;
        for (pair, (last, first)) in row.names.iter().enumerate() {
            let col = 3 + 3 * pair as u16;
            if !last.is_empty() {
                worksheet.write_string(r, col, *last).unwrap();
            }
            if !first.is_empty() {
                worksheet.write_string(r, col + 1, *first).unwrap();
            }
        }
        match row.date {
            DateCell::Native(y, m, d) => {
                let date = ExcelDateTime::from_ymd(y, m, d).unwrap();
                worksheet
                    .write_datetime_with_format(r, 14, &date, &date_format)
                    .unwrap();
            }
            DateCell::Text(text) => {
                worksheet.write_string(r, 14, text).unwrap();
            }
            DateCell::Missing => {}
        }
        if !row.comment.is_empty() {
            worksheet.write_string(r, 15, row.comment).unwrap();
        }
    }

    workbook.save_to_buffer().unwrap()
}

pub fn sheet_names(bytes: &[u8]) -> Vec<String> {
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).unwrap();
    workbook.sheet_names()
}

/// Cell text by absolute position, empty cells as ""
pub fn sheet_rows(bytes: &[u8], sheet: &str) -> Vec<Vec<String>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    let Some((end_row, end_col)) = range.end() else {
        return Vec::new();
    };

    (0..=end_row)
        .map(|row| {
            (0..=end_col)
                .map(|col| match range.get_value((row, col)) {
                    Some(Data::Empty) | None => String::new(),
                    Some(value) => value.to_string(),
                })
                .collect()
        })
        .collect()
}

enum Tag {
    /// Start or empty element
    Open(String, Vec<(String, String)>),
    Close(String),
}

fn tag_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).to_string()
}

fn attributes(element: &BytesStart) -> Vec<(String, String)> {
    element
        .attributes()
        .flatten()
        .map(|attr| {
            (
                String::from_utf8_lossy(attr.key.as_ref()).to_string(),
                String::from_utf8_lossy(&attr.value).to_string(),
            )
        })
        .collect()
}

/// Walk the elements of one package part; empty elements open and close
fn part_events<F>(bytes: &[u8], part: &str, mut handle: F)
where
    F: FnMut(Tag),
{
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let file = archive.by_name(part).unwrap();

    let mut reader = XmlReader::from_reader(BufReader::new(file));
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                handle(Tag::Open(tag_name(e.name().as_ref()), attributes(&e)));
            }
            Ok(Event::Empty(e)) => {
                let name = tag_name(e.name().as_ref());
                handle(Tag::Open(name.clone(), attributes(&e)));
                handle(Tag::Close(name));
            }
            Ok(Event::End(e)) => handle(Tag::Close(tag_name(e.name().as_ref()))),
            Ok(Event::Eof) => break,
            Err(e) => panic!("XML parsing error: {}", e),
            _ => {}
        }
        buf.clear();
    }
}

fn sheet_xml_events<F>(bytes: &[u8], sheet_index: usize, mut handle: F)
where
    F: FnMut(&[u8], Vec<(String, String)>),
{
    // Sheet files are named sheet1.xml, sheet2.xml, etc. (1-indexed)
    let sheet_path = format!("xl/worksheets/sheet{}.xml", sheet_index + 1);
    part_events(bytes, &sheet_path, |tag| {
        if let Tag::Open(name, attrs) = tag {
            handle(name.as_bytes(), attrs);
        }
    });
}

fn attr<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Hidden rows of a worksheet (0-based)
pub fn hidden_rows(bytes: &[u8], sheet_index: usize) -> Vec<u32> {
    let mut hidden = Vec::new();
    sheet_xml_events(bytes, sheet_index, |name, attrs| {
        if name == b"row" && attr(&attrs, "hidden") == Some("1") {
            if let Some(r) = attr(&attrs, "r").and_then(|v| v.parse::<u32>().ok()) {
                hidden.push(r - 1);
            }
        }
    });
    hidden
}

/// Merged ranges in A1 notation
pub fn merged_ranges(bytes: &[u8], sheet_index: usize) -> Vec<String> {
    let mut merged = Vec::new();
    sheet_xml_events(bytes, sheet_index, |name, attrs| {
        if name == b"mergeCell" {
            if let Some(range) = attr(&attrs, "ref") {
                merged.push(range.to_string());
            }
        }
    });
    merged
}

/// Stored width per 0-based column
pub fn column_widths(bytes: &[u8], sheet_index: usize) -> Vec<(u32, f64)> {
    let mut widths = Vec::new();
    sheet_xml_events(bytes, sheet_index, |name, attrs| {
        if name != b"col" {
            return;
        }
        let min = attr(&attrs, "min").and_then(|v| v.parse::<u32>().ok());
        let max = attr(&attrs, "max").and_then(|v| v.parse::<u32>().ok());
        let width = attr(&attrs, "width").and_then(|v| v.parse::<f64>().ok());
        if let (Some(min), Some(max), Some(width)) = (min, max, width) {
            for col in min..=max {
                widths.push((col - 1, width));
            }
        }
    });
    widths
}

/// Resolved formatting of one cell, read from `xl/styles.xml`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CellStyle {
    pub bold: bool,
    pub font_size: f64,
    /// ARGB foreground of the fill pattern
    pub fill: Option<String>,
    /// Left border style, e.g. "thin"
    pub border: Option<String>,
    pub horizontal: Option<String>,
    pub vertical: Option<String>,
}

#[derive(Default)]
struct CellXf {
    font: usize,
    fill: usize,
    border: usize,
    horizontal: Option<String>,
    vertical: Option<String>,
}

#[derive(Default)]
struct StyleTables {
    fonts: Vec<(bool, f64)>,
    fills: Vec<Option<String>>,
    borders: Vec<Option<String>>,
    xfs: Vec<CellXf>,
}

fn style_tables(bytes: &[u8]) -> StyleTables {
    let mut tables = StyleTables::default();
    let mut section = String::new();
    let index = |attrs: &[(String, String)], key: &str| {
        attr(attrs, key)
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0)
    };

    part_events(bytes, "xl/styles.xml", |tag| match tag {
        Tag::Open(name, attrs) => {
            let current = section.clone();
            match (current.as_str(), name.as_str()) {
                (_, "fonts" | "fills" | "borders" | "cellStyleXfs" | "cellXfs") => section = name,
                ("fonts", "font") => tables.fonts.push((false, 11.0)),
                ("fonts", "b") => {
                    if let Some(font) = tables.fonts.last_mut() {
                        font.0 = true;
                    }
                }
                ("fonts", "sz") => {
                    if let (Some(font), Some(size)) = (
                        tables.fonts.last_mut(),
                        attr(&attrs, "val").and_then(|v| v.parse::<f64>().ok()),
                    ) {
                        font.1 = size;
                    }
                }
                ("fills", "fill") => tables.fills.push(None),
                ("fills", "fgColor") => {
                    if let Some(fill) = tables.fills.last_mut() {
                        *fill = attr(&attrs, "rgb").map(str::to_string);
                    }
                }
                ("borders", "border") => tables.borders.push(None),
                ("borders", "left") => {
                    if let Some(border) = tables.borders.last_mut() {
                        *border = attr(&attrs, "style").map(str::to_string);
                    }
                }
                ("cellXfs", "xf") => tables.xfs.push(CellXf {
                    font: index(&attrs, "fontId"),
                    fill: index(&attrs, "fillId"),
                    border: index(&attrs, "borderId"),
                    ..CellXf::default()
                }),
                ("cellXfs", "alignment") => {
                    if let Some(xf) = tables.xfs.last_mut() {
                        xf.horizontal = attr(&attrs, "horizontal").map(str::to_string);
                        xf.vertical = attr(&attrs, "vertical").map(str::to_string);
                    }
                }
                _ => {}
            }
        }
        Tag::Close(name) => {
            if name == section {
                section.clear();
            }
        }
    });
    tables
}

/// Formatting of a cell given in A1 notation, e.g. "A2"
pub fn cell_style(bytes: &[u8], sheet_index: usize, cell: &str) -> CellStyle {
    let mut xf_index = 0usize;
    sheet_xml_events(bytes, sheet_index, |name, attrs| {
        if name == b"c" && attr(&attrs, "r") == Some(cell) {
            xf_index = attr(&attrs, "s")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(0);
        }
    });

    let tables = style_tables(bytes);
    let xf = &tables.xfs[xf_index];
    let (bold, font_size) = tables.fonts[xf.font];
    CellStyle {
        bold,
        font_size,
        fill: tables.fills[xf.fill].clone(),
        border: tables.borders[xf.border].clone(),
        horizontal: xf.horizontal.clone(),
        vertical: xf.vertical.clone(),
    }
}
