use std::fs;
use std::path::Path;

use log::info;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::error::Result;
use crate::model::{Rgb, UNASSIGNED_COLOR};
use crate::service::{Orientation, PlaybookSheet, SlotState};

const SHEET_NAME: &str = "Playbook";
const TITLE_ROW: u32 = 0;
const PERIOD_ROW: u32 = 1;
const HEADER_ROW: u32 = 2;
const FIRST_DATA_ROW: u32 = HEADER_ROW + 1;
const SLOT_COL: u16 = 3;
const HEADER_FILL: u32 = 0xD9E1F2;
const BREAK_MARK: &str = "B";

struct SheetFormats {
    title: Format,
    period: Format,
    header: Format,
    slot_header: Format,
    text: Format,
    centered: Format,
    empty: Format,
    on_break: Format,
    legend_header: Format,
}

impl SheetFormats {
    fn new() -> Self {
        let header = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_background_color(HEADER_FILL)
            .set_border(FormatBorder::Thin);
        Self {
            title: Format::new().set_bold().set_font_size(16).set_align(FormatAlign::Center),
            period: Format::new().set_italic().set_align(FormatAlign::Center),
            slot_header: header.clone().set_font_size(8),
            header,
            text: Format::new().set_border(FormatBorder::Thin),
            centered: Format::new().set_align(FormatAlign::Center).set_border(FormatBorder::Thin),
            empty: Format::new().set_border(FormatBorder::Thin),
            on_break: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_background_color(Rgb::WHITE.to_u32())
                .set_border(FormatBorder::Thin),
            legend_header: Format::new().set_bold().set_border(FormatBorder::Thin),
        }
    }

    fn fill(color: Rgb) -> Format {
        Format::new()
            .set_background_color(color.to_u32())
            .set_font_color(color.contrast_text().to_u32())
            .set_border(FormatBorder::Thin)
    }
}

/// Renders a [`PlaybookSheet`] into a single-sheet `.xlsx` workbook.
#[derive(Debug, Default, Clone)]
pub struct XlsxPlaybookWriter {
    period: Option<String>,
}

impl XlsxPlaybookWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report period shown under the title, e.g. `3/8/2026 - 3/14/2026`.
    pub fn with_period(mut self, period: Option<String>) -> Self {
        self.period = period;
        self
    }

    pub fn to_bytes(&self, sheet: &PlaybookSheet) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let formats = SheetFormats::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        self.write_header(worksheet, sheet, &formats)?;
        let next_row = write_rows(worksheet, sheet, &formats)?;
        write_legend(worksheet, sheet, &formats, next_row + 1)?;
        apply_layout(worksheet, sheet)?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Builds the whole workbook in memory before touching `path`.
    pub fn write(&self, sheet: &PlaybookSheet, path: &Path) -> Result<()> {
        let bytes = self.to_bytes(sheet)?;
        fs::write(path, bytes)?;
        info!("Wrote {} rows to {}", sheet.rows.len(), path.display());
        Ok(())
    }

    fn write_header(&self, ws: &mut Worksheet, sheet: &PlaybookSheet, formats: &SheetFormats) -> Result<()> {
        let last_col = focus_col(sheet) + 1;
        let title = format!("DAILY PLAYBOOK - {}", sheet.header.title());
        ws.merge_range(TITLE_ROW, 0, TITLE_ROW, last_col, &title, &formats.title)?;
        if let Some(period) = &self.period {
            ws.merge_range(PERIOD_ROW, 0, PERIOD_ROW, last_col, period, &formats.period)?;
        }

        ws.write_with_format(HEADER_ROW, 0, "TEAMMATE NAME", &formats.header)?;
        ws.write_with_format(HEADER_ROW, 1, "SHIFT", &formats.header)?;
        ws.write_with_format(HEADER_ROW, 2, "BREAK", &formats.header)?;
        for (i, label) in sheet.slot_labels.iter().enumerate() {
            ws.write_with_format(HEADER_ROW, slot_col(i), label.as_str(), &formats.slot_header)?;
        }
        let focus = focus_col(sheet);
        ws.merge_range(HEADER_ROW, focus, HEADER_ROW, focus + 1, "FOCUSES", &formats.header)?;
        Ok(())
    }
}

/// Returns the first row after the data block.
fn write_rows(ws: &mut Worksheet, sheet: &PlaybookSheet, formats: &SheetFormats) -> Result<u32> {
    let focus = focus_col(sheet);
    let mut row = FIRST_DATA_ROW;
    for record in &sheet.rows {
        ws.write_with_format(row, 0, record.name.as_str(), &formats.text)?;
        ws.write_with_format(row, 1, record.shift_text.as_str(), &formats.centered)?;
        ws.write_with_format(row, 2, record.break_text.as_str(), &formats.centered)?;
        for (i, state) in record.cells.iter().enumerate() {
            let col = slot_col(i);
            match state {
                SlotState::Empty => {
                    ws.write_blank(row, col, &formats.empty)?;
                }
                SlotState::OnBreak => {
                    ws.write_with_format(row, col, BREAK_MARK, &formats.on_break)?;
                }
                SlotState::Working(color) => {
                    ws.write_blank(row, col, &SheetFormats::fill(*color))?;
                }
            }
        }
        ws.merge_range(row, focus, row, focus + 1, &record.focus, &formats.centered)?;
        row += 1;
    }
    Ok(row)
}

fn write_legend(ws: &mut Worksheet, sheet: &PlaybookSheet, formats: &SheetFormats, start_row: u32) -> Result<()> {
    ws.write_with_format(start_row, 0, "LEGEND", &formats.legend_header)?;
    let mut row = start_row + 1;
    for entry in &sheet.legend {
        ws.write_with_format(row, 0, entry.zone.as_str(), &SheetFormats::fill(entry.color))?;
        row += 1;
    }
    ws.write_with_format(row, 0, "Unassigned", &SheetFormats::fill(UNASSIGNED_COLOR))?;
    ws.write_with_format(row + 1, 0, "B = Break", &formats.on_break)?;
    Ok(())
}

fn apply_layout(ws: &mut Worksheet, sheet: &PlaybookSheet) -> Result<()> {
    let layout = &sheet.layout;
    ws.set_column_width(0, layout.name_width)?;
    ws.set_column_width(1, layout.shift_width)?;
    ws.set_column_width(2, layout.break_width)?;
    for i in 0..sheet.slot_labels.len() {
        ws.set_column_width(slot_col(i), layout.slot_width)?;
    }
    let focus = focus_col(sheet);
    ws.set_column_width(focus, layout.focus_width)?;
    ws.set_column_width(focus + 1, layout.focus_width)?;

    match layout.orientation {
        Orientation::Landscape => ws.set_landscape(),
        Orientation::Portrait => ws.set_portrait(),
    };
    if layout.fit_to_page_width {
        // Zero height means as many pages tall as needed.
        ws.set_print_fit_to_pages(1, 0);
    }
    ws.set_repeat_rows(HEADER_ROW, HEADER_ROW)?;
    ws.set_freeze_panes(FIRST_DATA_ROW, SLOT_COL)?;
    Ok(())
}

fn slot_col(index: usize) -> u16 {
    SLOT_COL + index as u16
}

fn focus_col(sheet: &PlaybookSheet) -> u16 {
    slot_col(sheet.slot_labels.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{load_sheet, RawCell};
    use crate::model::{ScheduleRecord, TimeSlotAxis, ZoneConfig};
    use crate::service::{GridResolver, PlaybookExporter, SheetHeader};
    use crate::time::parse_clock;
    use chrono::NaiveDate;

    fn sheet() -> PlaybookSheet {
        let zones = ZoneConfig::defaults();
        let axis = TimeSlotAxis::new(parse_clock("09:00").unwrap(), parse_clock("13:00").unwrap()).unwrap();
        let mut jane = ScheduleRecord::manual("Doe, Jane", "9A-1P", Some("11A-1130A"), 0).unwrap();
        jane.zone = Some("Cashiers".to_string());
        let rick = ScheduleRecord::manual("Roe, Rick", "10A-1P", None, 1).unwrap();
        let records = vec![jane, rick];
        let resolved = GridResolver::new(&axis, &zones).resolve_all(&records);
        let header = SheetHeader::new("Monday", NaiveDate::from_ymd_opt(2026, 3, 9));
        PlaybookExporter::new().build(header, &axis, &resolved, &zones)
    }

    #[test]
    fn test_to_bytes_is_a_zip() {
        let bytes = XlsxPlaybookWriter::new().to_bytes(&sheet()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_written_sheet_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Daily_Playbook_3-9.xlsx");
        XlsxPlaybookWriter::new()
            .with_period(Some("3/8/2026 - 3/14/2026".to_string()))
            .write(&sheet(), &path)
            .unwrap();

        let raw = load_sheet(&path).unwrap();
        assert_eq!(raw.cell(0, 0), &RawCell::text("DAILY PLAYBOOK - Monday 3/9"));
        assert_eq!(raw.cell(1, 0), &RawCell::text("3/8/2026 - 3/14/2026"));
        assert_eq!(raw.cell(2, 0), &RawCell::text("TEAMMATE NAME"));
        assert_eq!(raw.cell(2, 3), &RawCell::text("9A"));
        assert_eq!(raw.cell(2, 11), &RawCell::text("FOCUSES"));
        assert_eq!(raw.cell(3, 0), &RawCell::text("Doe, Jane"));
        assert_eq!(raw.cell(3, 1), &RawCell::text("9A-1P"));
        // 11:00 is the fifth slot.
        assert_eq!(raw.cell(3, 7), &RawCell::text("B"));
        assert_eq!(raw.cell(3, 11), &RawCell::text("Cashiers"));
        assert_eq!(raw.cell(4, 0), &RawCell::text("Roe, Rick"));
        assert_eq!(raw.cell(6, 0), &RawCell::text("LEGEND"));
        assert_eq!(raw.cell(7, 0), &RawCell::text("Cashiers"));
    }

    #[test]
    fn test_write_to_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.xlsx");
        assert!(XlsxPlaybookWriter::new().write(&sheet(), &path).is_err());
        assert!(!path.exists());
    }
}
