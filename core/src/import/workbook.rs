use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate};
use log::debug;

use crate::error::{PlaybookError, Result};
use crate::import::{RawCell, RawSheet};

/// Read the first worksheet of an `.xlsx`/`.xls`/`.ods` export.
pub fn load_sheet(path: &Path) -> Result<RawSheet> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PlaybookError::ParseFatal(format!("{} has no worksheets", path.display())))??;

    // calamine ranges start at the first used cell; pad back to A1 so indices are sheet rows.
    let (top, left) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<RawCell>> = vec![Vec::new(); top as usize];
    rows.extend(range.rows().map(|row| {
        let mut cells = vec![RawCell::Empty; left as usize];
        cells.extend(row.iter().map(convert_cell));
        cells
    }));
    debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(RawSheet::new(rows))
}

fn convert_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        Data::DateTime(dt) => serial_to_cell(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(_) => RawCell::Empty,
    }
}

/// Excel serials below one day are clock times; whole days are calendar dates.
fn serial_to_cell(serial: f64) -> RawCell {
    if serial < 1.0 {
        return RawCell::Number(serial);
    }
    match excel_epoch().checked_add_signed(Duration::days(serial.trunc() as i64)) {
        Some(date) => RawCell::Date(date),
        None => RawCell::Number(serial),
    }
}

fn excel_epoch() -> NaiveDate {
    // 1899-12-30 absorbs the 1900 leap-year bug for every date after February 1900.
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}
