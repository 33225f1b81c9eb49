use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{parse_fatal, Result};
use crate::import::{RawCell, RawSheet};
use crate::time::{parse_weekday, weekday_name};

const NAME_HEADER: &str = "employee";
const JOB_HEADER: &str = "job";
const BREAK_SUFFIX: &str = "break";

/// Where one day's shift (and optional break) cells live.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub day: Weekday,
    pub shift_col: usize,
    pub break_col: Option<usize>,
    pub date: Option<NaiveDate>,
}

impl DayColumn {
    /// `Mon 3/9`, or just `Mon` when the export carries no date.
    pub fn label(&self) -> String {
        match self.date {
            Some(date) => format!("{} {}", self.day, date.format("%-m/%-d")),
            None => self.day.to_string(),
        }
    }

    pub fn day_name(&self) -> &'static str {
        weekday_name(self.day)
    }
}

/// The structural skeleton of a weekly export.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub header_row: usize,
    pub name_col: usize,
    pub job_col: Option<usize>,
    pub days: Vec<DayColumn>,
    pub period: Option<String>,
    pub first_data_row: usize,
}

impl SheetLayout {
    /// Find the header row (the one with an `Employee` cell) and its day columns.
    /// Anything missing here makes the whole export unreadable.
    pub fn detect(sheet: &RawSheet) -> Result<Self> {
        let (header_row, name_col) = sheet
            .rows()
            .iter()
            .enumerate()
            .find_map(|(r, row)| {
                row.iter()
                    .position(|c| c.as_text().is_some_and(|s| s.eq_ignore_ascii_case(NAME_HEADER)))
                    .map(|c| (r, c))
            })
            .ok_or_else(|| parse_fatal("missing 'Employee' header column"))?;

        let header = &sheet.rows()[header_row];
        let mut job_col = None;
        let mut days: Vec<DayColumn> = Vec::new();
        let mut breaks: Vec<(Weekday, usize)> = Vec::new();

        for (col, cell) in header.iter().enumerate() {
            let Some(title) = cell.as_text() else { continue };
            if title.eq_ignore_ascii_case(JOB_HEADER) {
                job_col = Some(col);
            } else if let Some(day) = parse_weekday(title) {
                if days.iter().any(|d| d.day == day) {
                    return Err(parse_fatal(format!("duplicate column for {}", weekday_name(day))));
                }
                days.push(DayColumn { day, shift_col: col, break_col: None, date: None });
            } else if let Some(day) = break_column_day(title) {
                breaks.push((day, col));
            }
        }

        if days.is_empty() {
            return Err(parse_fatal("no day columns (Sun..Sat) next to the 'Employee' header"));
        }
        for (day, col) in breaks {
            if let Some(column) = days.iter_mut().find(|d| d.day == day) {
                column.break_col = Some(col);
            }
        }

        let period = sheet.rows()[..header_row]
            .iter()
            .flatten()
            .filter_map(RawCell::as_text)
            .find(|s| period_start(s).is_some())
            .map(str::to_string);
        let week_start = period.as_deref().and_then(period_start);

        let mut first_data_row = header_row + 1;
        if is_date_row(sheet, header_row + 1, name_col, &days, week_start) {
            for column in days.iter_mut() {
                column.date = cell_date(sheet.cell(header_row + 1, column.shift_col), week_start);
            }
            first_data_row += 1;
        }

        Ok(Self { header_row, name_col, job_col, days, period, first_data_row })
    }

    /// True for a repeated `Employee` header opening a later department section.
    pub fn is_section_header(&self, sheet: &RawSheet, row: usize) -> bool {
        sheet
            .cell(row, self.name_col)
            .as_text()
            .is_some_and(|s| s.eq_ignore_ascii_case(NAME_HEADER))
    }

    pub fn day(&self, day: Weekday) -> Result<&DayColumn> {
        self.days
            .iter()
            .find(|d| d.day == day)
            .ok_or_else(|| parse_fatal(format!("missing shift column for {}", weekday_name(day))))
    }
}

/// `Mon Break` / `Monday Break`.
fn break_column_day(title: &str) -> Option<Weekday> {
    let (day, suffix) = title.rsplit_once(char::is_whitespace)?;
    if suffix.eq_ignore_ascii_case(BREAK_SUFFIX) {
        parse_weekday(day)
    } else {
        None
    }
}

fn is_date_row(sheet: &RawSheet, row: usize, name_col: usize, days: &[DayColumn], week_start: Option<NaiveDate>) -> bool {
    sheet.cell(row, name_col).is_blank()
        && days.iter().any(|d| cell_date(sheet.cell(row, d.shift_col), week_start).is_some())
}

/// A full `3/9/2026`, or a short `3/9` dated within the week that starts at `week_start`.
fn cell_date(cell: &RawCell, week_start: Option<NaiveDate>) -> Option<NaiveDate> {
    let text = match cell {
        RawCell::Date(date) => return Some(*date),
        RawCell::Text(s) => s.trim(),
        _ => return None,
    };
    if let Ok(date) = NaiveDate::parse_from_str(text, "%m/%d/%Y") {
        return Some(date);
    }
    let start = week_start?;
    let (month, day) = text.split_once('/')?;
    let (month, day): (u32, u32) = (month.trim().parse().ok()?, day.trim().parse().ok()?);
    let date = NaiveDate::from_ymd_opt(start.year(), month, day)?;
    // 12/28 - 1/3: January belongs to the next year.
    if date < start {
        NaiveDate::from_ymd_opt(start.year() + 1, month, day)
    } else {
        Some(date)
    }
}

/// First day of a `3/8/2026 - 3/14/2026` period.
fn period_start(text: &str) -> Option<NaiveDate> {
    let (from, to) = text.split_once('-')?;
    NaiveDate::parse_from_str(to.trim(), "%m/%d/%Y").ok()?;
    NaiveDate::parse_from_str(from.trim(), "%m/%d/%Y").ok()
}
