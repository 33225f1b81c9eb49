use std::fmt;

use chrono::Weekday;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::import::{DayColumn, RawCell, RawSheet, SheetLayout};
use crate::model::ScheduleRecord;
use crate::time::{parse_range, parse_shift, Interval};

/// Why a row produced no record. Collected, never fatal.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// A lone fraction-of-day number: a start without an end.
    NumericTime { column: String, value: f64 },
    Malformed { column: String, text: String, detail: String },
    ZeroLengthShift { text: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NumericTime { column, value } => {
                write!(f, "{} cell holds a single time value ({}), expected a START - END range", column, value)
            }
            SkipReason::Malformed { column, text, detail } => {
                write!(f, "could not read {} '{}': {}", column, text, detail)
            }
            SkipReason::ZeroLengthShift { text } => write!(f, "shift '{}' has no length", text),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RowWarning {
    /// Zero-based sheet row.
    pub row: usize,
    pub employee: String,
    pub reason: SkipReason,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {} ({}): {}", self.row + 1, self.employee, self.reason)
    }
}

/// Everything imported for one day of the week.
#[derive(Debug, Clone, PartialEq)]
pub struct DayImport {
    pub day: DayColumn,
    pub period: Option<String>,
    pub records: Vec<ScheduleRecord>,
    pub warnings: Vec<RowWarning>,
}

enum RowOutcome {
    Record(ScheduleRecord),
    Skipped(SkipReason),
    NoShift,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ImportParser;

impl ImportParser {
    pub fn new() -> Self {
        Self
    }

    pub fn available_days(&self, sheet: &RawSheet) -> Result<Vec<DayColumn>> {
        Ok(SheetLayout::detect(sheet)?.days)
    }

    /// Records for `day`, in source order, with `order` set to the sheet row index.
    pub fn parse_day(&self, sheet: &RawSheet, day: Weekday) -> Result<DayImport> {
        let layout = SheetLayout::detect(sheet)?;
        let column = layout.day(day)?.clone();

        let mut records = Vec::new();
        let mut warnings = Vec::new();

        for row in layout.first_data_row..sheet.row_count() {
            let name = match sheet.cell(row, layout.name_col).as_text() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => continue,
            };
            if layout.is_section_header(sheet, row) {
                debug!("Row {}: another department section starts", row + 1);
                continue;
            }

            match self.parse_row(sheet, &layout, &column, row, &name) {
                RowOutcome::Record(record) => {
                    debug!("Row {}: {} works {}", row + 1, name, record.shift_text());
                    records.push(record);
                }
                RowOutcome::Skipped(reason) => {
                    let warning = RowWarning { row, employee: name, reason };
                    warn!("Skipping {}", warning);
                    warnings.push(warning);
                }
                RowOutcome::NoShift => debug!("Row {}: {} is off on {}", row + 1, name, column.day),
            }
        }

        info!(
            "Imported {} records for {} ({} rows skipped)",
            records.len(),
            column.label(),
            warnings.len()
        );

        Ok(DayImport {
            day: column,
            period: layout.period,
            records,
            warnings,
        })
    }

    fn parse_row(
        &self,
        sheet: &RawSheet,
        layout: &SheetLayout,
        column: &DayColumn,
        row: usize,
        name: &str,
    ) -> RowOutcome {
        let shift_text = match sheet.cell(row, column.shift_col) {
            cell if cell.is_blank() => return RowOutcome::NoShift,
            RawCell::Text(text) => text.trim(),
            RawCell::Number(value) => {
                return RowOutcome::Skipped(SkipReason::NumericTime { column: "shift".to_string(), value: *value })
            }
            RawCell::Date(date) => {
                return RowOutcome::Skipped(SkipReason::Malformed {
                    column: "shift".to_string(),
                    text: date.to_string(),
                    detail: "a date is not a time range".to_string(),
                })
            }
            RawCell::Empty => return RowOutcome::NoShift,
        };

        let parsed = match parse_shift(shift_text) {
            Ok(parsed) => parsed,
            Err(e) => return RowOutcome::Skipped(malformed("shift", shift_text, e)),
        };
        if parsed.shift.is_empty() {
            return RowOutcome::Skipped(SkipReason::ZeroLengthShift { text: shift_text.to_string() });
        }

        let break_time = match column.break_col.map(|c| sheet.cell(row, c)) {
            None => parsed.gap,
            Some(cell) if cell.is_blank() => parsed.gap,
            Some(RawCell::Text(text)) => match parse_range(text) {
                Ok(interval) => interval,
                Err(e) => return RowOutcome::Skipped(malformed("break", text.trim(), e)),
            },
            Some(RawCell::Number(value)) => {
                return RowOutcome::Skipped(SkipReason::NumericTime { column: "break".to_string(), value: *value })
            }
            Some(other) => {
                return RowOutcome::Skipped(SkipReason::Malformed {
                    column: "break".to_string(),
                    text: format!("{:?}", other),
                    detail: "not a time range".to_string(),
                })
            }
        };
        if !break_time.is_empty() && !within(&parsed.shift, &break_time) {
            debug!("Row {}: break {} lies outside shift {}", row + 1, break_time.format_short(), parsed.shift.format_short());
        }

        let mut record = ScheduleRecord::new(name, parsed.shift, break_time, row);
        if let Some(job_col) = layout.job_col {
            if let Some(job) = sheet.cell(row, job_col).as_text() {
                record.job = job.to_string();
            }
        }
        RowOutcome::Record(record)
    }
}

fn malformed(column: &str, text: &str, err: impl fmt::Display) -> SkipReason {
    SkipReason::Malformed {
        column: column.to_string(),
        text: text.to_string(),
        detail: err.to_string(),
    }
}

fn within(outer: &Interval, inner: &Interval) -> bool {
    outer.start() <= inner.start() && inner.end() <= outer.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaybookError;
    use crate::import::fixtures::{t, weekly_export};
    use pretty_assertions::assert_eq;

    fn names(import: &DayImport) -> Vec<&str> {
        import.records.iter().map(|r| r.employee_name.as_str()).collect()
    }

    #[test]
    fn test_parse_sunday() {
        let import = ImportParser::new().parse_day(&weekly_export(), Weekday::Sun).unwrap();
        assert_eq!(import.day.label(), "Sun 3/8");
        assert_eq!(import.period.as_deref(), Some("3/8/2026 - 3/14/2026"));

        // Blank-name row 6 is ignored even though it has a shift.
        assert_eq!(names(&import), vec!["Doe, Jane"]);
        let jane = &import.records[0];
        assert_eq!(jane.order, 4);
        assert_eq!(jane.job, "Cashier");
        assert_eq!(jane.shift_text(), "9A-5P");
        assert_eq!(jane.break_text(), "12P-1230P");
        assert!(jane.zone.is_none());

        let rows: Vec<usize> = import.warnings.iter().map(|w| w.row).collect();
        assert_eq!(rows, vec![7, 8, 9]);
        assert!(matches!(import.warnings[0].reason, SkipReason::NumericTime { value, .. } if value == 0.375));
        assert!(matches!(import.warnings[1].reason, SkipReason::Malformed { ref text, .. } if text == "nine to five"));
        // 6P - 2A crosses midnight.
        assert_eq!(import.warnings[2].employee, "Moe, Max");
    }

    #[test]
    fn test_parse_monday_orders_and_breaks() {
        let import = ImportParser::new().parse_day(&weekly_export(), Weekday::Mon).unwrap();
        assert_eq!(names(&import), vec!["Doe, Jane", "Roe, Rick", "Poe, Pat", "Moe, Max"]);

        let orders: Vec<usize> = import.records.iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![4, 5, 7, 9]);

        // No explicit break and a single segment: zero-length break.
        assert!(import.records[0].break_time.is_empty());
        // Two segments: the gap becomes the break.
        assert_eq!(import.records[1].shift_text(), "10A-7P");
        assert_eq!(import.records[1].break_text(), "2P-3P");
        assert_eq!(import.records[2].shift_text(), "1P-930P");
        assert_eq!(import.records[2].break_text(), "5P-530P");
        assert_eq!(import.records[3].shift_text(), "6A-2P");

        assert_eq!(import.warnings.len(), 1);
        assert_eq!(import.warnings[0].employee, "Loe, Lou");
        assert!(import.warnings[0].to_string().starts_with("Row 9 (Loe, Lou): could not read break 'noonish'"));
    }

    #[test]
    fn test_day_without_break_column() {
        let import = ImportParser::new().parse_day(&weekly_export(), Weekday::Tue).unwrap();
        assert_eq!(names(&import), vec!["Roe, Rick"]);
        assert!(import.records[0].break_time.is_empty());
        assert!(import.warnings.is_empty());
    }

    #[test]
    fn test_missing_day_is_fatal() {
        let err = ImportParser::new().parse_day(&weekly_export(), Weekday::Sat).unwrap_err();
        assert!(matches!(err, PlaybookError::ParseFatal(ref m) if m.contains("Saturday")));
    }

    #[test]
    fn test_zero_length_shift_is_skipped() {
        let sheet = RawSheet::new(vec![
            vec![t("Employee"), t("Wed")],
            vec![t("Doe, Jane"), t("9A-9A")],
            vec![t("Roe, Rick"), t("9A-1P")],
        ]);
        let import = ImportParser::new().parse_day(&sheet, Weekday::Wed).unwrap();
        assert_eq!(names(&import), vec!["Roe, Rick"]);
        assert!(matches!(import.warnings[0].reason, SkipReason::ZeroLengthShift { .. }));
    }

    #[test]
    fn test_department_sections_are_read_through() {
        let sheet = RawSheet::new(vec![
            vec![t("Store/Front End"), t("")],
            vec![t("Employee"), t("Mon")],
            vec![t(""), t("3/9/2026")],
            vec![t("Doe, Jane"), t("9A-5P")],
            vec![t("Store/Stockroom"), t("")],
            vec![t("Employee"), t("Mon")],
            vec![t(""), t("3/9/2026")],
            vec![t("Roe, Rick"), t("6A-2P")],
        ]);
        let import = ImportParser::new().parse_day(&sheet, Weekday::Mon).unwrap();
        assert_eq!(names(&import), vec!["Doe, Jane", "Roe, Rick"]);
        assert_eq!(import.records[1].order, 7);
        assert!(import.warnings.is_empty());
    }

    #[test]
    fn test_available_days() {
        let days = ImportParser::new().available_days(&weekly_export()).unwrap();
        let labels: Vec<String> = days.iter().map(DayColumn::label).collect();
        assert_eq!(labels, vec!["Sun 3/8", "Mon 3/9", "Tue 3/10"]);
    }
}
