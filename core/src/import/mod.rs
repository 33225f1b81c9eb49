pub mod layout;
pub mod parser;
pub mod workbook;

pub use layout::{DayColumn, SheetLayout};
pub use parser::{DayImport, ImportParser, RowWarning, SkipReason};
pub use workbook::load_sheet;

use chrono::NaiveDate;

/// A spreadsheet cell as the parser sees it, independent of the file format.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    /// Any numeric cell, including Excel time-of-day fractions.
    Number(f64),
    Date(NaiveDate),
}

impl RawCell {
    pub fn text(value: impl Into<String>) -> Self {
        RawCell::Text(value.into())
    }

    /// Empty, or text that is only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawCell::Text(s) => Some(s.trim()),
            _ => None,
        }
    }
}

static EMPTY_CELL: RawCell = RawCell::Empty;

/// The first worksheet of an export, row-major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    rows: Vec<Vec<RawCell>>,
}

impl RawSheet {
    pub fn new(rows: Vec<Vec<RawCell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<RawCell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Out-of-range positions read as [`RawCell::Empty`].
    pub fn cell(&self, row: usize, col: usize) -> &RawCell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}
