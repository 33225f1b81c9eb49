use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::import::{DayColumn, RowWarning};
use crate::service::Roster;
use crate::service::SheetHeader;

/// The imported day being edited. Replaced wholesale by the next import.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DaySession {
    pub source: PathBuf,
    pub day: DayColumn,
    pub period: Option<String>,
    pub roster: Roster,
    #[serde(default)]
    pub warnings: Vec<RowWarning>,
}

impl DaySession {
    pub fn header(&self) -> SheetHeader {
        SheetHeader::new(self.day.day_name(), self.day.date)
    }
}
