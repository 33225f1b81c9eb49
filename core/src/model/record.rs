use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{edit_error, Result};
use crate::time::{parse_range, parse_shift, Interval, TimeOfDay};

/// From `from` onwards (until the next split) the employee works in `zone`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ZoneSplit {
    pub from: TimeOfDay,
    pub zone: String,
}

/// One employee's assignment for the selected day.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScheduleRecord {
    pub id: Uuid,
    pub employee_name: String,
    #[serde(default)]
    pub job: String,
    pub shift: Interval,
    pub break_time: Interval,
    pub zone: Option<String>,
    #[serde(default)]
    pub zone_splits: Vec<ZoneSplit>,
    pub order: usize,
}

impl ScheduleRecord {
    pub fn new(employee_name: impl Into<String>, shift: Interval, break_time: Interval, order: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_name: employee_name.into().trim().to_string(),
            job: String::new(),
            shift,
            break_time,
            zone: None,
            zone_splits: Vec::new(),
            order,
        }
    }

    /// Build a record from hand-typed text, using the import time grammar.
    /// A multi-segment shift without an explicit break takes the gap as its break.
    pub fn manual(name: &str, shift_text: &str, break_text: Option<&str>, order: usize) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(edit_error("Name cannot be empty"));
        }
        let parsed = parse_shift(shift_text)?;
        if parsed.shift.is_empty() {
            return Err(edit_error(format!("Shift '{}' has no length", shift_text.trim())));
        }
        let break_time = match break_text.map(str::trim).filter(|t| !t.is_empty()) {
            Some(text) => parse_range(text)?,
            None => parsed.gap,
        };
        Ok(Self::new(name, parsed.shift, break_time, order))
    }

    pub fn shift_text(&self) -> String {
        self.shift.format_short()
    }

    pub fn break_text(&self) -> String {
        self.break_time.format_short()
    }

    /// Zone in effect at `at`: the latest split starting at or before it, else the main zone.
    pub fn zone_at(&self, at: TimeOfDay) -> Option<&str> {
        self.zone_splits
            .iter()
            .filter(|s| s.from <= at)
            .last()
            .map(|s| s.zone.as_str())
            .or(self.zone.as_deref())
    }

    /// Add or replace a split, keeping splits sorted by start.
    pub fn add_split(&mut self, from: TimeOfDay, zone: impl Into<String>) {
        let zone = zone.into();
        match self.zone_splits.iter_mut().find(|s| s.from == from) {
            Some(existing) => existing.zone = zone,
            None => {
                self.zone_splits.push(ZoneSplit { from, zone });
                self.zone_splits.sort_by_key(|s| s.from);
            }
        }
    }

    /// Every zone this record mentions, main zone first.
    pub fn zone_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.zone.iter().map(String::as_str).chain(self.zone_splits.iter().map(|s| s.zone.as_str())) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Text for the FOCUSES column, e.g. `Adults / Cashiers`.
    pub fn zone_label(&self) -> String {
        self.zone_names().join(" / ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_clock;

    #[test]
    fn test_manual_entry() {
        let record = ScheduleRecord::manual(" Doe, Jane ", "9A-5P", Some("12P-1230P"), 4).unwrap();
        assert_eq!(record.employee_name, "Doe, Jane");
        assert_eq!(record.shift_text(), "9A-5P");
        assert_eq!(record.break_text(), "12P-1230P");
        assert_eq!(record.order, 4);
        assert!(record.zone.is_none());

        let split = ScheduleRecord::manual("Roe, Rick", "10A-2P / 3P-7P", None, 0).unwrap();
        assert_eq!(split.shift_text(), "10A-7P");
        assert_eq!(split.break_text(), "2P-3P");

        assert!(ScheduleRecord::manual("", "9A-5P", None, 0).is_err());
        assert!(ScheduleRecord::manual("X", "9A-9A", None, 0).is_err());
        assert!(ScheduleRecord::manual("X", "nine to five", None, 0).is_err());
    }

    #[test]
    fn test_zone_at_follows_splits() {
        let mut record = ScheduleRecord::manual("Doe, Jane", "9A-5P", None, 0).unwrap();
        assert_eq!(record.zone_at(parse_clock("10A").unwrap()), None);

        record.zone = Some("Adults".to_string());
        record.add_split(parse_clock("1P").unwrap(), "Cashiers");
        record.add_split(parse_clock("3P").unwrap(), "Shipment");
        record.add_split(parse_clock("1P").unwrap(), "Operation");

        assert_eq!(record.zone_at(parse_clock("9A").unwrap()), Some("Adults"));
        assert_eq!(record.zone_at(parse_clock("1P").unwrap()), Some("Operation"));
        assert_eq!(record.zone_at(parse_clock("430P").unwrap()), Some("Shipment"));
        assert_eq!(record.zone_label(), "Adults / Operation / Shipment");
    }
}
