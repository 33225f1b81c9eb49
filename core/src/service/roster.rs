use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{edit_error, Result};
use crate::input::resolve_prefix;
use crate::model::{ScheduleRecord, ZoneConfig};
use crate::time::TimeOfDay;

/// An edit to the day's record list.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordCommand {
    Add(ScheduleRecord),
    AssignZone { id: Uuid, zone: String },
    ClearZone { id: Uuid },
    SplitZone { id: Uuid, from: TimeOfDay, zone: String },
    ClearSplits { id: Uuid },
    MoveUp(Uuid),
    MoveDown(Uuid),
    /// Zero-based target position, clamped to the list.
    MoveTo { id: Uuid, position: usize },
    Remove(Uuid),
}

/// The ordered records of one day session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Roster {
    records: Vec<ScheduleRecord>,
}

impl Roster {
    /// Records are kept sorted by `order`; import orders (sheet rows) survive until the first reorder.
    pub fn new(mut records: Vec<ScheduleRecord>) -> Self {
        records.sort_by_key(|r| r.order);
        Self { records }
    }

    pub fn records(&self) -> &[ScheduleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&ScheduleRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Case-insensitive exact or unique-prefix match on employee name.
    pub fn find_by_name(&self, query: &str) -> Result<&ScheduleRecord> {
        let names: Vec<&str> = self.records.iter().map(|r| r.employee_name.as_str()).collect();
        let name = resolve_prefix(query, &names).map_err(|e| edit_error(e.to_string()))?;
        self.records
            .iter()
            .find(|r| r.employee_name == name)
            .ok_or_else(|| edit_error(format!("Unknown employee: '{}'", query)))
    }

    pub fn next_order(&self) -> usize {
        self.records.iter().map(|r| r.order + 1).max().unwrap_or(0)
    }

    pub fn apply(&mut self, command: RecordCommand, zones: &ZoneConfig) -> Result<()> {
        match command {
            RecordCommand::Add(mut record) => {
                record.order = self.next_order();
                debug!("Adding {} at order {}", record.employee_name, record.order);
                self.records.push(record);
            }
            RecordCommand::AssignZone { id, zone } => {
                let zone = known_zone(zones, &zone)?;
                self.record_mut(id)?.zone = Some(zone);
            }
            RecordCommand::ClearZone { id } => {
                let record = self.record_mut(id)?;
                record.zone = None;
                record.zone_splits.clear();
            }
            RecordCommand::SplitZone { id, from, zone } => {
                let zone = known_zone(zones, &zone)?;
                let record = self.record_mut(id)?;
                if !record.shift.contains(from) {
                    return Err(edit_error(format!(
                        "{} is outside {}'s shift {}",
                        from,
                        record.employee_name,
                        record.shift_text()
                    )));
                }
                record.add_split(from, zone);
            }
            RecordCommand::ClearSplits { id } => self.record_mut(id)?.zone_splits.clear(),
            RecordCommand::MoveUp(id) => {
                let pos = self.position(id)?;
                if pos == 0 {
                    return Ok(());
                }
                self.records.swap(pos, pos - 1);
                self.renumber();
            }
            RecordCommand::MoveDown(id) => {
                let pos = self.position(id)?;
                if pos + 1 >= self.records.len() {
                    return Ok(());
                }
                self.records.swap(pos, pos + 1);
                self.renumber();
            }
            RecordCommand::MoveTo { id, position } => {
                let pos = self.position(id)?;
                let record = self.records.remove(pos);
                let target = position.min(self.records.len());
                self.records.insert(target, record);
                self.renumber();
            }
            RecordCommand::Remove(id) => {
                let pos = self.position(id)?;
                let removed = self.records.remove(pos);
                debug!("Removed {}", removed.employee_name);
                self.renumber();
            }
        }
        Ok(())
    }

    fn position(&self, id: Uuid) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| edit_error(format!("Record with ID {} not found", id)))
    }

    fn record_mut(&mut self, id: Uuid) -> Result<&mut ScheduleRecord> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| edit_error(format!("Record with ID {} not found", id)))
    }

    fn renumber(&mut self) {
        for (i, record) in self.records.iter_mut().enumerate() {
            record.order = i;
        }
    }
}

fn known_zone(zones: &ZoneConfig, query: &str) -> Result<String> {
    Ok(zones.resolve_name(query)?.name.clone())
}
