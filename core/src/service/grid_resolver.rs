use log::warn;
use serde::{Deserialize, Serialize};

use crate::model::{Rgb, ScheduleRecord, Slot, TimeSlotAxis, ZoneConfig};

/// What a single playbook cell shows.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Working(Rgb),
    OnBreak,
}

/// A record paired with its resolved slot states, one per axis slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRow<'r> {
    pub record: &'r ScheduleRecord,
    pub states: Vec<SlotState>,
}

/// Maps records onto the slot axis. Pure: never touches the record or the zones.
pub struct GridResolver<'a> {
    axis: &'a TimeSlotAxis,
    zones: &'a ZoneConfig,
}

impl<'a> GridResolver<'a> {
    pub fn new(axis: &'a TimeSlotAxis, zones: &'a ZoneConfig) -> Self {
        Self { axis, zones }
    }

    pub fn resolve(&self, record: &ScheduleRecord) -> Vec<SlotState> {
        for name in record.zone_names() {
            if self.zones.get(name).is_none() {
                warn!("{}: zone '{}' is not configured", record.employee_name, name);
            }
        }
        let slots = self.axis.slots();
        let mut states: Vec<SlotState> = slots
            .iter()
            .map(|slot| slot_state(record, slot, self.zones))
            .collect();
        if !states.contains(&SlotState::OnBreak) {
            if let Some(i) = short_break_slot(record, slots, &states) {
                states[i] = SlotState::OnBreak;
            }
        }
        states
    }

    pub fn resolve_all<'r>(&self, records: &'r [ScheduleRecord]) -> Vec<ResolvedRow<'r>> {
        records
            .iter()
            .map(|record| ResolvedRow { record, states: self.resolve(record) })
            .collect()
    }
}

/// Half-open overlap decides Empty; the slot midpoint decides OnBreak.
/// A break that holds no midpoint is placed by [`GridResolver::resolve`].
pub fn slot_state(record: &ScheduleRecord, slot: &Slot, zones: &ZoneConfig) -> SlotState {
    if !slot.interval().overlaps(&record.shift) {
        return SlotState::Empty;
    }
    if record.break_time.contains(slot.midpoint()) {
        return SlotState::OnBreak;
    }
    SlotState::Working(zones.color_of(record.zone_at(slot.start())))
}

/// For a break that covers no slot midpoint: the worked slot it overlaps most, earliest on a tie.
fn short_break_slot(record: &ScheduleRecord, slots: &[Slot], states: &[SlotState]) -> Option<usize> {
    let break_time = &record.break_time;
    if break_time.is_empty() || !break_time.overlaps(&record.shift) {
        return None;
    }
    let mut best: Option<(usize, u16)> = None;
    for (i, (slot, state)) in slots.iter().zip(states).enumerate() {
        if *state == SlotState::Empty {
            continue;
        }
        let overlap = slot.interval().overlap_minutes(break_time);
        if overlap > 0 && best.map_or(true, |(_, most)| overlap > most) {
            best = Some((i, overlap));
        }
    }
    best.map(|(i, _)| i)
}
