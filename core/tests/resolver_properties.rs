use playbook_core::{GridResolver, Interval, ScheduleRecord, SlotState, TimeOfDay, TimeSlotAxis, ZoneConfig};
use proptest::prelude::*;

const AXIS_END: u16 = 23 * 60 + 30;

fn tod(minutes: u16) -> TimeOfDay {
    TimeOfDay::from_minutes(minutes).unwrap()
}

fn full_day_axis() -> TimeSlotAxis {
    TimeSlotAxis::new(TimeOfDay::MIDNIGHT, tod(AXIS_END)).unwrap()
}

fn record(shift: (u16, u16), break_time: (u16, u16)) -> ScheduleRecord {
    let shift = Interval::new(tod(shift.0), tod(shift.1)).unwrap();
    let break_time = Interval::new(tod(break_time.0), tod(break_time.1)).unwrap();
    ScheduleRecord::new("Doe, Jane", shift, break_time, 0)
}

/// A non-empty shift inside the axis.
fn shift_strategy() -> impl Strategy<Value = (u16, u16)> {
    (0..AXIS_END - 1).prop_flat_map(|start| (Just(start), start + 1..=AXIS_END))
}

proptest! {
    /// Empty exactly when the slot and the shift do not overlap (half-open).
    #[test]
    fn prop_empty_iff_no_overlap(shift in shift_strategy(), break_start in 0..AXIS_END, break_len in 0u16..90) {
        let break_end = (break_start + break_len).min(AXIS_END);
        let record = record(shift, (break_start, break_end));
        let axis = full_day_axis();
        let zones = ZoneConfig::defaults();
        let states = GridResolver::new(&axis, &zones).resolve(&record);

        prop_assert_eq!(states.len(), axis.len());
        for (slot, state) in axis.slots().iter().zip(&states) {
            let overlaps = slot.start().minutes() < shift.1 && shift.0 < slot.end().minutes();
            prop_assert_eq!(*state == SlotState::Empty, !overlaps);
        }
    }

    /// Any non-empty break inside the shift shows up, and only where it overlaps.
    #[test]
    fn prop_break_marks_only_its_slots(shift in shift_strategy(), offset in 0u16..600, len in 1u16..120) {
        prop_assume!(shift.1 - shift.0 >= len);
        let break_start = shift.0 + offset.min(shift.1 - shift.0 - len);
        let break_end = break_start + len;
        let record = record(shift, (break_start, break_end));
        let axis = full_day_axis();
        let zones = ZoneConfig::defaults();
        let states = GridResolver::new(&axis, &zones).resolve(&record);

        prop_assert!(states.contains(&SlotState::OnBreak));
        for (slot, state) in axis.slots().iter().zip(&states) {
            if *state == SlotState::OnBreak {
                prop_assert!(slot.start().minutes() < break_end && break_start < slot.end().minutes());
            }
        }
    }

    /// Resolving twice yields the same grid.
    #[test]
    fn prop_resolution_is_idempotent(shift in shift_strategy(), break_start in 0..AXIS_END, break_len in 0u16..90) {
        let break_end = (break_start + break_len).min(AXIS_END);
        let mut record = record(shift, (break_start, break_end));
        record.zone = Some("Cashiers".to_string());
        let axis = full_day_axis();
        let zones = ZoneConfig::defaults();
        let resolver = GridResolver::new(&axis, &zones);

        prop_assert_eq!(resolver.resolve(&record), resolver.resolve(&record));
    }
}
