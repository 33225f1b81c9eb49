use log::warn;

use crate::error::{PlaybookError, Result};
use crate::time::{Interval, TimeOfDay};

pub const SLOT_MINUTES: u16 = 30;

/// One half-open column of the playbook: `[start, start + 30m)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    interval: Interval,
}

impl Slot {
    pub fn start(&self) -> TimeOfDay {
        self.interval.start()
    }

    pub fn end(&self) -> TimeOfDay {
        self.interval.end()
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    pub fn midpoint(&self) -> TimeOfDay {
        let mid = self.start().minutes() + self.interval.duration_minutes() / 2;
        // Always inside [start, end), which is itself inside the day.
        TimeOfDay::from_minutes(mid).unwrap_or(self.start())
    }

    pub fn label(&self) -> String {
        self.start().format_short()
    }
}

/// Fixed half-hour columns covering the printable window.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlotAxis {
    slots: Vec<Slot>,
}

impl TimeSlotAxis {
    /// Slots covering `[start, end)`. A trailing partial slot is dropped, not padded.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start >= end {
            return Err(PlaybookError::Configuration(format!(
                "window start {} must be before end {}",
                start, end
            )));
        }

        let span = end.minutes() - start.minutes();
        let count = span / SLOT_MINUTES;
        if count == 0 {
            return Err(PlaybookError::Configuration(format!(
                "window {} - {} is shorter than one {}-minute slot",
                start, end, SLOT_MINUTES
            )));
        }
        if span % SLOT_MINUTES != 0 {
            warn!(
                "Window {} - {} is not a whole number of slots; dropping the last {} minutes",
                start,
                end,
                span % SLOT_MINUTES
            );
        }

        let mut slots = Vec::with_capacity(usize::from(count));
        for i in 0..count {
            let slot_start = TimeOfDay::from_minutes(start.minutes() + i * SLOT_MINUTES)?;
            let slot_end = TimeOfDay::from_minutes(slot_start.minutes() + SLOT_MINUTES)?;
            slots.push(Slot { interval: Interval::new(slot_start, slot_end)? });
        }
        Ok(Self { slots })
    }

    /// The configured window, widened to whole hours so every shift fits.
    /// Never narrower than the configured window.
    pub fn fitted<I>(window_start: TimeOfDay, window_end: TimeOfDay, shifts: I) -> Result<Self>
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut start = window_start.minutes();
        let mut end = window_end.minutes();
        for shift in shifts.into_iter().filter(|s| !s.is_empty()) {
            start = start.min(shift.start().minutes() / 60 * 60);
            end = end.max(shift.end().minutes().div_ceil(60) * 60);
        }
        // 24:00 is not a time of day; the last representable boundary is 23:30.
        let last_boundary = TimeOfDay::LAST_MINUTE.minutes() / SLOT_MINUTES * SLOT_MINUTES;
        let end = end.min(last_boundary.max(window_end.minutes()));
        Self::new(TimeOfDay::from_minutes(start)?, TimeOfDay::from_minutes(end)?)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.slots.iter().map(Slot::label).collect()
    }
}
