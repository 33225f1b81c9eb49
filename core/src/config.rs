use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{TimeSlotAxis, ZoneConfig};
use crate::time::{Interval, TimeOfDay};

fn default_window_start() -> TimeOfDay {
    TimeOfDay::from_hm(9, 0).unwrap_or(TimeOfDay::MIDNIGHT)
}

fn default_window_end() -> TimeOfDay {
    TimeOfDay::from_hm(21, 0).unwrap_or(TimeOfDay::LAST_MINUTE)
}

fn default_true() -> bool {
    true
}

/// User settings persisted between sessions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlaybookConfig {
    #[serde(default)]
    pub zones: ZoneConfig,
    #[serde(default = "default_window_start")]
    pub window_start: TimeOfDay,
    #[serde(default = "default_window_end")]
    pub window_end: TimeOfDay,
    #[serde(default = "default_true")]
    pub fit_window_to_shifts: bool,
    #[serde(default)]
    pub last_import_dir: Option<PathBuf>,
    #[serde(default)]
    pub last_output_dir: Option<PathBuf>,
}

impl Default for PlaybookConfig {
    fn default() -> Self {
        Self {
            zones: ZoneConfig::defaults(),
            window_start: default_window_start(),
            window_end: default_window_end(),
            fit_window_to_shifts: true,
            last_import_dir: None,
            last_output_dir: None,
        }
    }
}

impl PlaybookConfig {
    /// The slot axis for a generation run over `shifts`.
    pub fn axis_for<I>(&self, shifts: I) -> Result<TimeSlotAxis>
    where
        I: IntoIterator<Item = Interval>,
    {
        if self.fit_window_to_shifts {
            TimeSlotAxis::fitted(self.window_start, self.window_end, shifts)
        } else {
            TimeSlotAxis::new(self.window_start, self.window_end)
        }
    }
}
