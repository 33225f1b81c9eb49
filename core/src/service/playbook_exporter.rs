use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Rgb, TimeSlotAxis, ZoneConfig};
use crate::service::grid_resolver::{ResolvedRow, SlotState};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SheetHeader {
    pub day_name: String,
    pub date: Option<NaiveDate>,
}

impl SheetHeader {
    pub fn new(day_name: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self { day_name: day_name.into(), date }
    }

    /// `Monday 3/9`, or just `Monday`.
    pub fn title(&self) -> String {
        match self.date {
            Some(date) => format!("{} {}", self.day_name, date.format("%-m/%-d")),
            None => self.day_name.clone(),
        }
    }

    /// `Daily_Playbook_3-9.xlsx`, falling back to the day name.
    pub fn file_name(&self) -> String {
        match self.date {
            Some(date) => format!("Daily_Playbook_{}.xlsx", date.format("%-m-%-d")),
            None => format!("Daily_Playbook_{}.xlsx", self.day_name),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Presentational contract handed to the sheet writer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub orientation: Orientation,
    pub name_width: f64,
    pub shift_width: f64,
    pub break_width: f64,
    pub slot_width: f64,
    pub focus_width: f64,
    pub fit_to_page_width: bool,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            orientation: Orientation::Landscape,
            name_width: 22.0,
            shift_width: 18.0,
            break_width: 10.0,
            slot_width: 5.0,
            focus_width: 12.0,
            fit_to_page_width: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub name: String,
    pub shift_text: String,
    pub break_text: String,
    pub focus: String,
    pub cells: Vec<SlotState>,
    /// Zone worked in each slot, `None` when empty, on break, or unassigned.
    pub cell_zones: Vec<Option<String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub zone: String,
    pub color: Rgb,
}

/// Print-ready description of one day's playbook.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlaybookSheet {
    pub header: SheetHeader,
    pub slot_labels: Vec<String>,
    pub rows: Vec<SheetRow>,
    pub legend: Vec<LegendEntry>,
    pub layout: PageLayout,
}

#[derive(Debug, Clone, Default)]
pub struct PlaybookExporter {
    layout: PageLayout,
}

impl PlaybookExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: PageLayout) -> Self {
        Self { layout }
    }

    /// Lay out resolved rows by `order` (stable for ties). Slot states are
    /// copied as resolved, never recomputed.
    pub fn build(
        &self,
        header: SheetHeader,
        axis: &TimeSlotAxis,
        resolved: &[ResolvedRow<'_>],
        zones: &ZoneConfig,
    ) -> PlaybookSheet {
        let mut ordered: Vec<&ResolvedRow<'_>> = resolved.iter().collect();
        ordered.sort_by_key(|row| row.record.order);

        let rows = ordered
            .iter()
            .map(|row| SheetRow {
                name: row.record.employee_name.clone(),
                shift_text: row.record.shift_text(),
                break_text: row.record.break_text(),
                focus: row.record.zone_label(),
                cells: row.states.clone(),
                cell_zones: axis
                    .slots()
                    .iter()
                    .zip(&row.states)
                    .map(|(slot, state)| match state {
                        SlotState::Working(_) => row.record.zone_at(slot.start()).map(str::to_string),
                        _ => None,
                    })
                    .collect(),
            })
            .collect();

        // Configured zones that at least one record uses, in configuration order.
        let legend = zones
            .zones()
            .iter()
            .filter(|zone| {
                resolved
                    .iter()
                    .any(|row| row.record.zone_names().contains(&zone.name.as_str()))
            })
            .map(|zone| LegendEntry { zone: zone.name.clone(), color: zone.color })
            .collect();

        PlaybookSheet {
            header,
            slot_labels: axis.labels(),
            rows,
            legend,
            layout: self.layout.clone(),
        }
    }
}
