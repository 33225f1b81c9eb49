pub mod grid_resolver;
pub mod playbook_exporter;
pub mod roster;

pub use grid_resolver::{slot_state, GridResolver, ResolvedRow, SlotState};
pub use playbook_exporter::{
    LegendEntry, Orientation, PageLayout, PlaybookExporter, PlaybookSheet, SheetHeader, SheetRow,
};
pub use roster::{RecordCommand, Roster};
