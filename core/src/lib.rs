pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::PlaybookConfig;
pub use error::{PlaybookError, Result};
pub use export::XlsxPlaybookWriter;
pub use import::{load_sheet, DayColumn, DayImport, ImportParser, RawCell, RawSheet, RowWarning, SkipReason};
pub use input::{parse_args, resolve_prefix, ParsedInput};
pub use model::{DaySession, Rgb, ScheduleRecord, Slot, TimeSlotAxis, Zone, ZoneConfig, UNASSIGNED_COLOR};
pub use repository::{ConfigRepository, FileConfigRepository, FileSessionRepository, SessionRepository};
pub use service::{
    GridResolver, LegendEntry, PlaybookExporter, PlaybookSheet, RecordCommand, ResolvedRow, Roster, SheetHeader,
    SlotState,
};
pub use time::{parse_clock, parse_range, parse_shift, parse_weekday, weekday_name, Interval, TimeOfDay};
