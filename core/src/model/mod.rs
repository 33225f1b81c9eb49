pub mod axis;
pub mod record;
pub mod session;
pub mod zone;

pub use axis::{Slot, TimeSlotAxis, SLOT_MINUTES};
pub use record::{ScheduleRecord, ZoneSplit};
pub use session::DaySession;
pub use zone::{Rgb, Zone, ZoneConfig, UNASSIGNED_COLOR};
