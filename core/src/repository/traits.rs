use crate::config::PlaybookConfig;
use crate::model::DaySession;
use anyhow::Result;

pub trait ConfigRepository {
    /// Never fails on a missing or unreadable file; falls back to defaults.
    fn load(&self) -> Result<PlaybookConfig>;
    fn save(&self, config: &PlaybookConfig) -> Result<()>;
}

pub trait SessionRepository {
    fn load(&self) -> Result<Option<DaySession>>;
    fn save(&self, session: &DaySession) -> Result<()>;
    fn clear(&self) -> Result<()>;
}
