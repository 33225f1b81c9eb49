use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use chrono::Weekday;
use log::info;

use crate::config::PlaybookConfig;
use crate::export::XlsxPlaybookWriter;
use crate::import::{load_sheet, DayColumn, ImportParser};
use crate::model::{DaySession, TimeSlotAxis};
use crate::repository::{ConfigRepository, SessionRepository};
use crate::service::{GridResolver, PlaybookExporter, PlaybookSheet, RecordCommand, Roster};

/// Load a day, edit it, print it. Every step persists the session.
pub struct DailyPlaybookUseCase<'a, C: ConfigRepository, S: SessionRepository> {
    config_repo: &'a C,
    session_repo: &'a S,
}

impl<'a, C: ConfigRepository, S: SessionRepository> DailyPlaybookUseCase<'a, C, S> {
    pub fn new(config_repo: &'a C, session_repo: &'a S) -> Self {
        Self {
            config_repo,
            session_repo,
        }
    }

    pub fn available_days(&self, path: &Path) -> Result<Vec<DayColumn>> {
        let sheet = load_sheet(path)?;
        Ok(ImportParser::new().available_days(&sheet)?)
    }

    /// Import `day` from `path` into a fresh session, replacing any previous one.
    pub fn load_day(&self, path: &Path, day: Weekday) -> Result<DaySession> {
        let sheet = load_sheet(path)?;
        let import = ImportParser::new().parse_day(&sheet, day)?;

        let session = DaySession {
            source: path.to_path_buf(),
            day: import.day,
            period: import.period,
            roster: Roster::new(import.records),
            warnings: import.warnings,
        };
        self.session_repo.save(&session)?;

        let mut config = self.config_repo.load()?;
        config.last_import_dir = path.parent().map(Path::to_path_buf);
        self.config_repo.save(&config)?;
        Ok(session)
    }

    pub fn current_session(&self) -> Result<DaySession> {
        self.session_repo
            .load()?
            .ok_or_else(|| anyhow!("No day loaded. Run `playbook load <file> --day <day>` first"))
    }

    /// Apply one edit and persist it. A rejected edit leaves the stored session as it was.
    pub fn edit(&self, command: RecordCommand) -> Result<DaySession> {
        let mut session = self.current_session()?;
        let config = self.config_repo.load()?;
        session.roster.apply(command, &config.zones)?;
        self.session_repo.save(&session)?;
        Ok(session)
    }

    pub fn build_sheet(&self, session: &DaySession, config: &PlaybookConfig) -> Result<(TimeSlotAxis, PlaybookSheet)> {
        let records = session.roster.records();
        let axis = config.axis_for(records.iter().map(|r| r.shift))?;
        let resolved = GridResolver::new(&axis, &config.zones).resolve_all(records);
        let sheet = PlaybookExporter::new().build(session.header(), &axis, &resolved, &config.zones);
        Ok((axis, sheet))
    }

    /// Write the playbook and return where it went. `output` may be a file or a directory.
    pub fn generate(&self, output: Option<&Path>) -> Result<PathBuf> {
        let session = self.current_session()?;
        let mut config = self.config_repo.load()?;
        let (_, sheet) = self.build_sheet(&session, &config)?;

        let file_name = session.header().file_name();
        let path = match output {
            Some(p) if p.is_dir() => p.join(&file_name),
            Some(p) => p.to_path_buf(),
            None => config
                .last_output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(&file_name),
        };

        XlsxPlaybookWriter::new()
            .with_period(session.period.clone())
            .write(&sheet, &path)?;
        info!("Generated playbook for {} at {}", session.day.label(), path.display());

        config.last_output_dir = path.parent().filter(|p| !p.as_os_str().is_empty()).map(Path::to_path_buf);
        self.config_repo.save(&config)?;
        Ok(path)
    }
}
