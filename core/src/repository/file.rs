use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::PlaybookConfig;
use crate::model::DaySession;
use crate::repository::traits::{ConfigRepository, SessionRepository};

const CONFIG_FILE_NAME: &str = "config.json";
const SESSION_FILE_NAME: &str = "session.json";

/// `base_dir`, or `~/.playbook`, created if missing.
fn data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    let path = match base_dir {
        Some(dir) => dir,
        None => {
            let home_dir = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            home_dir.join(".playbook")
        }
    };
    fs::create_dir_all(&path)?;
    Ok(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

#[derive(Clone)]
pub struct FileConfigRepository {
    file_path: PathBuf,
}

impl FileConfigRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let file_path = data_dir(base_dir)?.join(CONFIG_FILE_NAME);
        Ok(FileConfigRepository { file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigRepository for FileConfigRepository {
    fn load(&self) -> Result<PlaybookConfig> {
        if !self.file_path.exists() {
            debug!("No config at {}, using defaults", self.file_path.display());
            return Ok(PlaybookConfig::default());
        }
        match read_json(&self.file_path) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Ignoring unreadable config {}: {}", self.file_path.display(), e);
                Ok(PlaybookConfig::default())
            }
        }
    }

    fn save(&self, config: &PlaybookConfig) -> Result<()> {
        write_json(&self.file_path, config)
    }
}

#[derive(Clone)]
pub struct FileSessionRepository {
    file_path: PathBuf,
}

impl FileSessionRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let file_path = data_dir(base_dir)?.join(SESSION_FILE_NAME);
        Ok(FileSessionRepository { file_path })
    }
}

impl SessionRepository for FileSessionRepository {
    fn load(&self) -> Result<Option<DaySession>> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let session = read_json(&self.file_path)
            .map_err(|e| anyhow!("Session file {} is corrupt: {}", self.file_path.display(), e))?;
        Ok(Some(session))
    }

    fn save(&self, session: &DaySession) -> Result<()> {
        write_json(&self.file_path, session)
    }

    fn clear(&self) -> Result<()> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path)?;
        }
        Ok(())
    }
}
