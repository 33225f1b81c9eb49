use thiserror::Error;

/// Failures surfaced by the playbook core.
///
/// Per-row problems during import are not errors; they are collected as
/// [`RowWarning`](crate::import::RowWarning) values instead.
#[derive(Debug, Error)]
pub enum PlaybookError {
    /// The export's structure cannot be read (missing header, missing day column).
    #[error("Unreadable schedule export: {0}")]
    ParseFatal(String),

    /// The time slot axis configuration is invalid.
    #[error("Invalid time axis: {0}")]
    Configuration(String),

    #[error("Invalid time: {0}")]
    Time(String),

    #[error("Zone error: {0}")]
    Zone(String),

    #[error("Edit error: {0}")]
    Edit(String),

    #[error("Could not read workbook: {0}")]
    Workbook(String),

    #[error("Could not write playbook: {0}")]
    Export(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<calamine::Error> for PlaybookError {
    fn from(err: calamine::Error) -> Self {
        PlaybookError::Workbook(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for PlaybookError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        PlaybookError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlaybookError>;

pub fn parse_fatal(message: impl Into<String>) -> PlaybookError {
    PlaybookError::ParseFatal(message.into())
}

pub fn time_error(message: impl Into<String>) -> PlaybookError {
    PlaybookError::Time(message.into())
}

pub fn zone_error(message: impl Into<String>) -> PlaybookError {
    PlaybookError::Zone(message.into())
}

pub fn edit_error(message: impl Into<String>) -> PlaybookError {
    PlaybookError::Edit(message.into())
}
