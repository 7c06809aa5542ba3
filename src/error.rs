use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record at {}:{line_number}: {reason} (line: '{line}')", path.display())]
    MalformedRecord {
        path: PathBuf,
        line_number: usize,
        line: String,
        reason: RecordError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Processing exceeded the {millis}ms deadline")]
    Timeout { millis: u64 },

    #[error("Processing cancelled")]
    Cancelled,

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ProcessingError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProcessingError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why a single line could not be turned into a `(station, tenths)` pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing ';' delimiter")]
    MissingDelimiter,

    #[error("empty station name")]
    EmptyStation,

    #[error("invalid temperature '{0}'")]
    InvalidTemperature(String),

    #[error("temperature '{0}' is out of range")]
    TemperatureOutOfRange(String),
}
