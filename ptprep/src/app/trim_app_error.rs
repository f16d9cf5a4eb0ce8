use crate::{io::IoError, model::ScheduleError, zone::ZoneError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrimAppError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error(transparent)]
    IoError {
        #[from]
        source: IoError,
    },
    #[error("failure loading exclusion zone: {source}")]
    ZoneError {
        #[from]
        source: ZoneError,
    },
    #[error("failure trimming schedule: {source}")]
    ScheduleError {
        #[from]
        source: ScheduleError,
    },
    #[error("failure writing report: {0}")]
    ReportError(String),
}
