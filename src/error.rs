//! Errors returned by this crate

use thiserror::Error;

use crate::record::RecordId;

/// The broad family an error belongs to.
///
/// Callers that only want to decide how to present a failure (e.g. "fix your input", "sign in again", "try later")
/// can match on this instead of on every [`CalendarError`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    RemoteFailure,
    Unauthenticated,
    Config,
}

#[derive(Error, Debug)]
pub enum CalendarError {
    /// A record carries a due date that cannot be read as a calendar day
    #[error("invalid date format {value:?} for record {id}")]
    InvalidDateFormat { id: RecordId, value: String },

    /// A day typed by the user (or given to a month) is not a calendar day
    #[error("invalid day {0:?}")]
    InvalidDay(String),

    #[error("invalid record identifier {0:?}")]
    InvalidRecordId(String),

    #[error("record {0} already exists in the calendar")]
    DuplicateId(RecordId),

    #[error("events have not been loaded yet")]
    NotLoaded,

    #[error("no event is currently selected")]
    NoSelection,

    #[error("no event with id {0}")]
    NotFound(RecordId),

    #[error("remote failure: {0}")]
    RemoteFailure(String),

    #[error("no active session")]
    Unauthenticated,

    #[error("configuration error: {0}")]
    Config(String),
}

impl CalendarError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalendarError::InvalidDateFormat { .. }
            | CalendarError::InvalidDay(_)
            | CalendarError::InvalidRecordId(_)
            | CalendarError::DuplicateId(_)
            | CalendarError::NotLoaded
            | CalendarError::NoSelection => ErrorKind::InvalidInput,
            CalendarError::NotFound(_) => ErrorKind::NotFound,
            CalendarError::RemoteFailure(_) => ErrorKind::RemoteFailure,
            CalendarError::Unauthenticated => ErrorKind::Unauthenticated,
            CalendarError::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<reqwest::Error> for CalendarError {
    fn from(err: reqwest::Error) -> Self {
        CalendarError::RemoteFailure(err.to_string())
    }
}

impl From<serde_json::Error> for CalendarError {
    fn from(err: serde_json::Error) -> Self {
        CalendarError::RemoteFailure(format!("unable to decode the backend reply: {}", err))
    }
}

impl From<url::ParseError> for CalendarError {
    fn from(err: url::ParseError) -> Self {
        CalendarError::Config(format!("invalid backend URL: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;
