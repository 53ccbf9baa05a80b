use thiserror::Error;

use crate::prescriptions::SlotKey;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not logged in")]
    Unauthenticated,

    #[error("Session is invalid")]
    InvalidSession,

    #[error("Request failed: {operation}")]
    RequestFailed {
        operation: &'static str,
        status: Option<u16>,
    },

    #[error("{message}")]
    RequestFailedWithMessage {
        operation: &'static str,
        status: u16,
        message: String,
    },

    #[error("Prescription {slot} was deleted but could not be recreated")]
    PartialFailure {
        slot: SlotKey,
        #[source]
        source: Box<Error>,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Request timed out: {operation}")]
    TimedOut { operation: &'static str },

    #[error("Request cancelled: {operation}")]
    Cancelled { operation: &'static str },

    #[error("Unexpected response body: {operation}")]
    MalformedResponse { operation: &'static str },

    #[error("Could not store session token")]
    Storage,
}

/// Payload-free classification of [`Error`], for mapping failures to messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    Unauthenticated,
    InvalidSession,
    RequestFailed,
    RequestFailedWithMessage,
    PartialFailure,
    Validation,
    TimedOut,
    Cancelled,
    MalformedResponse,
    Storage,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Unauthenticated => ErrorKind::Unauthenticated,
            Error::InvalidSession => ErrorKind::InvalidSession,
            Error::RequestFailed { .. } => ErrorKind::RequestFailed,
            Error::RequestFailedWithMessage { .. } => ErrorKind::RequestFailedWithMessage,
            Error::PartialFailure { .. } => ErrorKind::PartialFailure,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::TimedOut { .. } => ErrorKind::TimedOut,
            Error::Cancelled { .. } => ErrorKind::Cancelled,
            Error::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Error::Storage => ErrorKind::Storage,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation { message: message.into() }
    }

    /// True when the session must be re-established before retrying.
    pub fn requires_login(&self) -> bool {
        matches!(self, Error::Unauthenticated | Error::InvalidSession)
    }
}
