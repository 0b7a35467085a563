/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Error types shared by the whole crate
//!
//! Every failure surfaces as one of a few distinct kinds:
//! - [`AppError::Configuration`] for missing sites, credentials or bad values
//! - [`AppError::Authentication`] for a failed legacy login
//! - [`AppError::Protocol`] for any `ajax.php` call that does not succeed
//! - [`AppError::Storage`] for the on-disk preference store

use thiserror::Error;

/// Main error type for the library
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The configuration source is unusable for the requested site
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The legacy form login was rejected or could not complete
    #[error("authentication error: {0}")]
    Authentication(String),
    /// An API call failed at the transport, JSON or status level
    #[error("protocol error: {0}")]
    Protocol(String),
    /// Reading or writing the preference store failed
    #[error("storage error: {0}")]
    Storage(String),
}

/// Coarse category of an [`AppError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`AppError::Configuration`]
    Configuration,
    /// See [`AppError::Authentication`]
    Authentication,
    /// See [`AppError::Protocol`]
    Protocol,
    /// See [`AppError::Storage`]
    Storage,
}

impl AppError {
    /// Returns the category of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Configuration(_) => ErrorKind::Configuration,
            AppError::Authentication(_) => ErrorKind::Authentication,
            AppError::Protocol(_) => ErrorKind::Protocol,
            AppError::Storage(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn authentication(message: impl Into<String>) -> Self {
        AppError::Authentication(message.into())
    }

    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        AppError::Protocol(message.into())
    }

    pub(crate) fn storage(message: impl Into<String>) -> Self {
        AppError::Storage(message.into())
    }
}

/// Result alias used across the crate
pub type GazelleResult<T> = Result<T, AppError>;
