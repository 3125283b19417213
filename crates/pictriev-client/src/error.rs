//! Pictriev client error types.

use pictriev_models::ServiceFault;
use thiserror::Error;

pub type PictrievResult<T> = Result<T, PictrievError>;

/// Errors that can occur while talking to the Pictriev service.
///
/// None of these are retried by the client.
#[derive(Debug, Error)]
pub enum PictrievError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server does not respond properly: HTTP {0}")]
    BadStatus(u16),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Fault(#[from] ServiceFault),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PictrievError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl PictrievError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True if the service itself reported the failure.
    pub fn is_fault(&self) -> bool {
        matches!(self, PictrievError::Fault(_))
    }

    pub fn as_fault(&self) -> Option<&ServiceFault> {
        match self {
            PictrievError::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// HTTP status of a `BadStatus` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            PictrievError::BadStatus(status) => Some(*status),
            _ => None,
        }
    }

    /// Short label used for the metrics `outcome` dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            PictrievError::Network(_) => "network",
            PictrievError::BadStatus(_) => "bad_status",
            PictrievError::MalformedResponse(_) => "malformed",
            PictrievError::Fault(_) => "fault",
            PictrievError::Io(_) => "io",
            PictrievError::Config(_) => "config",
        }
    }
}
