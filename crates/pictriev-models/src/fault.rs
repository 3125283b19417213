//! Service-reported failures.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote command dispatched through the service's query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Face detection, by URL or upload.
    FindFace,
    /// Identity lookup for a detected face.
    Whois,
}

impl Command {
    /// Query-string key selecting the command on the service endpoint.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Command::FindFace => "findface",
            Command::Whois => "whoissim",
        }
    }

    /// Operation name reported in faults, logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::FindFace => "findface",
            Command::Whois => "whois",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure reported by the service in a well-formed response.
///
/// `result` and `msg` are carried verbatim from the response body; `command`
/// is filled in on the client side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ServiceFault {
    pub command: Command,
    pub result: String,
    pub msg: String,
}

impl ServiceFault {
    pub fn new(command: Command, result: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            command,
            result: result.into(),
            msg: msg.into(),
        }
    }

    /// The server message, or the result code when no message was sent.
    pub fn message(&self) -> &str {
        if self.msg.is_empty() {
            &self.result
        } else {
            &self.msg
        }
    }
}

impl fmt::Display for ServiceFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ServiceFault {}
