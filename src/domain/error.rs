use super::{HostId, TriggerId};
use thiserror::Error;

/// Conditions that abort a run. Problems with individual triggers are not
/// errors; they are recorded as [`Outcome`](super::Outcome)s in the report.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Parent trigger {0} not found")]
    ParentNotFound(TriggerId),

    #[error("Parent trigger {0} originates from a discovery rule and cannot be a dependency target")]
    InvalidParent(TriggerId),

    #[error("Host {0} not found")]
    HostNotFound(HostId),

    #[error("Failed to reach the Zabbix API: {0}")]
    Connection(String),

    #[error("API error in {method}: {message} {data}")]
    Api {
        method: String,
        code: i64,
        message: String,
        data: String,
    },

    #[error("Unexpected response from {method}: {reason}")]
    Decode { method: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    pub fn connection(reason: impl ToString) -> Self {
        Self::Connection(reason.to_string())
    }

    pub fn decode(method: &str, reason: impl ToString) -> Self {
        Self::Decode {
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Message suitable for a per-trigger failure entry. For remote rejections
    /// this is what Zabbix said, without the method prefix.
    pub fn reason(&self) -> String {
        match self {
            Self::Api { message, data, .. } if data.is_empty() => message.clone(),
            Self::Api { message, data, .. } => format!("{message} {data}"),
            other => other.to_string(),
        }
    }
}
