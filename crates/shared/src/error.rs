use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GENERIC_SERVER_ERROR: &str = "Server error";

/// Failure payload returned by the Screening Service alongside a non-success status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScreeningErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ServiceRejection {
    pub status: Option<u16>,
    pub message: String,
}

impl ServiceRejection {
    /// Builds a rejection from whatever the service said, falling back to the generic message
    /// when the body carried no usable text.
    pub fn from_body(status: Option<u16>, body: ScreeningErrorBody) -> Self {
        let message = body
            .error
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
        Self { status, message }
    }

    pub fn generic(status: Option<u16>) -> Self {
        Self::from_body(status, ScreeningErrorBody::default())
    }
}
