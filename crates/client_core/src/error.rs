use shared::error::ServiceRejection;
use thiserror::Error;

/// Why an analysis request produced no result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The service answered, but with a failure status or an error payload.
    #[error(transparent)]
    Service(#[from] ServiceRejection),
    /// The request never completed or the answer could not be interpreted.
    #[error("{0}")]
    Transport(String),
}

impl AnalysisError {
    /// Text of the blocking notice shown to the user.
    pub fn notice(&self) -> String {
        format!("Error: {self}")
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
