//! UI/backend events and error modeling for desktop GUI controller.

use client_core::AnalysisError;
use shared::protocol::AnalysisResult;

pub enum UiEvent {
    BackendReady { endpoint: String },
    AnalysisFinished(Result<AnalysisResult, AnalysisError>),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Configuration,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Dispatch,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid screening server url")
            || message_lower.contains("unsupported scheme")
            || message_lower.contains("relative url")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("connection")
            || message_lower.contains("timed out")
            || message_lower.contains("dns")
            || message_lower.contains("disconnected")
            || message_lower.contains("queue is full")
            || message_lower.contains("runtime")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line guidance for the status bar.
    pub fn hint(&self) -> &'static str {
        match (self.category, self.context) {
            (UiErrorCategory::Configuration, _) => {
                "Check server_url in screening.toml, APP__SERVER_URL, or --server-url and relaunch."
            }
            (UiErrorCategory::Transport, UiErrorContext::BackendStartup) => {
                "The backend worker could not start; relaunch the app."
            }
            (UiErrorCategory::Transport, UiErrorContext::Dispatch) => {
                "The request could not be queued; try again."
            }
            (UiErrorCategory::Unknown, _) => "Unexpected backend failure.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_bad_server_url_as_configuration() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "backend worker startup failure: invalid screening server url 'nope': relative URL without a base",
        );
        assert_eq!(err.category(), UiErrorCategory::Configuration);
        assert!(err.hint().contains("server_url"));
    }

    #[test]
    fn classifies_disconnected_processor_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::Dispatch,
            "Backend command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::Dispatch);
    }

    #[test]
    fn unknown_messages_keep_their_text() {
        let err = UiError::from_message(UiErrorContext::BackendStartup, "something odd");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.message(), "something odd");
    }
}
