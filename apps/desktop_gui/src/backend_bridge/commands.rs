//! Backend commands queued from UI to backend worker.

use client_core::AnalysisRequest;

pub enum BackendCommand {
    Screen { request: AnalysisRequest },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Screen { .. } => "screen",
        }
    }
}
