use anyhow::Result;
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use shared::{
    error::ServiceRejection,
    protocol::{AnalysisResult, ScreeningResponse, FILE_FIELD},
};
use tracing::{info, warn};
use url::Url;

pub mod affordances;
pub mod controller;
pub mod error;
pub mod settings;

pub use affordances::{Affordances, DragEvent, SelectedFile};
pub use controller::{NoticeQueue, Notifier, UiState, UploadController};
pub use error::AnalysisError;
pub use settings::{load_settings, load_settings_from, Settings};

/// One submission: the selected file, sent as the multipart field `file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    file: SelectedFile,
}

impl AnalysisRequest {
    pub fn new(file: SelectedFile) -> Self {
        Self { file }
    }

    pub fn field_name(&self) -> &'static str {
        FILE_FIELD
    }

    pub fn file(&self) -> &SelectedFile {
        &self.file
    }

    pub fn into_file(self) -> SelectedFile {
        self.file
    }
}

#[async_trait]
pub trait ScreeningService: Send + Sync {
    async fn screen(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}

/// Screening Service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpScreeningService {
    http: Client,
    endpoint: Url,
}

impl HttpScreeningService {
    pub fn new(server_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self> {
        Ok(Self {
            http,
            endpoint: settings::screen_endpoint(server_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ScreeningService for HttpScreeningService {
    async fn screen(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let field = request.field_name();
        let file = request.into_file();
        let mime_type = file.mime_type();
        info!(
            endpoint = %self.endpoint,
            filename = %file.name,
            size = file.bytes.len(),
            %mime_type,
            "screening: submitting audio"
        );

        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(&mime_type)?;
        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(Form::new().part(field, part))
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        info!(status = status.as_u16(), bytes = body.len(), "screening: response received");

        interpret_response(status, &body)
    }
}

/// Maps a status and raw body onto the outcome the controller renders.
fn interpret_response(status: StatusCode, body: &[u8]) -> Result<AnalysisResult, AnalysisError> {
    let parsed = ScreeningResponse::from_slice(body);
    let code = Some(status.as_u16());

    if !status.is_success() {
        let rejection = match parsed {
            Ok(ScreeningResponse::Rejected(body)) => ServiceRejection::from_body(code, body),
            Ok(ScreeningResponse::Analysis(_)) | Err(_) => ServiceRejection::generic(code),
        };
        warn!(status = status.as_u16(), "screening: service rejected request: {rejection}");
        return Err(rejection.into());
    }

    match parsed {
        Ok(ScreeningResponse::Analysis(result)) => Ok(result),
        Ok(ScreeningResponse::Rejected(body)) => Err(ServiceRejection::from_body(code, body).into()),
        Err(err) => Err(AnalysisError::Transport(format!(
            "invalid response from screening service: {err}"
        ))),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
