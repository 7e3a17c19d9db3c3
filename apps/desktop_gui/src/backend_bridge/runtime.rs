//! Backend worker: owns the tokio runtime and the HTTP client, one request at a time.

use std::thread;

use client_core::{HttpScreeningService, ScreeningService};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let service = match HttpScreeningService::new(&server_url) {
            Ok(service) => service,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err:#}"),
                )));
                tracing::error!("invalid screening server url '{server_url}': {err:#}");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::BackendReady {
            endpoint: service.endpoint().to_string(),
        });

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Screen { request } => {
                        let outcome = service.screen(request).await;
                        if ui_tx.send(UiEvent::AnalysisFinished(outcome)).is_err() {
                            tracing::debug!("ui event channel closed; backend worker stopping");
                            break;
                        }
                    }
                }
            }
        });
    });
}
