//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{AnalysisBackend, AnalysisClient, ClientSettings};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                return;
            }
        };

        let client = match AnalysisClient::new(&settings) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                tracing::error!("failed to build analysis client: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err}"),
                )));
                return;
            }
        };

        let _ = ui_tx.try_send(UiEvent::BackendReady {
            base_url: client.base_url().to_string(),
        });

        while let Ok(cmd) = cmd_rx.recv() {
            spawn_command(&runtime, Arc::clone(&client), ui_tx.clone(), cmd);
        }
        tracing::debug!("ui command channel closed; backend worker exiting");
    });
}

/// Each command runs as its own task so a slow call never blocks a newer one.
fn spawn_command(
    runtime: &tokio::runtime::Runtime,
    client: Arc<AnalysisClient>,
    ui_tx: Sender<UiEvent>,
    cmd: BackendCommand,
) {
    runtime.spawn(async move {
        let event = match cmd {
            BackendCommand::Analyze {
                request_id,
                request,
            } => {
                let outcome = client.analyze(&request).await;
                UiEvent::AnalysisFinished {
                    request_id,
                    outcome,
                }
            }
            BackendCommand::CheckStatus => {
                UiEvent::StatusChecked(client.status().await.map_err(|err| err.to_string()))
            }
        };
        if ui_tx.send(event).is_err() {
            tracing::debug!("ui event channel closed; dropping backend event");
        }
    });
}
