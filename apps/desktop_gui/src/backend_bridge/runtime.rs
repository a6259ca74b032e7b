//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::AnalysisClient;
use crossbeam_channel::{Receiver, Sender};
use shared::{domain::AnalysisResult, error::AnalysisError, protocol::AnalyzeQuery};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the backend worker thread. Commands are handled one at a time; every
/// `Analyze` command is answered with exactly one `AnalysisCompleted` event.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    client: Arc<dyn AnalysisClient>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info("Ready".to_string()));

        while let Ok(cmd) = cmd_rx.recv() {
            tracing::debug!(command = cmd.name(), "backend received command");
            match cmd {
                BackendCommand::Analyze { query } => {
                    let outcome = runtime.block_on(run_analysis(Arc::clone(&client), query));
                    if ui_tx.send(UiEvent::AnalysisCompleted(outcome)).is_err() {
                        tracing::debug!("ui event channel closed; stopping backend worker");
                        break;
                    }
                }
            }
        }
    });
}

/// A panic inside the client surfaces as a transport failure rather than a lost reply.
async fn run_analysis(
    client: Arc<dyn AnalysisClient>,
    query: AnalyzeQuery,
) -> Result<AnalysisResult, AnalysisError> {
    let task = tokio::spawn(async move { client.analyze(&query).await });
    match task.await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!("analysis task aborted: {err}");
            Err(AnalysisError::transport(format!(
                "analysis task aborted: {err}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use crossbeam_channel::bounded;
    use shared::domain::{StockChange, TradingDate};

    use super::*;

    struct FixedClient;

    #[async_trait]
    impl AnalysisClient for FixedClient {
        async fn analyze(&self, query: &AnalyzeQuery) -> Result<AnalysisResult, AnalysisError> {
            Ok(AnalysisResult {
                filtered_stocks: vec![StockChange {
                    symbol: query.current_date.to_string(),
                    percent_change: -3.0,
                }],
                processed_count: 1,
                warnings: Vec::new(),
            })
        }
    }

    struct PanickingClient;

    #[async_trait]
    impl AnalysisClient for PanickingClient {
        async fn analyze(&self, _query: &AnalyzeQuery) -> Result<AnalysisResult, AnalysisError> {
            panic!("client blew up");
        }
    }

    fn query() -> AnalyzeQuery {
        AnalyzeQuery {
            previous_date: TradingDate::parse("2025-05-16").expect("date"),
            current_date: TradingDate::parse("2025-05-17").expect("date"),
        }
    }

    fn next_completion(ui_rx: &Receiver<UiEvent>) -> Result<AnalysisResult, AnalysisError> {
        loop {
            match ui_rx
                .recv_timeout(Duration::from_secs(5))
                .expect("backend reply")
            {
                UiEvent::AnalysisCompleted(outcome) => return outcome,
                UiEvent::Info(_) => continue,
                UiEvent::BackendUnavailable(reason) => panic!("backend unavailable: {reason}"),
            }
        }
    }

    #[test]
    fn answers_each_analyze_command_once() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        launch(cmd_rx, ui_tx, Arc::new(FixedClient));

        cmd_tx
            .send(BackendCommand::Analyze { query: query() })
            .expect("send");
        let result = next_completion(&ui_rx).expect("analysis");

        assert_eq!(result.filtered_stocks[0].symbol, "2025-05-17");
        assert!(ui_rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn client_panic_becomes_transport_failure() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        launch(cmd_rx, ui_tx, Arc::new(PanickingClient));

        cmd_tx
            .send(BackendCommand::Analyze { query: query() })
            .expect("send");
        let err = next_completion(&ui_rx).expect_err("should fail");

        assert!(matches!(err, AnalysisError::Transport { .. }));
    }
}
