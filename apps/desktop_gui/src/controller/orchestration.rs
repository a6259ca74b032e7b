//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{AnalysisSession, SubmitStart};
use crossbeam_channel::{Sender, TrySendError};
use shared::error::AnalysisError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::status_for_failure;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Result<(), AnalysisError> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Err(AnalysisError::transport("ui->backend command queue is full"))
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure)"
                    .to_string();
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            Err(AnalysisError::transport(
                "ui->backend command queue disconnected",
            ))
        }
    }
}

/// The trigger's action. A command that cannot be queued ends the cycle at once, so
/// the session never stays in `Loading` without a request behind it.
pub fn submit_analysis(
    session: &mut AnalysisSession,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) {
    match session.begin_submit() {
        SubmitStart::Dispatch(query) => {
            *status = format!(
                "Requesting analysis for {} vs {}",
                query.previous_date, query.current_date
            );
            if let Err(err) =
                dispatch_backend_command(cmd_tx, BackendCommand::Analyze { query }, status)
            {
                session.complete(Err(err));
            }
        }
        SubmitStart::Rejected => {
            if let Some(err) = session.state().failure() {
                *status = status_for_failure(err);
            }
        }
        SubmitStart::Busy => {}
    }
}
