//! Applies backend events to the analysis session.

use client_core::AnalysisSession;
use shared::error::AnalysisError;

use crate::controller::events::{status_for_failure, UiEvent};

pub fn apply_ui_event(session: &mut AnalysisSession, status: &mut String, event: UiEvent) {
    match event {
        UiEvent::Info(message) => {
            *status = message;
        }
        UiEvent::AnalysisCompleted(outcome) => {
            *status = match &outcome {
                Ok(result) => format!(
                    "Analysis complete: {} of {} stocks passed the filter",
                    result.filtered_stocks.len(),
                    result.processed_count
                ),
                Err(err) => status_for_failure(err),
            };
            session.complete(outcome);
        }
        UiEvent::BackendUnavailable(reason) => {
            tracing::error!("{reason}");
            *status = reason.clone();
            if session.state().is_loading() {
                session.complete(Err(AnalysisError::transport(reason)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use client_core::{RequestState, SubmitStart};
    use shared::domain::{AnalysisResult, DateField, TradingDate};

    use super::*;

    fn loading_session() -> AnalysisSession {
        let mut session = AnalysisSession::new();
        session.set_date(DateField::Previous, TradingDate::parse("2025-05-16"));
        session.set_date(DateField::Current, TradingDate::parse("2025-05-17"));
        assert!(matches!(session.begin_submit(), SubmitStart::Dispatch(_)));
        session
    }

    #[test]
    fn completion_event_leaves_loading() {
        let mut session = loading_session();
        let mut status = String::new();
        let result = AnalysisResult {
            filtered_stocks: Vec::new(),
            processed_count: 150,
            warnings: vec!["Missing instrument key for XYZ".to_string()],
        };

        apply_ui_event(
            &mut session,
            &mut status,
            UiEvent::AnalysisCompleted(Ok(result.clone())),
        );

        assert_eq!(session.state(), &RequestState::Succeeded(result));
        assert_eq!(status, "Analysis complete: 0 of 150 stocks passed the filter");
    }

    #[test]
    fn backend_loss_fails_in_flight_request() {
        let mut session = loading_session();
        let mut status = String::new();

        apply_ui_event(
            &mut session,
            &mut status,
            UiEvent::BackendUnavailable("backend worker startup failure".to_string()),
        );

        assert!(matches!(
            session.state().failure(),
            Some(AnalysisError::Transport { .. })
        ));
    }

    #[test]
    fn info_only_updates_status() {
        let mut session = AnalysisSession::new();
        let mut status = String::new();

        apply_ui_event(&mut session, &mut status, UiEvent::Info("Ready".to_string()));

        assert_eq!(status, "Ready");
        assert_eq!(session.state(), &RequestState::Idle);
    }
}
