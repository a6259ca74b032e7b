//! Request lifecycle for one analyzer window: date selection plus a single in-flight request.

use shared::{
    domain::{AnalysisResult, DateField, DateSelection, TradingDate},
    error::AnalysisError,
    protocol::AnalyzeQuery,
};
use tracing::{debug, error, info, warn};

use crate::AnalysisClient;

/// Exactly one of these holds at a time. Entering `Loading` drops the previous cycle's
/// result or failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded(AnalysisResult),
    Failed(AnalysisError),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&AnalysisError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

/// What `begin_submit` decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStart {
    /// The session is now `Loading`; send this query and hand the outcome to `complete`.
    Dispatch(AnalyzeQuery),
    /// A date was unset; the session is `Failed` and nothing must be sent.
    Rejected,
    /// A request is already in flight; nothing changed.
    Busy,
}

#[derive(Debug, Default)]
pub struct AnalysisSession {
    selection: DateSelection,
    state: RequestState,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &DateSelection {
        &self.selection
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Edits never touch the request state, even while a request is in flight.
    pub fn set_date(&mut self, field: DateField, value: Option<TradingDate>) {
        self.selection.set(field, value);
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_loading() && self.selection.is_complete()
    }

    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.state.is_loading() {
            debug!("submit ignored: analysis request already in flight");
            return SubmitStart::Busy;
        }

        let Some((previous_date, current_date)) = self.selection.pair() else {
            warn!("submit rejected: both dates are required");
            self.state = RequestState::Failed(AnalysisError::MissingDates);
            return SubmitStart::Rejected;
        };

        self.state = RequestState::Loading;
        SubmitStart::Dispatch(AnalyzeQuery {
            previous_date,
            current_date,
        })
    }

    /// Ends the current cycle. This is the only transition out of `Loading`, and the
    /// outcome is applied even if the dates changed since the request went out.
    pub fn complete(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        if !self.state.is_loading() {
            warn!(
                state = self.state.label(),
                "analysis outcome arrived while no request was in flight"
            );
        }

        self.state = match outcome {
            Ok(result) => {
                info!(
                    rows = result.filtered_stocks.len(),
                    processed = result.processed_count,
                    warnings = result.warnings.len(),
                    "analysis cycle succeeded"
                );
                RequestState::Succeeded(result)
            }
            Err(err) => {
                error!("Fetch error: {err}");
                RequestState::Failed(err)
            }
        };
    }

    /// Runs a whole cycle against `client`. Returns once the session has left `Loading`.
    pub async fn submit<C>(&mut self, client: &C)
    where
        C: AnalysisClient + ?Sized,
    {
        if let SubmitStart::Dispatch(query) = self.begin_submit() {
            let outcome = client.analyze(&query).await;
            self.complete(outcome);
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
