//! Backend-to-UI events and the failure labels shown in the status line.

use shared::{domain::AnalysisResult, error::AnalysisError};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    AnalysisCompleted(Result<AnalysisResult, AnalysisError>),
    BackendUnavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Transport,
    Remote,
    Decode,
}

impl UiErrorCategory {
    pub fn of(err: &AnalysisError) -> Self {
        match err {
            AnalysisError::MissingDates => Self::Validation,
            AnalysisError::Transport { .. } => Self::Transport,
            AnalysisError::Remote { .. } => Self::Remote,
            AnalysisError::MalformedResponse(_) => Self::Decode,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Validation => "Validation",
            Self::Transport => "Transport",
            Self::Remote => "Service",
            Self::Decode => "Malformed response",
        }
    }
}

/// One-line summary for the status bar; the results view carries the full text.
pub fn status_for_failure(err: &AnalysisError) -> String {
    let category = UiErrorCategory::of(err).label();
    match err {
        AnalysisError::Remote { status, .. } => format!("{category} error (HTTP {status})"),
        _ => format!("{category} error"),
    }
}
