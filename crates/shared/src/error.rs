use thiserror::Error;

/// Hard failures of one request cycle. The `Display` text is what the results view shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Please select both previous and current dates.")]
    MissingDates,
    /// The request never produced a response. `detail` is for logs only.
    #[error("Failed to fetch data. Ensure the backend server is running.")]
    Transport { detail: String },
    #[error("{message}")]
    Remote { status: u16, message: String },
    #[error("Malformed response from analysis service: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    /// Uses the service's own message when it sent one, else a status-code message.
    pub fn remote(status: u16, structured_message: Option<&str>) -> Self {
        let message = match structured_message {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => format!("HTTP error! Status: {status}"),
        };
        Self::Remote { status, message }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::MissingDates)
    }
}
