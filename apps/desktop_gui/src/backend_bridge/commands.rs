//! Backend commands queued from UI to backend worker.

use shared::protocol::AnalyzeQuery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Analyze { query: AnalyzeQuery },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Analyze { .. } => "analyze",
        }
    }
}
