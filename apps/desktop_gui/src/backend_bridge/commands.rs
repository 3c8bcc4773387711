//! Backend commands queued from UI to backend worker.

use shared::{domain::RequestId, protocol::AnalyzeRequest};

pub enum BackendCommand {
    /// Carries the id it was issued under so the reply can be checked for staleness.
    Analyze {
        request_id: RequestId,
        request: AnalyzeRequest,
    },
    CheckStatus,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Analyze { .. } => "analyze",
            Self::CheckStatus => "check_status",
        }
    }
}
