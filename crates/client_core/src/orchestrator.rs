//! Lifecycle of the one current analysis request.
//!
//! The orchestrator performs no I/O. [`RequestOrchestrator::submit`] hands back a
//! [`PendingRequest`] that the caller sends to the collaborator; the outcome comes
//! back through [`RequestOrchestrator::resolve`] tagged with the id it was issued
//! under, and is dropped unless that id is still current.

use std::sync::Arc;

use shared::{
    domain::{AnalysisResult, RequestId},
    error::FailureNotice,
    protocol::AnalyzeRequest,
};
use tracing::{debug, info, warn};

use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending {
        request_id: RequestId,
    },
    Succeeded {
        request_id: RequestId,
        result: Arc<AnalysisResult>,
    },
    Failed {
        request_id: RequestId,
        failure: FailureNotice,
    },
}

impl RequestState {
    pub fn phase(&self) -> RequestPhase {
        match self {
            Self::Idle => RequestPhase::Idle,
            Self::Pending { .. } => RequestPhase::Pending,
            Self::Succeeded { .. } => RequestPhase::Succeeded,
            Self::Failed { .. } => RequestPhase::Failed,
        }
    }
}

/// A submission the caller must deliver to the collaborator exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub request_id: RequestId,
    pub request: AnalyzeRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied(RequestPhase),
    /// A newer submission or a clear happened after this call was issued.
    Stale {
        issued: RequestId,
        current: RequestId,
    },
    /// The id is current but nothing is pending for it (already resolved).
    NotPending { request_id: RequestId },
}

impl Resolution {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestOrchestrator {
    input: String,
    request_id: RequestId,
    state: RequestState,
}

impl RequestOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Mutable access for text widgets that edit the buffer in place.
    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn phase(&self) -> RequestPhase {
        self.state.phase()
    }

    pub fn is_pending(&self) -> bool {
        self.phase() == RequestPhase::Pending
    }

    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        match &self.state {
            RequestState::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureNotice> {
        match &self.state {
            RequestState::Failed { failure, .. } => Some(failure),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.failure().map(|failure| failure.message.as_str())
    }

    fn has_input(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// Whether an "Analyze" control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.has_input() && !self.is_pending()
    }

    /// Whether a "Clear" control should be enabled. [`Self::clear`] itself accepts any state.
    pub fn can_clear(&self) -> bool {
        self.has_input() && !self.is_pending()
    }

    /// Starts a new request from the current input.
    ///
    /// Returns `None` and changes nothing when the trimmed input is empty.
    /// Otherwise any previous result or error is dropped, the request id advances,
    /// and a call that was still in flight becomes stale.
    pub fn submit(&mut self) -> Option<PendingRequest> {
        let Some(request) = AnalyzeRequest::from_input(&self.input) else {
            debug!("ignoring submit with empty input");
            return None;
        };

        if let RequestState::Pending { request_id } = self.state {
            debug!(%request_id, "superseding in-flight request");
        }

        self.request_id = self.request_id.next();
        self.state = RequestState::Pending {
            request_id: self.request_id,
        };
        info!(
            request_id = %self.request_id,
            chars = request.text.chars().count(),
            "analysis submitted"
        );

        Some(PendingRequest {
            request_id: self.request_id,
            request,
        })
    }

    /// Applies the outcome of a call issued under `request_id`, unless it is stale.
    pub fn resolve(
        &mut self,
        request_id: RequestId,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Resolution {
        if let Some(rejected) = self.reject_if_not_current(request_id) {
            return rejected;
        }

        self.state = match outcome {
            Ok(result) => {
                info!(
                    %request_id,
                    tags = result.tag_count(),
                    sections = result.section_count(),
                    "analysis succeeded"
                );
                RequestState::Succeeded {
                    request_id,
                    result: Arc::new(result),
                }
            }
            Err(err) => {
                warn!(%request_id, kind = ?err.kind(), "analysis failed: {err}");
                RequestState::Failed {
                    request_id,
                    failure: err.to_notice(),
                }
            }
        };

        Resolution::Applied(self.phase())
    }

    /// Fails a pending request that never reached the collaborator.
    pub fn fail(&mut self, request_id: RequestId, failure: FailureNotice) -> Resolution {
        if let Some(rejected) = self.reject_if_not_current(request_id) {
            return rejected;
        }
        warn!(%request_id, kind = ?failure.kind, "analysis abandoned: {}", failure.message);
        self.state = RequestState::Failed {
            request_id,
            failure,
        };
        Resolution::Applied(RequestPhase::Failed)
    }

    fn reject_if_not_current(&self, request_id: RequestId) -> Option<Resolution> {
        if request_id != self.request_id {
            warn!(
                issued = %request_id,
                current = %self.request_id,
                "discarding stale analysis response"
            );
            return Some(Resolution::Stale {
                issued: request_id,
                current: self.request_id,
            });
        }

        if !self.is_pending() {
            warn!(%request_id, "discarding response for a request that is no longer pending");
            return Some(Resolution::NotPending { request_id });
        }

        None
    }

    /// Wipes input, result and error, and invalidates anything in flight.
    pub fn clear(&mut self) {
        self.input.clear();
        self.request_id = self.request_id.next();
        self.state = RequestState::Idle;
        debug!(request_id = %self.request_id, "cleared");
    }

    /// Seeds the input with a sample and drops any shown result or error.
    ///
    /// Does not submit and does not advance the request id, so a call already in
    /// flight still lands.
    pub fn select_sample(&mut self, text: impl Into<String>) {
        self.input = text.into();
        if !self.is_pending() {
            self.state = RequestState::Idle;
        }
        debug!(request_id = %self.request_id, "sample selected");
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
