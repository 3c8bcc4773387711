//! Async driver pairing a [`RequestOrchestrator`] with an [`AnalysisBackend`].

use std::sync::Arc;

use futures::{future::BoxFuture, FutureExt};
use shared::domain::{AnalysisResult, RequestId};

use crate::{
    error::AnalysisError,
    orchestrator::{RequestOrchestrator, Resolution},
    samples::{SampleOutOfRange, SampleSelector},
    AnalysisBackend,
};

/// A backend call issued for one submission, not yet awaited.
pub struct InFlightRequest {
    request_id: RequestId,
    outcome: BoxFuture<'static, Result<AnalysisResult, AnalysisError>>,
}

impl InFlightRequest {
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub async fn wait(self) -> CompletedRequest {
        CompletedRequest {
            request_id: self.request_id,
            outcome: self.outcome.await,
        }
    }
}

#[derive(Debug)]
pub struct CompletedRequest {
    pub request_id: RequestId,
    pub outcome: Result<AnalysisResult, AnalysisError>,
}

pub struct AnalysisSession {
    backend: Arc<dyn AnalysisBackend>,
    orchestrator: RequestOrchestrator,
    samples: SampleSelector,
}

impl AnalysisSession {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            backend,
            orchestrator: RequestOrchestrator::new(),
            samples: SampleSelector::new(),
        }
    }

    pub fn with_samples(mut self, samples: SampleSelector) -> Self {
        self.samples = samples;
        self
    }

    pub fn orchestrator(&self) -> &RequestOrchestrator {
        &self.orchestrator
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.orchestrator.set_input(text);
    }

    pub fn clear(&mut self) {
        self.orchestrator.clear();
    }

    pub fn select_sample(&mut self, index: usize) -> Result<(), SampleOutOfRange> {
        let text = self.samples.pick(index)?;
        self.orchestrator.select_sample(text);
        Ok(())
    }

    /// Issues the backend call for the current input without waiting for it.
    ///
    /// `None` when the input is blank; no call is made in that case.
    pub fn dispatch(&mut self) -> Option<InFlightRequest> {
        let pending = self.orchestrator.submit()?;
        let backend = Arc::clone(&self.backend);
        let request = pending.request;
        let outcome = async move { backend.analyze(&request).await }.boxed();
        Some(InFlightRequest {
            request_id: pending.request_id,
            outcome,
        })
    }

    pub fn complete(&mut self, completed: CompletedRequest) -> Resolution {
        self.orchestrator
            .resolve(completed.request_id, completed.outcome)
    }

    /// Submits the current input and waits for the outcome. No retries.
    pub async fn submit(&mut self) -> Option<Resolution> {
        let in_flight = self.dispatch()?;
        let completed = in_flight.wait().await;
        Some(self.complete(completed))
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
