//! UI/backend events and error modeling for the desktop controller.

use client_core::AnalysisError;
use shared::{
    domain::{AnalysisResult, RequestId},
    protocol::ServiceStatus,
};

pub enum UiEvent {
    BackendReady {
        base_url: String,
    },
    AnalysisFinished {
        request_id: RequestId,
        outcome: Result<AnalysisResult, AnalysisError>,
    },
    StatusChecked(Result<ServiceStatus, String>),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CommandQueue,
    StatusCheck,
}

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    /// Startup failures leave the Analyze button useless until relaunch.
    pub fn is_fatal(&self) -> bool {
        self.context == UiErrorContext::BackendStartup
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn describe_status_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("connect")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Analysis service unreachable; check the base url and that the service is running."
            .to_string()
    } else {
        format!("Analysis service check failed: {message}")
    }
}
