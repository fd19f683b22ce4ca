//! External submit collaborator boundary
//!
//! The collaborator finalizes a validated form's values — a backend call in
//! production, a mock in tests. It is invoked at most once per attempt.

use crate::form::FormValues;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    /// Backend-assigned reference for the submitted plan
    pub reference: String,
}

/// Errors a collaborator can report. All of these are expected-possible:
/// they surface as an error toast and leave the form intact for retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(String),
    #[error("rejected: {0}")]
    Rejected(String),
}

/// Boundary trait for the external submit service, mockable in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitCollaborator: Send + Sync {
    /// Finalize the form's values. Called at most once per attempt.
    async fn submit(&mut self, values: FormValues) -> Result<SubmitReceipt, SubmitError>;
}
