//! Submission orchestration: collaborator boundary and controller

mod collaborator;
mod controller;

pub use collaborator::{SubmitCollaborator, SubmitError, SubmitReceipt};
pub use controller::{
    AttemptOutcome, SubmissionAttempt, SubmissionController, WorkflowError,
};

#[cfg(test)]
pub use collaborator::MockSubmitCollaborator;
