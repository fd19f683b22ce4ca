//! planstudio-forms — validated form workflow for the PlanStudio business
//! planner.
//!
//! Consolidates the planner's business inputs into a validated form workflow
//! with field-level errors, session-persistent drafts and spinner/toast
//! feedback:
//!
//! - [`form`] — fields, raw values and the form's aggregate status
//! - [`validation`] — pure rules and the dirty-set validation engine
//! - [`store`] — debounced draft persistence over a pluggable backend
//! - [`submit`] — the submission state machine and its external collaborator
//! - [`feedback`] — busy/toast projections for the presentation layer
//! - [`plan`] — the concrete business-plan input form and its rules
//!
//! The presentation layer renders form state and feeds user events
//! (`set_value`, `blur`, `submit_requested`, `reset_requested`, timer ticks)
//! into a [`SubmissionController`]; rendering itself lives outside this
//! crate.

pub mod config;
pub mod feedback;
pub mod form;
pub mod plan;
pub mod store;
pub mod submit;
pub mod validation;

pub use config::WorkflowConfig;
pub use feedback::{FeedbackChannel, Toast, ToastKind};
pub use form::{FieldValue, Form, FormError, FormField, FormStatus, FormValues, Validity};
pub use store::{DraftSnapshot, DraftStore, JsonFileBackend, MemoryBackend, StorageBackend};
pub use submit::{
    AttemptOutcome, SubmissionAttempt, SubmissionController, SubmitCollaborator, SubmitError,
    SubmitReceipt, WorkflowError,
};
pub use validation::{Rule, RuleSet, ValidationReport};
