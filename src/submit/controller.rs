//! Submission controller
//!
//! Orchestrates validate → persist → submit → feedback for one form
//! instance. Single logical thread of control: the host feeds it discrete
//! events (edits, blur, submit/reset requests, timer ticks, the collaborator
//! response) and reads projections back out.

use super::collaborator::{SubmitCollaborator, SubmitError, SubmitReceipt};
use crate::feedback::{FeedbackChannel, Toast};
use crate::form::{FieldValue, Form, FormError, FormStatus, FormValues};
use crate::store::DraftStore;
use crate::validation::RuleSet;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Errors from workflow operations. `ReadOnly`/`SubmitInFlight` are expected
/// rejections the host can ignore; `NoAttemptInFlight` indicates a host-side
/// sequencing bug and should be escalated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("form is read-only while a submission is in flight")]
    ReadOnly,
    #[error("a submission is already in flight")]
    SubmitInFlight,
    #[error("no submission attempt in flight")]
    NoAttemptInFlight,
}

/// Outcome of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Pending,
    Success(SubmitReceipt),
    Failure(SubmitError),
}

/// Ephemeral record of one submit call; never persisted
#[derive(Debug, Clone)]
pub struct SubmissionAttempt {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub outcome: AttemptOutcome,
}

impl SubmissionAttempt {
    fn started() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            outcome: AttemptOutcome::Pending,
        }
    }
}

/// State machine driving one form instance through
/// `Editing → Validating → Submitting → (SubmitSucceeded | SubmitFailed)`.
///
/// Policy notes:
/// - Edits while validating/submitting are rejected, not queued.
/// - At most one attempt is in flight; a concurrent submit request is a
///   rejected no-op.
/// - On failure the form keeps its values and its draft so the user can
///   retry without re-entering data.
pub struct SubmissionController {
    form_key: String,
    /// Pristine copy used for reset and the post-success fresh form
    template: Form,
    form: Form,
    rules: RuleSet,
    drafts: DraftStore,
    collaborator: Box<dyn SubmitCollaborator>,
    feedback: FeedbackChannel,
    changed: BTreeSet<String>,
    last_attempt: Option<SubmissionAttempt>,
}

impl SubmissionController {
    /// Create a controller for `form_key`, restoring a persisted draft if one
    /// exists. Restored values are re-validated; stored validity is never
    /// trusted.
    pub async fn new(
        form_key: impl Into<String>,
        form: Form,
        rules: RuleSet,
        mut drafts: DraftStore,
        collaborator: Box<dyn SubmitCollaborator>,
        feedback: FeedbackChannel,
    ) -> Self {
        let form_key = form_key.into();
        let template = form.clone();
        let mut form = form;
        if let Some(snapshot) = drafts.load(&form_key).await {
            debug!(
                form_key,
                version = snapshot.version,
                "restoring draft into form"
            );
            form.hydrate(&snapshot.values);
            let report = rules.validate(&form);
            form.apply_report(&report);
        }
        Self {
            form_key,
            template,
            form,
            rules,
            drafts,
            collaborator,
            feedback,
            changed: BTreeSet::new(),
            last_attempt: None,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn status(&self) -> FormStatus {
        self.form.status()
    }

    /// Spinner signal: true while validating or submitting
    pub fn busy(&self) -> bool {
        self.feedback.busy()
    }

    /// Current toast, if one is up
    pub fn toast(&self) -> Option<&Toast> {
        self.feedback.toast()
    }

    pub fn last_attempt(&self) -> Option<&SubmissionAttempt> {
        self.last_attempt.as_ref()
    }

    /// Low-priority persistence notice, if any (consumed on read)
    pub fn take_store_notice(&mut self) -> Option<String> {
        self.drafts.take_notice()
    }

    /// Apply a field edit: update the value, re-validate affected fields and
    /// queue a draft save. Rejected while a submission is in flight.
    pub async fn set_value(&mut self, key: &str, value: FieldValue) -> Result<(), WorkflowError> {
        if self.form.status().is_read_only() {
            debug!(key, "edit rejected, submission in flight");
            return Err(WorkflowError::ReadOnly);
        }
        self.form.set_value(key, value)?;
        self.changed.insert(key.to_string());

        let report = self.rules.validate_changed(&self.form, &self.changed);
        self.form.apply_report(&report);
        self.changed.clear();

        self.drafts.save(&self.form_key, self.form.values()).await;
        Ok(())
    }

    /// Field blur: force any pending draft write out
    pub async fn blur(&mut self) {
        self.drafts.flush(&self.form_key).await;
    }

    /// Timer tick: advance the draft debounce and toast expiry
    pub async fn tick(&mut self) {
        self.drafts.tick().await;
        self.feedback.tick();
    }

    /// Handle an explicit submit request end to end: validate, call the
    /// collaborator if the form is clean, and apply the outcome. Returns
    /// whether the collaborator was invoked.
    pub async fn submit_requested(&mut self) -> Result<bool, WorkflowError> {
        let Some(values) = self.begin_submit().await? else {
            return Ok(false);
        };
        let result = self.collaborator.submit(values).await;
        self.complete_submit(result).await?;
        Ok(true)
    }

    /// First half of a submit: run full-form validation and, if it passes,
    /// transition to `Submitting` and hand back the values for the
    /// collaborator call. `Ok(None)` means validation failed and the form is
    /// back in `Editing` with field-level errors.
    pub async fn begin_submit(&mut self) -> Result<Option<FormValues>, WorkflowError> {
        if self.form.status().is_read_only() {
            debug!(form_key = %self.form_key, "submit request rejected, already in flight");
            return Err(WorkflowError::SubmitInFlight);
        }

        self.transition(FormStatus::Validating);
        let report = self.rules.validate(&self.form);
        self.form.apply_report(&report);

        // a submit attempt always flushes the latest values to the draft
        self.drafts.save(&self.form_key, self.form.values()).await;
        self.drafts.flush(&self.form_key).await;

        if !self.form.all_valid() {
            debug!(form_key = %self.form_key, "submit blocked by validation errors");
            self.transition(FormStatus::Editing);
            return Ok(None);
        }

        self.transition(FormStatus::Submitting);
        let attempt = SubmissionAttempt::started();
        info!(form_key = %self.form_key, attempt = %attempt.id, "submission started");
        self.last_attempt = Some(attempt);
        Ok(Some(self.form.values()))
    }

    /// Second half of a submit: fold the collaborator's response back in.
    pub async fn complete_submit(
        &mut self,
        result: Result<SubmitReceipt, SubmitError>,
    ) -> Result<(), WorkflowError> {
        if self.form.status() != FormStatus::Submitting {
            warn!(form_key = %self.form_key, "submission result with no attempt in flight");
            return Err(WorkflowError::NoAttemptInFlight);
        }

        match result {
            Ok(receipt) => {
                info!(form_key = %self.form_key, reference = %receipt.reference, "submission succeeded");
                if let Some(attempt) = &mut self.last_attempt {
                    attempt.outcome = AttemptOutcome::Success(receipt.clone());
                }
                self.transition_with(
                    FormStatus::SubmitSucceeded,
                    format!("plan submitted ({})", receipt.reference),
                );
                self.drafts.clear(&self.form_key).await;
                // fresh editing state for the next plan
                self.form = self.template.clone();
                self.changed.clear();
                self.transition(FormStatus::Editing);
            }
            Err(err) => {
                warn!(form_key = %self.form_key, error = %err, "submission failed");
                if let Some(attempt) = &mut self.last_attempt {
                    attempt.outcome = AttemptOutcome::Failure(err.clone());
                }
                self.transition_with(FormStatus::SubmitFailed, err.to_string());
                // values and draft stay put for retry
                self.transition(FormStatus::Editing);
            }
        }
        Ok(())
    }

    /// Discard the form back to its defaults and drop the persisted draft.
    /// Rejected while a submission is in flight.
    pub async fn reset_requested(&mut self) -> Result<(), WorkflowError> {
        if self.form.status().is_read_only() {
            return Err(WorkflowError::ReadOnly);
        }
        info!(form_key = %self.form_key, "form reset");
        self.form = self.template.clone();
        self.changed.clear();
        self.drafts.clear(&self.form_key).await;
        self.feedback.observe(FormStatus::Editing, None);
        Ok(())
    }

    fn transition(&mut self, next: FormStatus) {
        debug!(form_key = %self.form_key, status = ?next, "status transition");
        self.form.set_status(next);
        self.feedback.observe(next, None);
    }

    fn transition_with(&mut self, next: FormStatus, note: String) {
        debug!(form_key = %self.form_key, status = ?next, "status transition");
        self.form.set_status(next);
        self.feedback.observe(next, Some(note));
    }
}
