//! Spinner and toast feedback signals
//!
//! A pure projection of the submission controller's status: `busy` while the
//! workflow is validating or submitting, and a one-shot toast per terminal
//! outcome. The channel holds no workflow state of its own.

use crate::form::FormStatus;
use std::time::{Duration, Instant};

/// Terminal-outcome notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notification raised by a terminal submit transition
#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    raised_at: Instant,
}

impl Toast {
    fn new(kind: ToastKind, message: String) -> Self {
        Self {
            kind,
            message,
            raised_at: Instant::now(),
        }
    }
}

/// Derives busy/toast signals from observed status transitions
#[derive(Debug)]
pub struct FeedbackChannel {
    status: FormStatus,
    toast: Option<Toast>,
    display_duration: Duration,
}

impl FeedbackChannel {
    /// How long a toast stays up without another transition clearing it
    pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

    pub fn new(display_duration: Duration) -> Self {
        Self {
            status: FormStatus::Editing,
            toast: None,
            display_duration,
        }
    }

    /// Record a status transition.
    ///
    /// Terminal transitions raise a toast (exactly one per transition, using
    /// `note` as the message when given); entering a busy state clears any
    /// toast left over from a previous attempt.
    pub fn observe(&mut self, next: FormStatus, note: Option<String>) {
        match next {
            FormStatus::Validating | FormStatus::Submitting => self.toast = None,
            FormStatus::SubmitSucceeded => {
                self.toast = Some(Toast::new(
                    ToastKind::Success,
                    note.unwrap_or_else(|| "plan submitted".to_string()),
                ));
            }
            FormStatus::SubmitFailed => {
                self.toast = Some(Toast::new(
                    ToastKind::Error,
                    note.unwrap_or_else(|| "submission failed".to_string()),
                ));
            }
            FormStatus::Editing => {}
        }
        self.status = next;
    }

    /// True while the workflow is validating or submitting
    pub fn busy(&self) -> bool {
        self.status.is_read_only()
    }

    /// The current toast, if one is up
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Clear the toast once its display duration has elapsed
    pub fn tick(&mut self) {
        if let Some(toast) = &self.toast {
            if toast.raised_at.elapsed() >= self.display_duration {
                self.toast = None;
            }
        }
    }
}

impl Default for FeedbackChannel {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOAST_DURATION)
    }
}
