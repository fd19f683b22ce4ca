//! Form container and aggregate status

use super::field::{FieldValue, FormField, Validity};
use crate::validation::ValidationReport;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

/// Raw field values keyed by field key, as handed to the draft store and the
/// submit collaborator. Never carries validity.
pub type FormValues = BTreeMap<String, FieldValue>;

/// Errors from form operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Aggregate lifecycle status of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Editing,
    Validating,
    Submitting,
    SubmitSucceeded,
    SubmitFailed,
}

impl FormStatus {
    /// Whether edits are currently rejected (a submission is being processed)
    pub fn is_read_only(&self) -> bool {
        matches!(self, FormStatus::Validating | FormStatus::Submitting)
    }
}

/// An ordered collection of fields plus the aggregate submission status.
///
/// Field order is declaration order and is preserved through validation and
/// hydration. Duplicate keys are dropped at construction.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    status: FormStatus,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut seen: Vec<String> = Vec::with_capacity(fields.len());
        let mut deduped = Vec::with_capacity(fields.len());
        for field in fields {
            if seen.contains(&field.key) {
                warn!(key = %field.key, "duplicate field key dropped");
                continue;
            }
            seen.push(field.key.clone());
            deduped.push(field);
        }
        Self {
            fields: deduped,
            status: FormStatus::Editing,
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: FormStatus) {
        self.status = status;
    }

    /// Look up a field by key
    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.key == key)
    }

    /// All fields in declaration order
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Update a field's raw value, marking it touched and its validity stale
    pub fn set_value(&mut self, key: &str, value: FieldValue) -> Result<(), FormError> {
        match self.field_mut(key) {
            Some(field) => {
                field.set_value(value);
                Ok(())
            }
            None => Err(FormError::UnknownField(key.to_string())),
        }
    }

    /// Current raw value of a field
    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.field(key).map(|f| &f.value)
    }

    /// Current validity of a field
    pub fn validity(&self, key: &str) -> Option<&Validity> {
        self.field(key).map(|f| &f.validity)
    }

    /// Snapshot of all raw values, keyed by field key
    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.key.clone(), f.value.clone()))
            .collect()
    }

    /// Overwrite raw values from a stored snapshot.
    ///
    /// Unknown keys are ignored. Hydrated fields come back untouched and
    /// `Unvalidated`: stored validity is never trusted, callers re-validate.
    pub fn hydrate(&mut self, values: &FormValues) {
        for field in &mut self.fields {
            if let Some(value) = values.get(&field.key) {
                field.value = value.clone();
                field.touched = false;
                field.validity = Validity::Unvalidated;
            }
        }
    }

    /// Apply a validation report, updating validity for every field it covers
    pub fn apply_report(&mut self, report: &ValidationReport) {
        for (key, errors) in report.iter() {
            if let Some(field) = self.field_mut(key) {
                field.validity = if errors.is_empty() {
                    Validity::Valid
                } else {
                    Validity::Invalid(errors.clone())
                };
            }
        }
    }

    /// Whether every field has been validated and found valid
    pub fn all_valid(&self) -> bool {
        self.fields.iter().all(|f| f.validity.is_valid())
    }
}
