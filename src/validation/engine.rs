//! Validation engine
//!
//! Pure functions from form snapshots to per-field error lists. Full-form
//! validation covers every field; dirty-set validation re-evaluates only the
//! fields whose rule dependencies intersect the keys changed since the last
//! run.

use super::rules::Rule;
use crate::form::Form;
use std::collections::{BTreeMap, BTreeSet};

/// Per-field error lists from one validation run.
///
/// Every evaluated field has an entry; an empty list means the field is
/// valid. Messages keep rule-declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    entries: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    /// Record errors (possibly none) for a field
    pub fn insert(&mut self, key: &str, errors: Vec<String>) {
        self.entries.insert(key.to_string(), errors);
    }

    fn push(&mut self, key: &str, message: String) {
        self.entries.entry(key.to_string()).or_default().push(message);
    }

    fn seed(&mut self, key: &str) {
        self.entries.entry(key.to_string()).or_default();
    }

    /// Errors recorded for one field (empty = valid or not evaluated)
    pub fn errors_for(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the run found no errors at all
    pub fn is_valid(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }
}

/// An ordered collection of rules for one form
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append, keeping declaration order
    pub fn with(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Validate the whole form. Every field gets an entry, including fields
    /// with no rules (trivially valid).
    pub fn validate(&self, form: &Form) -> ValidationReport {
        let mut report = ValidationReport::default();
        for field in form.fields() {
            report.seed(&field.key);
        }
        for rule in &self.rules {
            if let Some(message) = rule.check(form) {
                report.push(rule.field(), message);
            }
        }
        report
    }

    /// Re-validate only the fields affected by `changed` keys: a field is
    /// affected when any of its rules declares a dependency in the set.
    pub fn validate_changed(&self, form: &Form, changed: &BTreeSet<String>) -> ValidationReport {
        let affected: BTreeSet<&str> = self
            .rules
            .iter()
            .filter(|r| r.triggered_by(changed))
            .map(|r| r.field())
            .collect();

        let mut report = ValidationReport::default();
        for key in changed {
            if form.field(key).is_some() {
                report.seed(key);
            }
        }
        for key in &affected {
            report.seed(key);
        }
        for rule in &self.rules {
            if affected.contains(rule.field()) {
                if let Some(message) = rule.check(form) {
                    report.push(rule.field(), message);
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;
    use pretty_assertions::assert_eq;

    fn month_form() -> Form {
        Form::new(vec![
            FormField::text("name", "Plan name"),
            FormField::number("start_month", "Start", 4.0),
            FormField::number("end_month", "End", 3.0),
            FormField::flag("approved", "Approved", false),
        ])
    }

    fn month_rules() -> RuleSet {
        RuleSet::new()
            .with(Rule::required("name"))
            .with(Rule::min("start_month", 1.0))
            .with(Rule::max("start_month", 12.0))
            .with(Rule::after("end_month", "start_month", "must be after start"))
    }

    mod full_validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_every_field_gets_an_entry() {
            let report = month_rules().validate(&month_form());
            let keys: Vec<&String> = report.iter().map(|(k, _)| k).collect();
            assert_eq!(keys.len(), 4);
            // "approved" has no rules but is still reported valid
            assert!(report.errors_for("approved").is_empty());
        }

        #[test]
        fn test_errors_collected_per_field() {
            let report = month_rules().validate(&month_form());
            assert_eq!(report.errors_for("name"), ["required".to_string()]);
            assert_eq!(
                report.errors_for("end_month"),
                ["must be after start".to_string()]
            );
            assert!(!report.is_valid());
        }

        #[test]
        fn test_multiple_failures_keep_declaration_order() {
            let form = Form::new(vec![FormField::number("ratio", "Ratio", 5.0)]);
            let rules = RuleSet::new()
                .with(Rule::max("ratio", 1.0))
                .with(Rule::new("ratio", &[], |form| {
                    form.value("ratio")
                        .and_then(|v| v.as_number())
                        .filter(|n| *n == 5.0)
                        .map(|_| "five is right out".to_string())
                }));

            let report = rules.validate(&form);
            assert_eq!(
                report.errors_for("ratio"),
                ["must be ≤ 1".to_string(), "five is right out".to_string()]
            );
        }

        #[test]
        fn test_clean_form_is_valid() {
            let mut form = month_form();
            form.set_value("name", crate::form::FieldValue::Text("Plan A".into()))
                .unwrap();
            form.set_value("end_month", crate::form::FieldValue::Number(9.0))
                .unwrap();
            let report = month_rules().validate(&form);
            assert!(report.is_valid());
        }
    }

    mod dirty_set_validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_only_affected_fields_are_reported() {
            let mut changed = BTreeSet::new();
            changed.insert("name".to_string());

            let report = month_rules().validate_changed(&month_form(), &changed);
            assert_eq!(report.errors_for("name"), ["required".to_string()]);
            // end_month was not affected by a name edit
            assert!(report.iter().all(|(k, _)| k != "end_month"));
        }

        #[test]
        fn test_cross_field_dependency_triggers_dependent_field() {
            // editing start_month must re-validate end_month's ordering rule
            let mut changed = BTreeSet::new();
            changed.insert("start_month".to_string());

            let report = month_rules().validate_changed(&month_form(), &changed);
            assert_eq!(
                report.errors_for("end_month"),
                ["must be after start".to_string()]
            );
        }

        #[test]
        fn test_changed_field_without_rules_reports_valid() {
            let mut changed = BTreeSet::new();
            changed.insert("approved".to_string());

            let report = month_rules().validate_changed(&month_form(), &changed);
            assert!(report.errors_for("approved").is_empty());
            assert!(report.is_valid());
        }

        #[test]
        fn test_empty_changed_set_is_a_noop() {
            let report = month_rules().validate_changed(&month_form(), &BTreeSet::new());
            assert_eq!(report, ValidationReport::default());
        }
    }
}
