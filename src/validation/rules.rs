//! Validation rules
//!
//! A rule is a pure, total check of the whole form that attaches its error
//! message to one field. Rules declare the set of field keys they depend on
//! so the engine can re-evaluate only what a given edit can affect. Rule
//! authoring is plain closures; there is no rule DSL.

use crate::form::{FieldValue, Form};
use std::collections::BTreeSet;
use std::fmt;

type Check = dyn Fn(&Form) -> Option<String> + Send + Sync;

/// A single validation rule targeting one field
pub struct Rule {
    field: String,
    deps: Vec<String>,
    check: Box<Check>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("field", &self.field)
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}

impl Rule {
    /// Create a rule for `field` with extra dependency keys beyond the field
    /// itself. The check returns an error message, or `None` when it passes.
    pub fn new(
        field: &str,
        extra_deps: &[&str],
        check: impl Fn(&Form) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        let mut deps = vec![field.to_string()];
        deps.extend(extra_deps.iter().map(|d| d.to_string()));
        Self {
            field: field.to_string(),
            deps,
            check: Box::new(check),
        }
    }

    /// Key of the field this rule's errors attach to
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Field keys whose changes require re-evaluating this rule
    pub fn deps(&self) -> &[String] {
        &self.deps
    }

    /// Whether any dependency of this rule is in the changed set
    pub fn triggered_by(&self, changed: &BTreeSet<String>) -> bool {
        self.deps.iter().any(|d| changed.contains(d))
    }

    /// Run the check against the current form snapshot
    pub fn check(&self, form: &Form) -> Option<String> {
        (self.check)(form)
    }

    /// The field must hold non-blank text
    pub fn required(field: &str) -> Self {
        let key = field.to_string();
        Self::new(field, &[], move |form| {
            let value = form.value(&key)?;
            if value.is_blank() {
                Some("required".to_string())
            } else {
                None
            }
        })
    }

    /// The field must hold a parseable number.
    ///
    /// Blank text passes (that is `required`'s concern); unparseable text or
    /// a boolean yields "invalid format". Parsing never faults.
    pub fn numeric(field: &str) -> Self {
        let key = field.to_string();
        Self::new(field, &[], move |form| {
            let value = form.value(&key)?;
            match value {
                FieldValue::Number(_) => None,
                FieldValue::Text(s) if s.trim().is_empty() => None,
                FieldValue::Text(s) => match s.trim().parse::<f64>() {
                    Ok(_) => None,
                    Err(_) => Some("invalid format".to_string()),
                },
                FieldValue::Flag(_) => Some("invalid format".to_string()),
            }
        })
    }

    /// The field's numeric value must be at least `min`.
    /// Unparseable values are skipped here; `numeric` reports those.
    pub fn min(field: &str, min: f64) -> Self {
        let key = field.to_string();
        Self::new(field, &[], move |form| {
            let n = form.value(&key)?.as_number()?;
            if n < min {
                Some(format!("must be ≥ {min}"))
            } else {
                None
            }
        })
    }

    /// The field's numeric value must be at most `max`
    pub fn max(field: &str, max: f64) -> Self {
        let key = field.to_string();
        Self::new(field, &[], move |form| {
            let n = form.value(&key)?.as_number()?;
            if n > max {
                Some(format!("must be ≤ {max}"))
            } else {
                None
            }
        })
    }

    /// Cross-field ordering: this field's numeric value must be strictly
    /// greater than the value of `earlier`.
    pub fn after(field: &str, earlier: &str, message: &str) -> Self {
        let key = field.to_string();
        let earlier_key = earlier.to_string();
        let message = message.to_string();
        Self::new(field, &[earlier], move |form| {
            let start = form.value(&earlier_key)?.as_number()?;
            let end = form.value(&key)?.as_number()?;
            if end <= start {
                Some(message.clone())
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;

    fn form_with(fields: Vec<FormField>) -> Form {
        Form::new(fields)
    }

    mod required {
        use super::*;

        #[test]
        fn test_blank_text_fails() {
            let form = form_with(vec![FormField::text("name", "Name")]);
            let rule = Rule::required("name");
            assert_eq!(rule.check(&form), Some("required".into()));
        }

        #[test]
        fn test_whitespace_only_fails() {
            let form = form_with(vec![FormField::text_with_value("name", "Name", "   ")]);
            assert_eq!(
                Rule::required("name").check(&form),
                Some("required".into())
            );
        }

        #[test]
        fn test_non_blank_passes() {
            let form = form_with(vec![FormField::text_with_value("name", "Name", "Plan A")]);
            assert_eq!(Rule::required("name").check(&form), None);
        }

        #[test]
        fn test_number_value_passes() {
            let form = form_with(vec![FormField::number("budget", "Budget", 0.0)]);
            assert_eq!(Rule::required("budget").check(&form), None);
        }

        #[test]
        fn test_missing_field_is_not_a_fault() {
            let form = form_with(vec![]);
            assert_eq!(Rule::required("ghost").check(&form), None);
        }
    }

    mod numeric {
        use super::*;

        #[test]
        fn test_unparseable_text_is_invalid_format() {
            let form = form_with(vec![FormField::text_with_value("budget", "Budget", "abc")]);
            assert_eq!(
                Rule::numeric("budget").check(&form),
                Some("invalid format".into())
            );
        }

        #[test]
        fn test_parseable_text_passes() {
            let form = form_with(vec![FormField::text_with_value("budget", "Budget", "12.5")]);
            assert_eq!(Rule::numeric("budget").check(&form), None);
        }

        #[test]
        fn test_blank_text_passes() {
            let form = form_with(vec![FormField::text("budget", "Budget")]);
            assert_eq!(Rule::numeric("budget").check(&form), None);
        }

        #[test]
        fn test_flag_is_invalid_format() {
            let form = form_with(vec![FormField::flag("budget", "Budget", true)]);
            assert_eq!(
                Rule::numeric("budget").check(&form),
                Some("invalid format".into())
            );
        }
    }

    mod bounds {
        use super::*;

        #[test]
        fn test_min_rejects_below() {
            let form = form_with(vec![FormField::number("budget", "Budget", -5.0)]);
            assert_eq!(
                Rule::min("budget", 0.0).check(&form),
                Some("must be ≥ 0".into())
            );
        }

        #[test]
        fn test_min_accepts_at_bound() {
            let form = form_with(vec![FormField::number("budget", "Budget", 0.0)]);
            assert_eq!(Rule::min("budget", 0.0).check(&form), None);
        }

        #[test]
        fn test_max_rejects_above() {
            let form = form_with(vec![FormField::number("ratio", "Ratio", 1.2)]);
            assert_eq!(
                Rule::max("ratio", 1.0).check(&form),
                Some("must be ≤ 1".into())
            );
        }

        #[test]
        fn test_bounds_skip_unparseable_values() {
            // numeric() owns the "invalid format" message, bounds stay quiet
            let form = form_with(vec![FormField::text_with_value("budget", "Budget", "abc")]);
            assert_eq!(Rule::min("budget", 0.0).check(&form), None);
            assert_eq!(Rule::max("budget", 10.0).check(&form), None);
        }
    }

    mod after {
        use super::*;

        fn months(start: f64, end: f64) -> Form {
            form_with(vec![
                FormField::number("start_month", "Start", start),
                FormField::number("end_month", "End", end),
            ])
        }

        #[test]
        fn test_end_after_start_passes() {
            let rule = Rule::after("end_month", "start_month", "must be after start");
            assert_eq!(rule.check(&months(4.0, 9.0)), None);
        }

        #[test]
        fn test_end_equal_to_start_fails() {
            let rule = Rule::after("end_month", "start_month", "must be after start");
            assert_eq!(rule.check(&months(4.0, 4.0)), Some("must be after start".into()));
        }

        #[test]
        fn test_end_before_start_fails() {
            let rule = Rule::after("end_month", "start_month", "must be after start");
            assert_eq!(rule.check(&months(9.0, 4.0)), Some("must be after start".into()));
        }

        #[test]
        fn test_declares_both_fields_as_deps() {
            let rule = Rule::after("end_month", "start_month", "must be after start");
            let mut changed = BTreeSet::new();
            changed.insert("start_month".to_string());
            assert!(rule.triggered_by(&changed));
        }
    }
}
