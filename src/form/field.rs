//! Form field value objects

use serde::{Deserialize, Serialize};

/// Raw value carried by a single input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value (empty string for non-text values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// Interpret the value as a number.
    ///
    /// Text is parsed leniently; unparseable or empty text yields `None` so
    /// that numeric rules can report a validation error instead of faulting.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::Flag(_) => None,
        }
    }

    /// Get the flag value (`false` for non-flag values)
    pub fn as_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }

    /// Whether the value is blank (empty or whitespace-only text)
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Validation state of a single field.
///
/// A value change always resets this to `Unvalidated`; `Valid`/`Invalid`
/// only ever describe the value the field held when it was last validated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Unvalidated,
    Valid,
    Invalid(Vec<String>),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Validity::Invalid(_))
    }

    /// Error messages, in rule-declaration order (empty unless `Invalid`)
    pub fn errors(&self) -> &[String] {
        match self {
            Validity::Invalid(errors) => errors,
            _ => &[],
        }
    }
}

/// Represents a single form field with its identity, value and validation state
#[derive(Debug, Clone)]
pub struct FormField {
    pub key: String,
    pub label: String,
    pub value: FieldValue,
    pub validity: Validity,
    /// Whether the user has interacted with this field
    pub touched: bool,
}

impl FormField {
    /// Create a new empty text field
    pub fn text(key: &str, label: &str) -> Self {
        Self::text_with_value(key, label, "")
    }

    /// Create a new text field with initial value
    pub fn text_with_value(key: &str, label: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(value.into()),
            validity: Validity::Unvalidated,
            touched: false,
        }
    }

    /// Create a new numeric field
    pub fn number(key: &str, label: &str, value: f64) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value: FieldValue::Number(value),
            validity: Validity::Unvalidated,
            touched: false,
        }
    }

    /// Create a new boolean field
    pub fn flag(key: &str, label: &str, value: bool) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value: FieldValue::Flag(value),
            validity: Validity::Unvalidated,
            touched: false,
        }
    }

    /// Replace the raw value, marking the field touched and its validity stale
    pub fn set_value(&mut self, value: FieldValue) {
        self.value = value;
        self.touched = true;
        self.validity = Validity::Unvalidated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod field_value {
        use super::*;

        #[test]
        fn test_default_is_empty_text() {
            assert_eq!(FieldValue::default(), FieldValue::Text(String::new()));
        }

        #[test]
        fn test_as_number_from_number() {
            assert_eq!(FieldValue::Number(12.5).as_number(), Some(12.5));
        }

        #[test]
        fn test_as_number_parses_text() {
            assert_eq!(FieldValue::Text(" 42 ".into()).as_number(), Some(42.0));
        }

        #[test]
        fn test_as_number_unparseable_text_is_none() {
            assert_eq!(FieldValue::Text("abc".into()).as_number(), None);
        }

        #[test]
        fn test_as_number_empty_text_is_none() {
            assert_eq!(FieldValue::Text("".into()).as_number(), None);
        }

        #[test]
        fn test_as_number_flag_is_none() {
            assert_eq!(FieldValue::Flag(true).as_number(), None);
        }

        #[test]
        fn test_is_blank() {
            assert!(FieldValue::Text("   ".into()).is_blank());
            assert!(!FieldValue::Text("x".into()).is_blank());
            assert!(!FieldValue::Number(0.0).is_blank());
            assert!(!FieldValue::Flag(false).is_blank());
        }

        #[test]
        fn test_serializes_as_plain_json_scalar() {
            assert_eq!(
                serde_json::to_string(&FieldValue::Text("Plan A".into())).unwrap(),
                "\"Plan A\""
            );
            assert_eq!(
                serde_json::to_string(&FieldValue::Number(1000.0)).unwrap(),
                "1000.0"
            );
            assert_eq!(
                serde_json::to_string(&FieldValue::Flag(true)).unwrap(),
                "true"
            );
        }

        #[test]
        fn test_deserializes_from_plain_json_scalar() {
            let v: FieldValue = serde_json::from_str("\"hello\"").unwrap();
            assert_eq!(v, FieldValue::Text("hello".into()));
            let v: FieldValue = serde_json::from_str("3.5").unwrap();
            assert_eq!(v, FieldValue::Number(3.5));
            let v: FieldValue = serde_json::from_str("false").unwrap();
            assert_eq!(v, FieldValue::Flag(false));
        }
    }

    mod validity {
        use super::*;

        #[test]
        fn test_default_is_unvalidated() {
            assert_eq!(Validity::default(), Validity::Unvalidated);
        }

        #[test]
        fn test_errors_empty_unless_invalid() {
            assert!(Validity::Unvalidated.errors().is_empty());
            assert!(Validity::Valid.errors().is_empty());
            let invalid = Validity::Invalid(vec!["required".into()]);
            assert_eq!(invalid.errors(), ["required".to_string()]);
        }
    }

    mod form_field {
        use super::*;

        #[test]
        fn test_new_field_is_untouched_and_unvalidated() {
            let field = FormField::text("name", "Plan name");
            assert!(!field.touched);
            assert_eq!(field.validity, Validity::Unvalidated);
        }

        #[test]
        fn test_set_value_touches_and_resets_validity() {
            let mut field = FormField::number("budget", "Annual budget", 0.0);
            field.validity = Validity::Valid;

            field.set_value(FieldValue::Number(500.0));

            assert!(field.touched);
            assert_eq!(field.validity, Validity::Unvalidated);
            assert_eq!(field.value, FieldValue::Number(500.0));
        }

        #[test]
        fn test_set_value_resets_invalid_state_too() {
            let mut field = FormField::text("name", "Plan name");
            field.validity = Validity::Invalid(vec!["required".into()]);

            field.set_value(FieldValue::Text("Plan A".into()));

            assert_eq!(field.validity, Validity::Unvalidated);
        }
    }
}
