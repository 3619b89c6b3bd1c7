//! Declarative field rules
//!
//! A rule is a predicate plus the message reported when it fails. Schemas
//! are tables of rules keyed by field, so validation policy is data.

use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Value handed to a rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    /// `None` for a blank or unparseable number
    Number(Option<Decimal>),
    /// Length of a list
    Count(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Text must not be blank; a number must be present
    Required { message: String },
    /// Number must be `>= bound`
    Min { bound: Decimal, message: String },
    /// Number must be `<= bound`
    Max { bound: Decimal, message: String },
    /// List must hold at least `min` elements
    MinLength { min: usize, message: String },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Rule::Required {
            message: message.into(),
        }
    }

    pub fn min(bound: impl Into<Decimal>, message: impl Into<String>) -> Self {
        Rule::Min {
            bound: bound.into(),
            message: message.into(),
        }
    }

    pub fn max(bound: impl Into<Decimal>, message: impl Into<String>) -> Self {
        Rule::Max {
            bound: bound.into(),
            message: message.into(),
        }
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Rule::MinLength {
            min,
            message: message.into(),
        }
    }

    /// Check one value; bound rules ignore values of other shapes and blank numbers
    pub fn check(&self, value: FieldValue<'_>) -> Option<ValidationError> {
        match (self, value) {
            (Rule::Required { message }, FieldValue::Text(text)) if text.trim().is_empty() => {
                Some(ValidationError::required(message.as_str()))
            }
            (Rule::Required { message }, FieldValue::Number(None)) => {
                Some(ValidationError::required(message.as_str()))
            }
            (Rule::Min { bound, message }, FieldValue::Number(Some(n))) if n < *bound => {
                Some(ValidationError::range(message.as_str()))
            }
            (Rule::Max { bound, message }, FieldValue::Number(Some(n))) if n > *bound => {
                Some(ValidationError::range(message.as_str()))
            }
            (Rule::MinLength { min, message }, FieldValue::Count(len)) if len < *min => {
                Some(ValidationError::range(message.as_str()))
            }
            _ => None,
        }
    }
}

/// Run every rule against `value`, stopping after a missing value
pub fn check_all(rules: &[Rule], value: FieldValue<'_>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for rule in rules {
        if let Some(error) = rule.check(value) {
            let missing = matches!(error, ValidationError::RequiredField { .. });
            errors.push(error);
            if missing {
                break;
            }
        }
    }
    errors
}
