//! Error types for the Formcheck core library
//!
//! Every variant here aborts the whole validation run. Most are
//! configuration-class failures: something in the rule catalog or the field
//! specs is wrong. Fields that simply fail a rule are never reported through
//! this type; they become [`FieldError`](crate::types::FieldError) entries
//! instead.

use std::fmt;
use thiserror::Error;

/// Main error type for Formcheck operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or inconsistent construction input
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A rule token that does not follow `name` or `name(p1,p2,...)`
    #[error("Couldn't parse validation \"{expression}\"{}: {reason}", FieldSuffix(.field.as_deref()))]
    MalformedRuleExpression {
        expression: String,
        field: Option<String>,
        reason: String,
    },

    /// A rule name with no entry in the registry
    #[error("The validation \"{name}\" does not exist in the validations provided")]
    UnknownRule { name: String },

    /// The number of supplied parameters differs from the rule's arity
    #[error(
        "Rule \"{rule}\" expects {expected} extra parameters. In field \"{field}\", \
         you are trying to call \"{expression}\" with {actual} parameters."
    )]
    ArityMismatch {
        field: String,
        rule: String,
        expression: String,
        expected: usize,
        actual: usize,
    },

    /// A rule was called with parameter values it cannot work with
    #[error("Invalid call to \"{rule}\": {message}")]
    InvalidRuleCall { rule: String, message: String },

    /// A parameter has the wrong type for the rule it is passed to
    #[error("Parameter {index} of \"{rule}\" must be {expected}, found {found}")]
    InvalidParameter {
        rule: String,
        index: usize,
        expected: String,
        found: String,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A caller-supplied evaluator could not produce a verdict
    ///
    /// Custom rules return these by converting an `anyhow::Error` with `?`.
    #[error("Rule evaluation failed: {message}")]
    Evaluation {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

struct FieldSuffix<'a>(Option<&'a str>);

impl fmt::Display for FieldSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(field) => write!(f, ", submitted in field \"{}\"", field),
            None => Ok(()),
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid rule call error
    pub fn invalid_call(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidRuleCall {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Attach the field name to a malformed expression error
    pub fn in_field(self, field_name: &str) -> Self {
        match self {
            Error::MalformedRuleExpression {
                expression,
                field: None,
                reason,
            } => Error::MalformedRuleExpression {
                expression,
                field: Some(field_name.to_string()),
                reason,
            },
            other => other,
        }
    }

    /// Whether this error comes from the rule catalog or field specs rather
    /// than from serialization or a failing custom evaluator
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Error::Json { .. } | Error::Evaluation { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Evaluation {
            message: format!("{:#}", err),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_mismatch_display() {
        let err = Error::ArityMismatch {
            field: "age".to_string(),
            rule: "digits_between".to_string(),
            expression: "digits_between(3)".to_string(),
            expected: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "Rule \"digits_between\" expects 2 extra parameters. In field \"age\", \
             you are trying to call \"digits_between(3)\" with 1 parameters."
        );
    }

    #[test]
    fn test_malformed_expression_field_suffix() {
        let err = Error::MalformedRuleExpression {
            expression: "Bad Rule".to_string(),
            field: None,
            reason: "invalid rule name".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Couldn't parse validation \"Bad Rule\": invalid rule name"
        );

        let err = err.in_field("name");
        assert_eq!(
            err.to_string(),
            "Couldn't parse validation \"Bad Rule\", submitted in field \"name\": invalid rule name"
        );
    }

    #[test]
    fn test_in_field_keeps_existing_field() {
        let err = Error::MalformedRuleExpression {
            expression: "x()".to_string(),
            field: Some("first".to_string()),
            reason: "empty parameter list".to_string(),
        }
        .in_field("second");

        match err {
            Error::MalformedRuleExpression { field, .. } => {
                assert_eq!(field.as_deref(), Some("first"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_configuration_classification() {
        assert!(Error::UnknownRule { name: "x".to_string() }.is_configuration_error());
        assert!(Error::configuration("missing registry").is_configuration_error());

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!Error::from(json_err).is_configuration_error());
    }

    #[test]
    fn test_anyhow_conversion_keeps_context() {
        use anyhow::Context;

        let failure: anyhow::Result<u32> = "x12"
            .parse::<u32>()
            .context("postcode lookup table is corrupt");
        let err = Error::from(failure.unwrap_err());

        assert!(!err.is_configuration_error());
        assert!(err
            .to_string()
            .starts_with("Rule evaluation failed: postcode lookup table is corrupt: "));
        assert!(std::error::Error::source(&err).is_some());
    }
}
