//! Rule executor
//!
//! Resolves a parsed rule call against a registry, checks that the number of
//! parameters matches what the rule declares, and runs it against a field.
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use crate::rules::RuleRegistry;
use crate::types::{FieldDescriptor, ParsedRuleCall, ValidationOutcome};
use crate::{Error, Result};
use tracing::trace;

/// Run one parsed rule call against a field
pub fn execute(
    field: &FieldDescriptor,
    call: &ParsedRuleCall,
    registry: &RuleRegistry,
) -> Result<ValidationOutcome> {
    let rule = registry.lookup(&call.rule_name)?;

    if rule.arity() != call.argument_count() {
        return Err(Error::ArityMismatch {
            field: field.name.clone(),
            rule: rule.name().to_string(),
            expression: call.to_string(),
            expected: rule.parameter_count(),
            actual: call.raw_parameters.len(),
        });
    }

    let is_valid = rule.evaluate(field, &call.raw_parameters)?;
    trace!(
        field = %field.name,
        rule = %call.rule_name,
        is_valid,
        "Executed rule"
    );

    let parameters = call.raw_parameters.clone();
    if is_valid {
        Ok(ValidationOutcome::valid(parameters))
    } else {
        Ok(ValidationOutcome::invalid(parameters, rule.message_template()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::parse;
    use crate::types::RuleParam;

    #[test]
    fn test_execute_valid() {
        let registry = RuleRegistry::new();
        let field = FieldDescriptor::text("age", "12345");
        let outcome = execute(&field, &parse("digits_between(3,8)").unwrap(), &registry).unwrap();

        assert!(outcome.is_valid);
        assert_eq!(
            outcome.parameters,
            vec![RuleParam::Number(3.0), RuleParam::Number(8.0)]
        );
        assert!(outcome.raw_message_template.is_none());
    }

    #[test]
    fn test_execute_invalid_attaches_template() {
        let registry = RuleRegistry::new();
        let field = FieldDescriptor::text("age", "12");
        let outcome = execute(&field, &parse("digits_between(3,8)").unwrap(), &registry).unwrap();

        assert!(!outcome.is_valid);
        assert_eq!(
            outcome.raw_message_template.as_deref(),
            Some("The %field should have between %param0 and %param1 characters.")
        );
    }

    #[test]
    fn test_execute_unknown_rule() {
        let registry = RuleRegistry::new();
        let field = FieldDescriptor::text("name", "x");
        let err = execute(&field, &parse("numeric").unwrap(), &registry).unwrap_err();
        assert!(matches!(err, Error::UnknownRule { name } if name == "numeric"));
    }

    #[test]
    fn test_execute_arity_mismatch() {
        let registry = RuleRegistry::new();
        let field = FieldDescriptor::text("age", "12");
        let err = execute(&field, &parse("digits_between(3)").unwrap(), &registry).unwrap_err();

        match &err {
            Error::ArityMismatch {
                field,
                rule,
                expected,
                actual,
                ..
            } => {
                assert_eq!(field, "age");
                assert_eq!(rule, "digits_between");
                assert_eq!(*expected, 2);
                assert_eq!(*actual, 1);
            }
            other => panic!("expected arity mismatch, got {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("expects 2 extra parameters"));
        assert!(message.contains("with 1 parameters"));
    }

    #[test]
    fn test_execute_extra_parameters_on_bare_rule() {
        let registry = RuleRegistry::new();
        let field = FieldDescriptor::text("name", "x");
        let err = execute(&field, &parse("required(1)").unwrap(), &registry).unwrap_err();
        assert!(matches!(
            err,
            Error::ArityMismatch { expected: 0, actual: 1, .. }
        ));
    }

    #[test]
    fn test_execute_propagates_rule_errors() {
        let registry = RuleRegistry::new();
        let field = FieldDescriptor::text("code", "1234");
        let err = execute(&field, &parse("digits_between(8,3)").unwrap(), &registry).unwrap_err();
        assert!(matches!(err, Error::InvalidRuleCall { .. }));
    }
}
