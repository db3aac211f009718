//! Validation session - runs every field spec against a field source
//!
//! A session ties together a field source, a rule registry, the ordered list
//! of field specs and a result callback. Each [`run`](ValidationSession::run)
//! walks the specs in declaration order, applies each field's rules until the
//! first failure, and hands the collected errors to the callback exactly
//! once. Configuration problems (malformed expressions, unknown rules, arity
//! mismatches, rules rejecting their parameters) abort the run with an `Err`
//! and the callback is not invoked.
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use crate::executor::execute;
use crate::expression::{parse, split_expressions};
use crate::message::render;
use crate::rules::{RuleDefinition, RuleRegistry};
use crate::source::FieldSource;
use crate::types::{FieldDescriptor, FieldError, FieldValidationSpec};
use crate::{Error, Result};
use tracing::{debug, info_span, warn};

/// Callback receiving the final error list of a run; empty means success
pub type ResultCallback<'a> = Box<dyn FnMut(&[FieldError]) + 'a>;

/// One configured validation of a record
pub struct ValidationSession<'a> {
    field_source: &'a dyn FieldSource,
    registry: &'a RuleRegistry,
    specs: Vec<FieldValidationSpec>,
    on_result: ResultCallback<'a>,
}

impl<'a> ValidationSession<'a> {
    /// Create a session from all of its parts
    pub fn new<F>(
        field_source: &'a dyn FieldSource,
        registry: &'a RuleRegistry,
        specs: Vec<FieldValidationSpec>,
        on_result: F,
    ) -> Self
    where
        F: FnMut(&[FieldError]) + 'a,
    {
        Self {
            field_source,
            registry,
            specs,
            on_result: Box::new(on_result),
        }
    }

    /// Start building a session piece by piece
    pub fn builder() -> ValidationSessionBuilder<'a> {
        ValidationSessionBuilder::default()
    }

    /// Validate every spec, report the errors to the callback and return
    /// whether the record is valid
    pub fn run(&mut self) -> Result<bool> {
        let span = info_span!("validation_run", specs = self.specs.len());
        let _enter = span.enter();

        let errors = self.evaluate()?;
        debug!(errors = errors.len(), "Validation run finished");

        (self.on_result)(&errors);
        Ok(errors.is_empty())
    }

    /// Validate every spec and return the errors without invoking the callback
    pub fn evaluate(&self) -> Result<Vec<FieldError>> {
        let mut errors = Vec::new();

        for spec in &self.specs {
            let Some(field) = self.field_source.field(&spec.field_name) else {
                warn!(
                    field = %spec.field_name,
                    "The record doesn't have the field \"{}\", skipping its validations",
                    spec.field_name
                );
                continue;
            };

            if let Some(error) = self.validate_field(spec, field)? {
                errors.push(error);
            }
        }

        Ok(errors)
    }

    /// Apply a field's rules in order, stopping at the first failure
    fn validate_field(
        &self,
        spec: &FieldValidationSpec,
        field: &FieldDescriptor,
    ) -> Result<Option<FieldError>> {
        for expression in split_expressions(&spec.rule_expressions) {
            let call = parse(expression).map_err(|e| e.in_field(&spec.field_name))?;
            let outcome = execute(field, &call, self.registry)?;

            if outcome.is_valid {
                continue;
            }

            let template = outcome.raw_message_template.as_deref().unwrap_or_default();
            let message = render(template, &spec.field_name, &outcome.parameters);
            return Ok(Some(FieldError {
                field_name: spec.field_name.clone(),
                field_spec: spec.clone(),
                rule_expression: expression.to_string(),
                parameters: outcome.parameters,
                message,
            }));
        }

        Ok(None)
    }

    pub fn field_source(&self) -> &'a dyn FieldSource {
        self.field_source
    }

    pub fn registry(&self) -> &'a RuleRegistry {
        self.registry
    }

    pub fn specs(&self) -> &[FieldValidationSpec] {
        &self.specs
    }

    /// The result callback, callable by a caller that gathered errors with
    /// [`evaluate`](Self::evaluate) and wants to report them itself
    pub fn result_callback(&mut self) -> &mut (dyn FnMut(&[FieldError]) + 'a) {
        self.on_result.as_mut()
    }

    /// Look up a rule in the session's registry
    pub fn lookup_rule(&self, name: &str) -> Result<&'a RuleDefinition> {
        self.registry.lookup(name)
    }
}

/// Builder for [`ValidationSession`]; every part is mandatory
#[derive(Default)]
pub struct ValidationSessionBuilder<'a> {
    field_source: Option<&'a dyn FieldSource>,
    registry: Option<&'a RuleRegistry>,
    specs: Option<Vec<FieldValidationSpec>>,
    on_result: Option<ResultCallback<'a>>,
}

impl<'a> ValidationSessionBuilder<'a> {
    pub fn field_source(mut self, field_source: &'a dyn FieldSource) -> Self {
        self.field_source = Some(field_source);
        self
    }

    pub fn registry(mut self, registry: &'a RuleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn specs<I>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = FieldValidationSpec>,
    {
        self.specs = Some(specs.into_iter().collect());
        self
    }

    pub fn on_result<F>(mut self, on_result: F) -> Self
    where
        F: FnMut(&[FieldError]) + 'a,
    {
        self.on_result = Some(Box::new(on_result));
        self
    }

    /// Build the session, failing if any part was not provided
    pub fn build(self) -> Result<ValidationSession<'a>> {
        let field_source = self
            .field_source
            .ok_or_else(|| missing("a field source"))?;
        let registry = self.registry.ok_or_else(|| missing("a rule registry"))?;
        let specs = self.specs.ok_or_else(|| missing("the field validation specs"))?;
        let on_result = self.on_result.ok_or_else(|| missing("a result callback"))?;

        Ok(ValidationSession {
            field_source,
            registry,
            specs,
            on_result,
        })
    }
}

fn missing(what: &str) -> Error {
    Error::configuration(format!("ValidationSession: you must provide {}", what))
}
