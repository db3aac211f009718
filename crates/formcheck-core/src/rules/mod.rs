//! Validation rules and the registry that names them
//!
//! A rule is a pure function of a field descriptor and its typed parameters,
//! paired with the message template used when it fails. Rules are looked up
//! by name through a [`RuleRegistry`]; the six built-in rules are installed
//! by [`RuleRegistry::new`].
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

pub mod built_in;
pub mod registry;

pub use registry::RuleRegistry;

use crate::types::{FieldDescriptor, RuleParam};
use crate::Result;
use std::fmt;
use std::sync::Arc;

/// Signature shared by every rule evaluator
///
/// Returning `Ok(false)` is a validation failure; returning `Err` aborts the
/// whole run. Custom evaluators can use `?` on `anyhow` results, which land in
/// [`Error::Evaluation`](crate::Error::Evaluation).
pub type RuleEvaluator = Arc<dyn Fn(&FieldDescriptor, &[RuleParam]) -> Result<bool> + Send + Sync>;

/// A named rule: evaluator, declared parameter count and message template
#[derive(Clone)]
pub struct RuleDefinition {
    name: String,
    parameter_count: usize,
    evaluator: RuleEvaluator,
    message_template: String,
}

impl RuleDefinition {
    /// Create a rule taking `parameter_count` parameters besides the field
    pub fn new<F>(
        name: impl Into<String>,
        parameter_count: usize,
        evaluate: F,
        message_template: impl Into<String>,
    ) -> Self
    where
        F: Fn(&FieldDescriptor, &[RuleParam]) -> Result<bool> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            parameter_count,
            evaluator: Arc::new(evaluate),
            message_template: message_template.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of parameters expected after the field
    pub fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    /// Number of arguments the evaluator expects, the field included
    pub fn arity(&self) -> usize {
        self.parameter_count + 1
    }

    pub fn message_template(&self) -> &str {
        &self.message_template
    }

    /// Run the evaluator; callers are expected to have checked the arity
    pub fn evaluate(&self, field: &FieldDescriptor, params: &[RuleParam]) -> Result<bool> {
        (self.evaluator)(field, params)
    }

    /// Same rule with a different message template
    pub fn with_message_template(mut self, message_template: impl Into<String>) -> Self {
        self.message_template = message_template.into();
        self
    }
}

impl fmt::Debug for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDefinition")
            .field("name", &self.name)
            .field("parameter_count", &self.parameter_count)
            .field("message_template", &self.message_template)
            .finish_non_exhaustive()
    }
}
