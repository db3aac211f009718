//! Rule registry - named catalog of validation rules
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use super::{built_in, RuleDefinition};
use crate::types::{FieldDescriptor, RuleParam};
use crate::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

/// Registry of validation rules, keyed by rule name
///
/// The registry is read-only while validation sessions borrow it; add or
/// replace rules before handing it out.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: HashMap<String, RuleDefinition>,
}

impl RuleRegistry {
    /// Create a registry holding the built-in rules
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for definition in built_in::definitions() {
            registry.register_definition(definition);
        }
        debug!("Registered {} built-in rules", registry.len());
        registry
    }

    /// Create a registry with no rules at all
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Add a rule, replacing any rule already registered under that name
    ///
    /// `parameter_count` is the number of parameters the rule takes after the
    /// field; rule expressions passing a different number fail with an arity
    /// error. Returns the replaced definition, if any.
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        parameter_count: usize,
        evaluate: F,
        message_template: impl Into<String>,
    ) -> Option<RuleDefinition>
    where
        F: Fn(&FieldDescriptor, &[RuleParam]) -> Result<bool> + Send + Sync + 'static,
    {
        self.register_definition(RuleDefinition::new(
            name,
            parameter_count,
            evaluate,
            message_template,
        ))
    }

    /// Add a prebuilt definition, replacing any rule with the same name
    pub fn register_definition(&mut self, definition: RuleDefinition) -> Option<RuleDefinition> {
        debug!(
            rule = definition.name(),
            parameters = definition.parameter_count(),
            "Registering rule"
        );
        self.rules.insert(definition.name().to_string(), definition)
    }

    /// Look up a rule by name
    pub fn lookup(&self, name: &str) -> Result<&RuleDefinition> {
        self.rules.get(name).ok_or_else(|| Error::UnknownRule {
            name: name.to_string(),
        })
    }

    /// Replace the message template of an existing rule
    pub fn set_message(&mut self, name: &str, message_template: impl Into<String>) -> Result<()> {
        let definition = self.rules.get_mut(name).ok_or_else(|| Error::UnknownRule {
            name: name.to_string(),
        })?;
        let template = message_template.into();
        debug!(rule = name, template = %template, "Overriding rule message");
        *definition = definition.clone().with_message_template(template);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered rules sorted by name
    pub fn definitions(&self) -> Vec<&RuleDefinition> {
        let mut definitions: Vec<&RuleDefinition> = self.rules.values().collect();
        definitions.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        definitions
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
