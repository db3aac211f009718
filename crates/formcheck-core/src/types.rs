//! Core data types for Formcheck
//!
//! This module contains the records that flow between the parser, the
//! executor and the validation session: field descriptors supplied by a
//! field source, field specs supplied by the caller, parsed rule calls,
//! per-rule outcomes and the field errors handed to the result callback.
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of input a field represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free-form text input
    #[default]
    Text,
    /// Checkbox, validated through its checked-state
    Checkbox,
    /// Radio button, validated through its checked-state
    Radio,
    /// File picker, the value is the selected file name
    File,
    /// Anything else (select, password, textarea...)
    #[serde(other)]
    Other,
}

impl FieldKind {
    /// Whether `required` looks at the checked-state instead of the value
    pub fn is_checkable(self) -> bool {
        matches!(self, FieldKind::Checkbox | FieldKind::Radio)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Checkbox => write!(f, "checkbox"),
            FieldKind::Radio => write!(f, "radio"),
            FieldKind::File => write!(f, "file"),
            FieldKind::Other => write!(f, "other"),
        }
    }
}

/// A field as seen by the rules: name, kind, current value and checked-state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

impl FieldDescriptor {
    /// Create a descriptor of the given kind with no value and no checked-state
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: None,
            checked: None,
        }
    }

    /// Text field holding `value`
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text).with_value(value)
    }

    /// Checkbox with the given checked-state
    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self::new(name, FieldKind::Checkbox).with_checked(checked)
    }

    /// Radio button with the given checked-state
    pub fn radio(name: impl Into<String>, checked: bool) -> Self {
        Self::new(name, FieldKind::Radio).with_checked(checked)
    }

    /// File input whose value is the selected file name
    pub fn file(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::File).with_value(file_name)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    /// The current value, with an absent value read as the empty string
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Whether the field is explicitly checked
    pub fn is_checked(&self) -> bool {
        self.checked == Some(true)
    }
}

/// A typed rule parameter
///
/// Parameters that look like numbers are coerced when a rule expression is
/// parsed; everything else is passed through as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleParam {
    Number(f64),
    Text(String),
}

impl RuleParam {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RuleParam::Number(n) => Some(*n),
            RuleParam::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RuleParam::Text(s) => Some(s),
            RuleParam::Number(_) => None,
        }
    }

    /// Name of the parameter's type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            RuleParam::Number(_) => "number",
            RuleParam::Text(_) => "string",
        }
    }
}

impl From<f64> for RuleParam {
    fn from(n: f64) -> Self {
        RuleParam::Number(n)
    }
}

impl From<&str> for RuleParam {
    fn from(s: &str) -> Self {
        RuleParam::Text(s.to_string())
    }
}

impl From<String> for RuleParam {
    fn from(s: String) -> Self {
        RuleParam::Text(s)
    }
}

impl fmt::Display for RuleParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleParam::Number(n) => f.write_str(&format_number(*n)),
            RuleParam::Text(s) => f.write_str(s),
        }
    }
}

/// Render a number the way it is substituted into messages
///
/// Shortest round-trip digits; exponent notation (`1e+21`, `1e-7`) outside
/// `[1e-6, 1e21)`; negative zero as `0`.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", n);
    }

    let exponential = format!("{:e}", n);
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exponential,
    }
}

/// The rules to apply, in order, to one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidationSpec {
    /// Name of the field to look up in the field source
    #[serde(rename = "field", alias = "name")]
    pub field_name: String,
    /// Pipe-delimited rule expressions, e.g. `required|digits_between(3,8)`
    #[serde(rename = "rules", alias = "validations")]
    pub rule_expressions: String,
}

impl FieldValidationSpec {
    pub fn new(field_name: impl Into<String>, rule_expressions: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            rule_expressions: rule_expressions.into(),
        }
    }
}

/// A single parsed rule token: rule name plus typed parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRuleCall {
    pub rule_name: String,
    #[serde(default)]
    pub raw_parameters: Vec<RuleParam>,
}

impl ParsedRuleCall {
    pub fn new(rule_name: impl Into<String>, raw_parameters: Vec<RuleParam>) -> Self {
        Self {
            rule_name: rule_name.into(),
            raw_parameters,
        }
    }

    /// Number of arguments an evaluator receives, the field included
    pub fn argument_count(&self) -> usize {
        self.raw_parameters.len() + 1
    }
}

/// Canonical form: `name` or `name(p0,p1,...)`
impl fmt::Display for ParsedRuleCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rule_name)?;
        if self.raw_parameters.is_empty() {
            return Ok(());
        }

        f.write_str("(")?;
        for (i, param) in self.raw_parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", param)?;
        }
        f.write_str(")")
    }
}

/// Result of running one rule against one field
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub parameters: Vec<RuleParam>,
    /// The rule's message template, only set when the rule failed
    pub raw_message_template: Option<String>,
}

impl ValidationOutcome {
    pub fn valid(parameters: Vec<RuleParam>) -> Self {
        Self {
            is_valid: true,
            parameters,
            raw_message_template: None,
        }
    }

    pub fn invalid(parameters: Vec<RuleParam>, message_template: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            parameters,
            raw_message_template: Some(message_template.into()),
        }
    }
}

/// The first failing rule of a field, with its rendered message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field_name: String,
    pub field_spec: FieldValidationSpec,
    /// The rule token that failed, exactly as written in the field spec
    pub rule_expression: String,
    pub parameters: Vec<RuleParam>,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_name, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display() {
        assert_eq!(RuleParam::Number(3.0).to_string(), "3");
        assert_eq!(RuleParam::Number(-8.0).to_string(), "-8");
        assert_eq!(RuleParam::Number(3.5).to_string(), "3.5");
        assert_eq!(RuleParam::Number(-0.25).to_string(), "-0.25");
        assert_eq!(RuleParam::Number(-0.0).to_string(), "0");
        assert_eq!(RuleParam::Text("jpg png".into()).to_string(), "jpg png");
    }

    #[test]
    fn test_number_display_extremes() {
        assert_eq!(RuleParam::Number(1e21).to_string(), "1e+21");
        assert_eq!(RuleParam::Number(-1.5e300).to_string(), "-1.5e+300");
        assert_eq!(RuleParam::Number(1e-7).to_string(), "1e-7");
        assert_eq!(RuleParam::Number(2.5e-8).to_string(), "2.5e-8");
        assert_eq!(RuleParam::Number(0.000001).to_string(), "0.000001");
        assert_eq!(RuleParam::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(RuleParam::Number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(RuleParam::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn test_parsed_call_display() {
        let call = ParsedRuleCall::new("required", vec![]);
        assert_eq!(call.to_string(), "required");

        let call = ParsedRuleCall::new(
            "digits_between",
            vec![RuleParam::Number(3.0), RuleParam::Number(8.0)],
        );
        assert_eq!(call.to_string(), "digits_between(3,8)");
        assert_eq!(call.argument_count(), 3);
    }

    #[test]
    fn test_field_descriptor_helpers() {
        let field = FieldDescriptor::new("nickname", FieldKind::Text);
        assert_eq!(field.value_or_empty(), "");
        assert!(!field.is_checked());

        let field = FieldDescriptor::checkbox("terms", true);
        assert!(field.is_checked());
        assert!(field.kind.is_checkable());
        assert!(!FieldKind::File.is_checkable());
    }

    #[test]
    fn test_field_kind_serde() {
        let kind: FieldKind = serde_json::from_str("\"radio\"").unwrap();
        assert_eq!(kind, FieldKind::Radio);

        let kind: FieldKind = serde_json::from_str("\"password\"").unwrap();
        assert_eq!(kind, FieldKind::Other);

        assert_eq!(serde_json::to_string(&FieldKind::Checkbox).unwrap(), "\"checkbox\"");
    }

    #[test]
    fn test_field_spec_aliases() {
        let spec: FieldValidationSpec =
            serde_json::from_str(r#"{"name": "age", "validations": "required"}"#).unwrap();
        assert_eq!(spec, FieldValidationSpec::new("age", "required"));

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["field"], "age");
        assert_eq!(json["rules"], "required");
    }

    #[test]
    fn test_rule_param_serde_untagged() {
        let params: Vec<RuleParam> = serde_json::from_str(r#"[3, "jpg png"]"#).unwrap();
        assert_eq!(
            params,
            vec![RuleParam::Number(3.0), RuleParam::Text("jpg png".to_string())]
        );
    }
}
