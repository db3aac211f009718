//! Rule expression parser
//!
//! Parses a single rule token of the form `name` or `name(p1,p2,...)` into a
//! [`ParsedRuleCall`]. Rule names are made of lowercase ASCII letters,
//! underscores and dashes. The parameter list is everything between the
//! first `(` and the final `)`, split on commas without trimming; there is
//! no nesting and no escaping.
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use crate::types::{ParsedRuleCall, RuleParam};
use crate::{Error, Result};
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

fn number_regex() -> &'static Regex {
    NUMBER_REGEX.get_or_init(|| {
        Regex::new(r"^-?[0-9]*\.?[0-9]+$").expect("number pattern is valid")
    })
}

/// Rule expression parser
pub struct Parser<'a> {
    /// Input token being parsed
    input: &'a str,
    /// Byte offset of the next unread character
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given token
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Parse the token into a rule call
    pub fn parse(mut self) -> Result<ParsedRuleCall> {
        let rule_name = self.parse_rule_name()?;
        let raw_parameters = self.parse_parameters()?;

        Ok(ParsedRuleCall {
            rule_name: rule_name.to_string(),
            raw_parameters,
        })
    }

    /// Parse the leading `[a-z_-]+` rule name
    fn parse_rule_name(&mut self) -> Result<&'a str> {
        let end = self
            .input
            .find(|c: char| !is_rule_name_char(c))
            .unwrap_or(self.input.len());

        if end == 0 {
            let reason = match self.input.chars().next() {
                Some(ch) => format!("rule name must start with [a-z_-], found '{}'", ch),
                None => "empty rule expression".to_string(),
            };
            return Err(self.error(reason));
        }

        self.position = end;
        Ok(&self.input[..end])
    }

    /// Parse the optional `(p1,p2,...)` suffix
    fn parse_parameters(&mut self) -> Result<Vec<RuleParam>> {
        let rest = &self.input[self.position..];
        if rest.is_empty() {
            return Ok(Vec::new());
        }

        let Some(after_open) = rest.strip_prefix('(') else {
            return Err(self.error(format!(
                "unexpected character '{}' after rule name",
                rest.chars().next().unwrap_or_default()
            )));
        };

        let Some(inner) = after_open.strip_suffix(')') else {
            return Err(self.error("missing closing parenthesis"));
        };

        if inner.is_empty() {
            return Err(self.error("empty parameter list"));
        }

        if inner.contains(is_line_terminator) {
            return Err(self.error("line break inside parameter list"));
        }

        self.position = self.input.len();
        Ok(inner.split(',').map(coerce_parameter).collect())
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::MalformedRuleExpression {
            expression: self.input.to_string(),
            field: None,
            reason: reason.into(),
        }
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_rule_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c == '_' || c == '-'
}

/// Whether a raw parameter is coerced to a number
pub fn is_numeric_literal(raw: &str) -> bool {
    number_regex().is_match(raw)
}

/// Turn a raw parameter into a number when it looks like one
pub fn coerce_parameter(raw: &str) -> RuleParam {
    if !is_numeric_literal(raw) {
        return RuleParam::Text(raw.to_string());
    }

    // The literal pattern allows a missing integer part (".5", "-.5")
    let normalized = match raw.strip_prefix('-') {
        Some(unsigned) if unsigned.starts_with('.') => format!("-0{}", unsigned),
        None if raw.starts_with('.') => format!("0{}", raw),
        _ => raw.to_string(),
    };

    match normalized.parse::<f64>() {
        Ok(n) => RuleParam::Number(n),
        Err(_) => RuleParam::Text(raw.to_string()),
    }
}

/// Parse a single rule token
pub fn parse(token: &str) -> Result<ParsedRuleCall> {
    Parser::new(token).parse()
}

/// Split a spec's rule string into its tokens, preserving order
pub fn split_expressions(rule_expressions: &str) -> impl Iterator<Item = &str> {
    rule_expressions.split('|')
}

impl FromStr for ParsedRuleCall {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}
