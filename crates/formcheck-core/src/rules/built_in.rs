//! Built-in validation rules
//!
//! The default catalog: `required`, `alpha`, `extended_alpha`,
//! `digits_between`, `email` and `file_type`. An absent field value is read
//! as the empty string by every rule here. Emptiness is only ever rejected by
//! `required`; the character-set and shape rules accept an empty value so
//! that they can be combined with `required` or left optional.
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use super::RuleDefinition;
use crate::types::{FieldDescriptor, RuleParam};
use crate::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

pub const REQUIRED: &str = "required";
pub const ALPHA: &str = "alpha";
pub const EXTENDED_ALPHA: &str = "extended_alpha";
pub const DIGITS_BETWEEN: &str = "digits_between";
pub const EMAIL: &str = "email";
pub const FILE_TYPE: &str = "file_type";

static ALPHA_REGEX: OnceLock<Regex> = OnceLock::new();
static EXTENDED_ALPHA_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn alpha_regex() -> &'static Regex {
    ALPHA_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z]*$").expect("alpha pattern is valid"))
}

fn extended_alpha_regex() -> &'static Regex {
    EXTENDED_ALPHA_REGEX.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z'áéíóúäëïöüàèìòùâêîôûçÁÉÍÓÚÄËÏÖÜÀÈÌÒÙÂÊÎÔÛÇ ]*$",
        )
        .expect("extended alpha pattern is valid")
    })
}

fn email_regex() -> &'static Regex {
    // `.` here must not cross line terminators
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^(?:[^\n\r\x{2028}\x{2029}]+@[^\n\r\x{2028}\x{2029}]+)*$")
            .expect("email pattern is valid")
    })
}

/// All built-in rule definitions
pub fn definitions() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(REQUIRED, 0, required, "The %field is required."),
        RuleDefinition::new(
            ALPHA,
            0,
            alpha,
            "The %field must include only alphabetic characters.",
        ),
        RuleDefinition::new(
            EXTENDED_ALPHA,
            0,
            extended_alpha,
            "The %field must include only alphabetic characters.",
        ),
        RuleDefinition::new(
            DIGITS_BETWEEN,
            2,
            digits_between,
            "The %field should have between %param0 and %param1 characters.",
        ),
        RuleDefinition::new(EMAIL, 0, email, "The e-mail is not correct."),
        RuleDefinition::new(
            FILE_TYPE,
            1,
            file_type,
            "The file must have one of the following types: %param0.",
        ),
    ]
}

/// Checkboxes and radios must be checked; anything else must be non-empty
pub fn required(field: &FieldDescriptor, _params: &[RuleParam]) -> Result<bool> {
    if field.kind.is_checkable() {
        return Ok(field.is_checked());
    }

    Ok(!field.value_or_empty().is_empty())
}

/// ASCII letters only
pub fn alpha(field: &FieldDescriptor, _params: &[RuleParam]) -> Result<bool> {
    Ok(alpha_regex().is_match(field.value_or_empty()))
}

/// Letters, apostrophe, space and common accented Latin vowels
pub fn extended_alpha(field: &FieldDescriptor, _params: &[RuleParam]) -> Result<bool> {
    Ok(extended_alpha_regex().is_match(field.value_or_empty()))
}

/// Value length within `[min, max]`; an empty value passes only when `min` is 0
///
/// Text bounds (`digits_between(3, 8)` keeps `" 8"` as text) are compared the
/// loose way: two texts by their characters, anything else as numbers, with
/// unreadable text never ordering before or after anything.
pub fn digits_between(field: &FieldDescriptor, params: &[RuleParam]) -> Result<bool> {
    let min = param(DIGITS_BETWEEN, params, 0)?;
    let max = param(DIGITS_BETWEEN, params, 1)?;

    if loosely_greater(min, max) {
        return Err(Error::invalid_call(
            DIGITS_BETWEEN,
            format!(
                "The call digits_between({},{},{}) is wrong because min value is greater than max value.",
                field.name, min, max
            ),
        ));
    }

    let (min, max) = (loose_number(min), loose_number(max));
    let value = field.value_or_empty();
    if value.is_empty() && min == 0.0 {
        return Ok(true);
    }

    let length = value.chars().count() as f64;
    Ok(!(length < min || length > max))
}

/// Empty, or anything shaped like `something@something`
pub fn email(field: &FieldDescriptor, _params: &[RuleParam]) -> Result<bool> {
    Ok(email_regex().is_match(field.value_or_empty()))
}

/// Empty, or ending in one of the space-separated types, ignoring case
pub fn file_type(field: &FieldDescriptor, params: &[RuleParam]) -> Result<bool> {
    let types = params
        .first()
        .map(RuleParam::to_string)
        .ok_or_else(|| missing_param(FILE_TYPE, 0))?;

    let value = field.value_or_empty();
    if value.is_empty() {
        return Ok(true);
    }

    let value = value.to_lowercase();
    Ok(types
        .split(' ')
        .any(|alternative| value.ends_with(&alternative.to_lowercase())))
}

fn param<'p>(rule: &str, params: &'p [RuleParam], index: usize) -> Result<&'p RuleParam> {
    params.get(index).ok_or_else(|| missing_param(rule, index))
}

fn loosely_greater(left: &RuleParam, right: &RuleParam) -> bool {
    match (left, right) {
        (RuleParam::Text(l), RuleParam::Text(r)) => l.encode_utf16().gt(r.encode_utf16()),
        _ => loose_number(left) > loose_number(right),
    }
}

static LOOSE_DECIMAL_REGEX: OnceLock<Regex> = OnceLock::new();

fn loose_decimal_regex() -> &'static Regex {
    LOOSE_DECIMAL_REGEX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
            .expect("loose decimal pattern is valid")
    })
}

/// Read a parameter as a number the way a loosely typed comparison would
///
/// Surrounding whitespace is ignored, blank text is 0, `Infinity` and
/// `0x`/`0o`/`0b` integers are understood, and anything else is NaN.
pub fn loose_number(param: &RuleParam) -> f64 {
    let text = match param {
        RuleParam::Number(n) => return *n,
        RuleParam::Text(text) => text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}'),
    };

    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, digit| acc * radix as f64 + digit as f64);
    }

    if !loose_decimal_regex().is_match(text) {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

fn missing_param(rule: &str, index: usize) -> Error {
    Error::InvalidParameter {
        rule: rule.to_string(),
        index,
        expected: "a value".to_string(),
        found: "nothing".to_string(),
    }
}
