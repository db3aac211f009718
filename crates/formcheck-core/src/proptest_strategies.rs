//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random
//! but valid instances of core Formcheck types for property testing.

#![cfg(test)]

use crate::types::*;
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;

/// Strategy for generating rule names matching `[a-z_-]+`
pub fn rule_name_strategy() -> impl Strategy<Value = String> {
    "[a-z_-]{1,20}"
}

/// Strategy for generating raw rule tokens that follow the grammar
pub fn rule_token_strategy() -> impl Strategy<Value = String> {
    (
        rule_name_strategy(),
        option::of(vec("[a-z0-9 .-]{1,8}", 1..4)),
    )
        .prop_map(|(name, params)| match params {
            Some(params) => format!("{}({})", name, params.join(",")),
            None => name,
        })
}

/// Strategy for generating typed parameters whose display form re-parses
/// to the same value
pub fn rule_param_strategy() -> impl Strategy<Value = RuleParam> {
    prop_oneof![
        (-1000i32..1000, 0u8..4)
            .prop_map(|(whole, quarters)| RuleParam::Number(whole as f64 + quarters as f64 * 0.25)),
        "[a-z][a-z ]{0,10}".prop_map(RuleParam::Text),
    ]
}

/// Strategy for generating parsed rule calls
pub fn parsed_rule_call_strategy() -> impl Strategy<Value = ParsedRuleCall> {
    (rule_name_strategy(), vec(rule_param_strategy(), 0..4))
        .prop_map(|(rule_name, raw_parameters)| ParsedRuleCall {
            rule_name,
            raw_parameters,
        })
}

/// Strategy for generating field kinds
pub fn field_kind_strategy() -> impl Strategy<Value = FieldKind> {
    prop_oneof![
        Just(FieldKind::Text),
        Just(FieldKind::Checkbox),
        Just(FieldKind::Radio),
        Just(FieldKind::File),
        Just(FieldKind::Other),
    ]
}

/// Strategy for generating field descriptors
pub fn field_descriptor_strategy() -> impl Strategy<Value = FieldDescriptor> {
    (
        "[a-z_]{1,12}",
        field_kind_strategy(),
        option::of("[a-zA-Z0-9 @.]{0,16}"),
        option::of(any::<bool>()),
    )
        .prop_map(|(name, kind, value, checked)| FieldDescriptor {
            name,
            kind,
            value,
            checked,
        })
}
