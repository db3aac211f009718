//! Property-based tests for the rule expression parser
//!
//! These tests check that parsing is total over arbitrary input, agrees with
//! the grammar, and that the canonical form of a parsed call re-parses to
//! the same call.

#[cfg(test)]
mod tests {
    use crate::expression::parse;
    use crate::proptest_strategies::{parsed_rule_call_strategy, rule_token_strategy};
    use crate::types::RuleParam;
    use crate::Error;
    use proptest::prelude::*;

    proptest! {
        /// Property: parsing never panics, it returns a call or a malformed error
        #[test]
        fn prop_parse_never_panics(token in ".{0,64}") {
            match parse(&token) {
                Ok(_) | Err(Error::MalformedRuleExpression { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
            }
        }

        /// Property: every token built from the grammar parses
        #[test]
        fn prop_grammar_tokens_parse(token in rule_token_strategy()) {
            let call = parse(&token);
            prop_assert!(call.is_ok(), "failed to parse {:?}", token);
        }

        /// Property: parsing is deterministic
        #[test]
        fn prop_parse_deterministic(token in rule_token_strategy()) {
            let first = parse(&token).unwrap();
            let second = parse(&token).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: the canonical form re-parses to an equal call
        #[test]
        fn prop_canonical_round_trip(token in rule_token_strategy()) {
            let call = parse(&token).unwrap();
            let reparsed = parse(&call.to_string()).unwrap();
            prop_assert_eq!(call, reparsed);
        }

        /// Property: calls built directly keep their shape through display and parse
        #[test]
        fn prop_generated_calls_round_trip(call in parsed_rule_call_strategy()) {
            let reparsed = parse(&call.to_string()).unwrap();
            prop_assert_eq!(call, reparsed);
        }

        /// Property: integer parameters always come back as numbers
        #[test]
        fn prop_integers_coerce(n in -100_000i64..100_000) {
            let call = parse(&format!("rule({})", n)).unwrap();
            prop_assert_eq!(call.raw_parameters, vec![RuleParam::Number(n as f64)]);
        }
    }
}
