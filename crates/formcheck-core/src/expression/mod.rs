//! Rule expression mini-language
//!
//! A spec's rule string is a `|`-delimited list of tokens, each either a bare
//! rule name (`required`) or a rule name followed by comma-separated
//! parameters (`digits_between(3,8)`). Numeric-looking parameters are coerced
//! to numbers; everything else stays text.
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

pub mod parser;
mod prop_tests;

pub use parser::{coerce_parameter, is_numeric_literal, parse, split_expressions, Parser};
