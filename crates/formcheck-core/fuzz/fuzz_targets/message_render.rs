//! Fuzzing target for message rendering
//!
//! Templates, field names and parameters are all attacker-controlled here;
//! rendering must never panic on odd token placement or multi-byte text.

#![no_main]

use formcheck_core::{render, RuleParam};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let mut parts = input.split('\u{0}');

    let template = parts.next().unwrap_or_default();
    let field = parts.next().unwrap_or_default();
    let params: Vec<RuleParam> = parts.map(|p| RuleParam::Text(p.to_string())).collect();

    let _ = render(template, field, &params);
});
