//! Fuzzing target for rule expression parsing
//!
//! Arbitrary rule strings must either parse or fail with an error, and a
//! parsed call must parse again from its canonical form.

#![no_main]

use formcheck_core::{parse, split_expressions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    for token in split_expressions(&input) {
        if let Ok(call) = parse(token) {
            let canonical = call.to_string();
            let _ = parse(&canonical);
        }
    }
});
