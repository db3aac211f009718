//! Error message rendering
//!
//! Message templates reference the field with `%field` and rule parameters
//! with `%param0`, `%param1`, ... Only the first occurrence of each token is
//! replaced. Text inserted for one token is never searched for later tokens,
//! so field names or parameters that happen to contain `%param1` come out
//! verbatim.
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use crate::types::RuleParam;

/// A piece of the message under construction
enum Segment {
    /// Template text, still open to substitution
    Template(String),
    /// Substituted text, left alone
    Inserted(String),
}

/// Render a message template for a field and its rule parameters
pub fn render(template: &str, field_name: &str, parameters: &[RuleParam]) -> String {
    let mut segments = vec![Segment::Template(template.to_string())];

    replace_first(&mut segments, "%field", field_name);
    for (i, param) in parameters.iter().enumerate() {
        replace_first(&mut segments, &format!("%param{}", i), &param.to_string());
    }

    segments
        .into_iter()
        .map(|segment| match segment {
            Segment::Template(text) | Segment::Inserted(text) => text,
        })
        .collect()
}

/// Replace the first occurrence of `token` found in template text
fn replace_first(segments: &mut Vec<Segment>, token: &str, replacement: &str) {
    let found = segments.iter().enumerate().find_map(|(index, segment)| match segment {
        Segment::Template(text) => text.find(token).map(|offset| (index, offset)),
        Segment::Inserted(_) => None,
    });

    let Some((index, offset)) = found else {
        return;
    };

    let Segment::Template(text) = segments.remove(index) else {
        return;
    };

    let (before, rest) = text.split_at(offset);
    let after = &rest[token.len()..];
    let mut replacement_segments = Vec::with_capacity(3);
    if !before.is_empty() {
        replacement_segments.push(Segment::Template(before.to_string()));
    }
    replacement_segments.push(Segment::Inserted(replacement.to_string()));
    if !after.is_empty() {
        replacement_segments.push(Segment::Template(after.to_string()));
    }

    for (position, segment) in replacement_segments.into_iter().enumerate() {
        segments.insert(index + position, segment);
    }
}
