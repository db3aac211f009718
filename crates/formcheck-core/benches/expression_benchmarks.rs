//! Benchmarks for rule expression parsing and validation runs
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use formcheck_core::{
    parse, render, split_expressions, FieldDescriptor, FieldError, FieldSet, FieldValidationSpec,
    RuleParam, RuleRegistry, ValidationSession,
};

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let expressions = vec![
        "required",
        "digits_between(3,8)",
        "file_type(jpg png gif)",
        "digits_between(-.5,1000000)",
        "custom_rule(a,b,c,d,e,f)",
    ];

    for expr in expressions {
        group.bench_with_input(BenchmarkId::new("parse", expr), expr, |b, expr| {
            b.iter(|| {
                let result = parse(black_box(expr));
                black_box(result)
            })
        });
    }

    group.bench_function("split_and_parse", |b| {
        b.iter(|| {
            for token in split_expressions(black_box("required|alpha|digits_between(3,8)|email")) {
                black_box(parse(token).ok());
            }
        })
    });

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let params = vec![RuleParam::Number(3.0), RuleParam::Number(8.0)];

    c.bench_function("render_message", |b| {
        b.iter(|| {
            render(
                black_box("The %field should have between %param0 and %param1 characters."),
                black_box("username"),
                black_box(&params),
            )
        })
    });
}

fn create_record(size: usize) -> (FieldSet, Vec<FieldValidationSpec>) {
    let mut fields = FieldSet::new();
    let mut specs = Vec::with_capacity(size);

    for i in 0..size {
        let name = format!("field_{}", i);
        let value = if i % 3 == 0 { String::new() } else { "Lovelace".to_string() };
        fields.insert(FieldDescriptor::text(&name, value));
        specs.push(FieldValidationSpec::new(name, "required|alpha|digits_between(2,20)"));
    }

    (fields, specs)
}

fn bench_sessions(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_run");
    let registry = RuleRegistry::new();

    for size in [1, 10, 100] {
        let (fields, specs) = create_record(size);
        group.bench_with_input(BenchmarkId::new("fields", size), &specs, |b, specs| {
            b.iter(|| {
                let mut session = ValidationSession::new(
                    &fields,
                    &registry,
                    specs.clone(),
                    |errors: &[FieldError]| {
                        black_box(errors.len());
                    },
                );
                black_box(session.run().ok())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_rendering, bench_sessions);
criterion_main!(benches);
