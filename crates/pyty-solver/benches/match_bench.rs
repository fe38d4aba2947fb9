//! Matcher benchmarks.
//!
//! Measures `match_types` over the builtin stub universe for the common
//! shapes: plain classes, numeric promotion, wide unions, nested collections
//! and structural protocol checks.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pyty_solver::{StubUniverse, TypeExpr, match_types};

fn expr(json: &str) -> TypeExpr {
    serde_json::from_str(json).expect("benchmark type expression")
}

/// (name, expected, actual)
const CASES: &[(&str, &str, &str)] = &[
    ("same_class", r#""int""#, r#""int""#),
    ("numeric_promotion", r#""complex""#, r#""bool""#),
    ("mismatch", r#""str""#, r#""int""#),
    (
        "wide_union",
        r#"{"union": ["int", "str", "bytes", "float", "list", "dict", "set", "tuple"]}"#,
        r#"{"union": ["bytes", "set", "bool"]}"#,
    ),
    (
        "nested_collection",
        r#"{"collection": "list", "element": {"collection": "dict", "element": {"tuple": ["float", "str"]}}}"#,
        r#"{"collection": "list", "element": {"collection": "dict", "element": {"tuple": ["int", "str"]}}}"#,
    ),
    ("protocol", r#""Sequence""#, r#""list""#),
];

fn bench_match_types(c: &mut Criterion) {
    let universe = StubUniverse::with_builtins().expect("builtins install");
    let ctx = universe.context();
    let mut group = c.benchmark_group("match_types");

    for &(name, expected, actual) in CASES {
        let expected = universe.lower(&expr(expected)).expect("lower expected");
        let actual = universe.lower(&expr(actual)).expect("lower actual");
        group.bench_with_input(
            BenchmarkId::new("match", name),
            &(expected, actual),
            |b, &(expected, actual)| {
                b.iter(|| match_types(black_box(expected), black_box(actual), &ctx));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_match_types);
criterion_main!(benches);
