use super::*;

fn outcome(expected: &str, actual: &str, matched: bool, expect: Option<bool>) -> QueryOutcome {
    QueryOutcome {
        expected: expected.to_string(),
        actual: actual.to_string(),
        matched,
        expect,
    }
}

#[test]
fn test_plain_rendering() {
    let reporter = Reporter::new(false);
    let outcomes = vec![
        outcome("float", "int", true, None),
        outcome("int", "float", false, Some(false)),
        outcome("str", "bytes", false, Some(true)),
    ];

    assert_eq!(
        reporter.render(&outcomes),
        "match: float <- int\nmismatch: int <- float\nmismatch: str <- bytes (expected match)"
    );
    assert_eq!(reporter.summary(&outcomes), "3 queries, 1 failed");
    assert_eq!(reporter.summary(&outcomes[..1]), "1 query, 0 failed");
}

#[test]
fn test_colored_rendering_keeps_text() {
    colored::control::set_override(true);
    let reporter = Reporter::new(true);
    let line = reporter.format_outcome(&outcome("int", "bool", true, Some(false)));

    assert!(line.contains("match"));
    assert!(line.contains("int <- bool"));
    assert!(line.contains("expected mismatch"));
    assert!(line.contains('\u{1b}'));
}

#[test]
fn test_json_rendering() {
    let outcomes = vec![
        outcome("float", "int", true, None),
        outcome("int", "float", false, Some(true)),
    ];
    let json = Reporter::render_json(&outcomes).expect("serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value[0]["matched"], true);
    assert!(value[0].get("expect").is_none());
    assert_eq!(value[1]["expected"], "int");
    assert_eq!(value[1]["expect"], true);
}
