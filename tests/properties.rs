//! The quantified invariants from the core design, each turned into a
//! concrete (if not exhaustively quantified) test.

use exprlang::{evaluate_ast, parse, EvalOptions, Environment, Limits, ParseOptions, Value};

#[test]
fn span_covers_trimmed_non_trivia_content() {
    let src = "  1 + 2  ";
    let expr = parse(src, ParseOptions::default()).unwrap();
    let span = expr.span();
    assert_eq!(&src[span.start..span.end], "1 + 2");
}

#[test]
fn parse_error_index_is_within_input_bounds() {
    for src in ["(", "1 +", "[1, 2", "\"unterminated"] {
        let err = parse(src, ParseOptions::default()).unwrap_err();
        assert!(err.index <= src.len(), "index {} out of bounds for {:?}", err.index, src);
    }
}

#[test]
fn step_count_is_monotonic_with_the_budget() {
    let expr = parse("1 + 2 * 3 - 4 / 5", ParseOptions::default()).unwrap();
    // A budget of 0 always fails; a generous budget always succeeds for the
    // same expression and environment.
    let tight = EvalOptions { limits: Limits { max_steps: 0, ..Limits::default() }, ..EvalOptions::default() };
    assert!(evaluate_ast(&expr, tight).is_err());
    let loose = EvalOptions::default();
    assert!(evaluate_ast(&expr, loose).is_ok());
}

#[test]
fn parsing_is_pure_and_repeatable() {
    let a = parse("1 + 2 * 3", ParseOptions::default()).unwrap();
    let b = parse("1 + 2 * 3", ParseOptions::default()).unwrap();
    assert_eq!(format!("{a:?}"), format!("{b:?}"));
}

#[test]
fn evaluation_is_repeatable_for_pure_environments() {
    let expr = parse("1 + 2 * 3", ParseOptions::default()).unwrap();
    let a = evaluate_ast(&expr, EvalOptions::default()).unwrap();
    let b = evaluate_ast(&expr, EvalOptions::default()).unwrap();
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn short_circuit_and_avoids_errors_from_the_right_operand() {
    let expr = parse("false && (1 / 0 == 1 / 0 && boom.nope.nope)", ParseOptions::default()).unwrap();
    // `boom` is unbound, but `&&`'s left side is falsy, so the right side —
    // which would raise `UnknownIdentifier` — must never be evaluated.
    assert!(evaluate_ast(&expr, EvalOptions::default()).is_ok());
}

#[test]
fn short_circuit_or_avoids_errors_from_the_right_operand() {
    let expr = parse("true || boom.nope.nope", ParseOptions::default()).unwrap();
    assert!(evaluate_ast(&expr, EvalOptions::default()).is_ok());
}

#[test]
fn array_literal_preserves_order_and_count() {
    let expr = parse("[3, 1, 4, 1, 5]", ParseOptions::default()).unwrap();
    let value = evaluate_ast(&expr, EvalOptions::default()).unwrap();
    match value {
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(|v| v.to_string()).collect();
            assert_eq!(rendered, vec!["3", "1", "4", "1", "5"]);
        }
        other => panic!("expected an array, got {other:?}"),
    }
}

#[test]
fn array_literal_at_the_element_limit_still_succeeds() {
    let src = format!("[{}]", (0..10).map(|n| n.to_string()).collect::<Vec<_>>().join(", "));
    let expr = parse(&src, ParseOptions::default()).unwrap();
    let opts = EvalOptions { limits: Limits { max_array_elements: 10, ..Limits::default() }, ..EvalOptions::default() };
    assert!(evaluate_ast(&expr, opts).is_ok());
}

#[test]
fn loose_equality_never_coerces_a_non_primitive_against_a_primitive() {
    let cases = ["[] == 0", "[] == \"\"", "[] == false", "[] == null"];
    for src in cases {
        let expr = parse(src, ParseOptions::default()).unwrap();
        let v = evaluate_ast(&expr, EvalOptions::default()).unwrap();
        assert!(matches!(v, Value::Boolean(false)), "expected {src} to be false");
    }
}

#[test]
fn environment_validation_rejects_non_object_roots() {
    assert!(Environment::new(Value::array(vec![])).is_err());
    assert!(Environment::new(Value::Number(1.0)).is_err());
    assert!(Environment::new(Value::Boolean(true)).is_err());
}
