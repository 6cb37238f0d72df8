//! End-to-end scenarios against the public API, exercising parsing and
//! evaluation together.

use exprlang::{evaluate, EvalError, EvalOptions, Environment, Limits, Value};
use std::collections::HashMap;

fn env_from(pairs: Vec<(&str, Value)>) -> Environment {
    let map: HashMap<String, Value> = pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    Environment::new(Value::object(map)).unwrap()
}

fn host_fn(f: impl Fn(&[Value]) -> Result<Value, String> + 'static) -> Value {
    Value::Function(exprlang::value::Function::free(f))
}

#[test]
fn arithmetic_precedence_scenario() {
    let v = evaluate("1 + 2 * 3", EvalOptions::default()).unwrap();
    assert_eq!(v.to_string(), "7");
}

#[test]
fn string_concat_coercion_scenario() {
    let env = env_from(vec![("undefined", Value::Undefined)]);
    let opts = EvalOptions { env, ..EvalOptions::default() };
    let v = evaluate("'a' + 1 + true + null + undefined", opts).unwrap();
    assert_eq!(v.to_string(), "a1truenullundefined");
}

#[test]
fn nested_member_access_scenario() {
    let mut user = HashMap::new();
    user.insert("plan".to_string(), Value::String("free".to_string()));
    let env = env_from(vec![("user", Value::object(user))]);
    let opts = EvalOptions { env, ..EvalOptions::default() };
    let v = evaluate("user.plan", opts).unwrap();
    assert_eq!(v.to_string(), "free");
}

#[test]
fn array_length_and_missing_member_scenario() {
    let xs = Value::array(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]);
    let env = env_from(vec![("xs", xs)]);
    let opts = EvalOptions { env: env.clone(), ..EvalOptions::default() };
    assert_eq!(evaluate("xs.length", opts).unwrap().to_string(), "3");
    let opts2 = EvalOptions { env, ..EvalOptions::default() };
    assert!(matches!(evaluate("xs.nope", opts2).unwrap(), Value::Undefined));
}

#[test]
fn pipeline_desugaring_scenarios() {
    let inc = host_fn(|args| match args {
        [Value::Number(n)] => Ok(Value::Number(n + 1.0)),
        _ => Err("inc: expected one number".to_string()),
    });
    let env = env_from(vec![("inc", inc)]);
    let opts = EvalOptions { env, ..EvalOptions::default() };
    assert_eq!(evaluate("41 |> inc |> inc", opts).unwrap().to_string(), "43");

    let add = host_fn(|args| match args {
        [Value::Number(a), Value::Number(b)] => Ok(Value::Number(a + b)),
        _ => Err("add: expected two numbers".to_string()),
    });
    let env2 = env_from(vec![("add", add)]);
    let opts2 = EvalOptions { env: env2, ..EvalOptions::default() };
    assert_eq!(evaluate("41 |> add(1)", opts2).unwrap().to_string(), "42");
}

#[test]
fn forbidden_member_scenario() {
    let mut obj = HashMap::new();
    obj.insert("a".to_string(), Value::Number(1.0));
    let env = env_from(vec![("obj", Value::object(obj))]);
    let opts = EvalOptions { env, ..EvalOptions::default() };
    let err = evaluate("obj.__proto__", opts).unwrap_err();
    assert!(matches!(err, EvalError::ForbiddenMember { .. }));
}

#[test]
fn budget_exceeded_scenario() {
    let opts = EvalOptions { limits: Limits { max_steps: 0, ..Limits::default() }, ..EvalOptions::default() };
    let err = evaluate("1 + 2", opts).unwrap_err();
    assert!(matches!(err, EvalError::BudgetExceeded { .. }));
}

#[test]
fn array_too_large_scenario() {
    let opts =
        EvalOptions { limits: Limits { max_array_elements: 1, ..Limits::default() }, ..EvalOptions::default() };
    let err = evaluate("[1, 2]", opts).unwrap_err();
    assert!(matches!(err, EvalError::ArrayTooLarge { .. }));
}

#[test]
fn unterminated_paren_is_a_parse_failure_near_end_of_input() {
    let err = evaluate("(", EvalOptions::default()).unwrap_err();
    match err {
        EvalError::Parse(e) => assert!(e.index >= 1),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn host_error_scenario() {
    let boom = host_fn(|_| Err("kaboom".to_string()));
    let env = env_from(vec![("boom", boom)]);
    let opts = EvalOptions { env, ..EvalOptions::default() };
    let err = evaluate("boom()", opts).unwrap_err();
    match err {
        EvalError::HostError { message, .. } => assert!(message.contains("kaboom")),
        other => panic!("expected a host error, got {other:?}"),
    }
}

#[test]
fn std_shadowing_in_the_host_environment_fails_validation() {
    let mut map = HashMap::new();
    map.insert("std".to_string(), Value::Null);
    let err = Environment::new(Value::object(map)).unwrap_err();
    assert!(matches!(err, EvalError::EnvInvalid { .. }));
}

#[test]
fn std_library_is_reachable_and_usable() {
    let v = evaluate("std.clamp(15, 0, 10)", EvalOptions::default()).unwrap();
    assert_eq!(v.to_string(), "10");
}

#[test]
fn ternary_conditional_only_evaluates_taken_branch() {
    let boom = host_fn(|_: &[Value]| -> Result<Value, String> { Err("should not run".to_string()) });
    let env = env_from(vec![("boom", boom)]);
    let opts = EvalOptions { env, ..EvalOptions::default() };
    let v = evaluate("true ? 1 : boom()", opts).unwrap();
    assert_eq!(v.to_string(), "1");
}
