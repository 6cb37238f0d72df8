//! `len` and `includes`, each dispatching between strings and arrays
//! rather than belonging to just one category (spec §4.4).

use crate::stdlib::strings;
use crate::value::Value;
use crate::value::Function;
use std::collections::HashMap;

pub fn register(members: &mut HashMap<String, Value>) {
    members.insert(
        "len".into(),
        Value::Function(Function::free(|args| match args.first() {
            Some(Value::String(s)) => Ok(Value::Number(strings::string_len(s) as f64)),
            Some(Value::Array(items)) => Ok(Value::Number(items.len() as f64)),
            Some(other) => Err(format!("len: expected a string or array, got {}", other.type_name())),
            None => Err("len: missing argument".to_string()),
        })),
    );

    members.insert(
        "includes".into(),
        Value::Function(Function::free(|args| {
            let needle = args.get(1).ok_or_else(|| "includes: missing needle argument".to_string())?;
            match args.first() {
                Some(Value::String(haystack)) => match needle {
                    Value::String(n) => Ok(Value::Boolean(strings::string_includes(haystack, n))),
                    other => Err(format!(
                        "includes: a string haystack requires a string needle, got {}",
                        other.type_name()
                    )),
                },
                Some(Value::Array(items)) => Ok(Value::Boolean(items.iter().any(|v| strict_value_eq(v, needle)))),
                Some(other) => Err(format!("includes: expected a string or array, got {}", other.type_name())),
                None => Err("includes: missing argument".to_string()),
            }
        })),
    );
}

/// Strict membership for `includes` on arrays: primitives compare by value,
/// non-primitives by reference — the same split the evaluator's `==` uses,
/// kept local here rather than imported from `eval` to avoid a dependency
/// from the standard library back into the evaluator.
fn strict_value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(_), Value::Array(_))
        | (Value::Object(_), Value::Object(_))
        | (Value::Function(_), Value::Function(_)) => Value::same_reference(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> HashMap<String, Value> {
        let mut m = HashMap::new();
        register(&mut m);
        m
    }

    fn call(members: &HashMap<String, Value>, name: &str, args: &[Value]) -> Result<Value, String> {
        match members.get(name).unwrap() {
            Value::Function(f) => f.call(None, args),
            _ => unreachable!(),
        }
    }

    #[test]
    fn len_on_string_counts_chars_not_bytes() {
        let m = build();
        let v = call(&m, "len", &[Value::String("héllo".into())]).unwrap();
        assert!(matches!(v, Value::Number(n) if n == 5.0));
    }

    #[test]
    fn len_rejects_objects() {
        let m = build();
        assert!(call(&m, "len", &[Value::object(HashMap::new())]).is_err());
    }

    #[test]
    fn includes_on_array_is_value_membership_for_primitives() {
        let m = build();
        let xs = Value::array(vec![Value::Number(1.0), Value::Number(2.0)]);
        assert!(matches!(call(&m, "includes", &[xs, Value::Number(2.0)]), Ok(Value::Boolean(true))));
    }

    #[test]
    fn includes_on_array_is_reference_membership_for_non_primitives() {
        let m = build();
        let inner = Value::array(vec![]);
        let xs = Value::array(vec![inner.clone()]);
        let other_empty = Value::array(vec![]);
        assert!(matches!(call(&m, "includes", &[xs.clone(), inner]), Ok(Value::Boolean(true))));
        assert!(matches!(call(&m, "includes", &[xs, other_empty]), Ok(Value::Boolean(false))));
    }

    #[test]
    fn includes_on_string_is_substring() {
        let m = build();
        let v = call(&m, "includes", &[Value::String("hello".into()), Value::String("ell".into())]).unwrap();
        assert!(matches!(v, Value::Boolean(true)));
    }
}
