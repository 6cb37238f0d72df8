//! Numeric members of `std`: `abs`, `floor`, `ceil`, `round`, `trunc`,
//! `sqrt`, `pow`, `min`, `max`, `clamp`.
//!
//! Every function requires its arguments to already be numbers — unlike the
//! evaluator's own operators, `std` functions do not coerce (spec: "validates
//! its arguments and fails with a descriptive message when misapplied").

use crate::value::{Function, Value};
use std::collections::HashMap;

fn number(args: &[Value], index: usize, name: &str) -> Result<f64, String> {
    match args.get(index) {
        Some(Value::Number(n)) => Ok(*n),
        Some(other) => Err(format!("{name}: expected a number at position {index}, got {}", other.type_name())),
        None => Err(format!("{name}: missing argument at position {index}")),
    }
}

fn unary(name: &'static str, f: fn(f64) -> f64) -> Function {
    Function::free(move |args| Ok(Value::Number(f(number(args, 0, name)?))))
}

pub fn register(members: &mut HashMap<String, Value>) {
    members.insert("abs".into(), Value::Function(unary("abs", f64::abs)));
    members.insert("floor".into(), Value::Function(unary("floor", f64::floor)));
    members.insert("ceil".into(), Value::Function(unary("ceil", f64::ceil)));
    members.insert("round".into(), Value::Function(unary("round", f64::round)));
    members.insert("trunc".into(), Value::Function(unary("trunc", f64::trunc)));
    members.insert("sqrt".into(), Value::Function(unary("sqrt", f64::sqrt)));

    members.insert(
        "pow".into(),
        Value::Function(Function::free(|args| {
            let base = number(args, 0, "pow")?;
            let exp = number(args, 1, "pow")?;
            Ok(Value::Number(base.powf(exp)))
        })),
    );
    members.insert(
        "min".into(),
        Value::Function(Function::free(|args| {
            let a = number(args, 0, "min")?;
            let b = number(args, 1, "min")?;
            Ok(Value::Number(a.min(b)))
        })),
    );
    members.insert(
        "max".into(),
        Value::Function(Function::free(|args| {
            let a = number(args, 0, "max")?;
            let b = number(args, 1, "max")?;
            Ok(Value::Number(a.max(b)))
        })),
    );
    members.insert(
        "clamp".into(),
        Value::Function(Function::free(|args| {
            let x = number(args, 0, "clamp")?;
            let lo = number(args, 1, "clamp")?;
            let hi = number(args, 2, "clamp")?;
            Ok(Value::Number(hi.min(lo.max(x))))
        })),
    );
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
    fn clamp_follows_min_hi_max_lo_x() {
        let m = build();
        let v = call(&m, "clamp", &[Value::Number(15.0), Value::Number(0.0), Value::Number(10.0)]).unwrap();
        assert!(matches!(v, Value::Number(n) if n == 10.0));
    }

    #[test]
    fn non_number_argument_is_rejected() {
        let m = build();
        assert!(call(&m, "abs", &[Value::String("x".into())]).is_err());
    }

    #[test]
    fn pow_and_sqrt() {
        let m = build();
        assert!(matches!(call(&m, "pow", &[Value::Number(2.0), Value::Number(10.0)]), Ok(Value::Number(n)) if n == 1024.0));
        assert!(matches!(call(&m, "sqrt", &[Value::Number(9.0)]), Ok(Value::Number(n)) if n == 3.0));
    }
}
