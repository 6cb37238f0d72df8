//! String members of `std`: `lower`, `upper`, `trim`, `startsWith`,
//! `endsWith`, `slice`, plus the string half of `len` and `includes`.

use crate::value::{Function, Value};
use std::collections::HashMap;

fn string<'a>(args: &'a [Value], index: usize, name: &str) -> Result<&'a str, String> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(format!("{name}: expected a string at position {index}, got {}", other.type_name())),
        None => Err(format!("{name}: missing argument at position {index}")),
    }
}

pub fn register(members: &mut HashMap<String, Value>) {
    members.insert(
        "lower".into(),
        Value::Function(Function::free(|args| Ok(Value::String(string(args, 0, "lower")?.to_lowercase())))),
    );
    members.insert(
        "upper".into(),
        Value::Function(Function::free(|args| Ok(Value::String(string(args, 0, "upper")?.to_uppercase())))),
    );
    members.insert(
        "trim".into(),
        Value::Function(Function::free(|args| Ok(Value::String(string(args, 0, "trim")?.trim().to_string())))),
    );
    members.insert(
        "startsWith".into(),
        Value::Function(Function::free(|args| {
            let s = string(args, 0, "startsWith")?;
            let prefix = string(args, 1, "startsWith")?;
            Ok(Value::Boolean(s.starts_with(prefix)))
        })),
    );
    members.insert(
        "endsWith".into(),
        Value::Function(Function::free(|args| {
            let s = string(args, 0, "endsWith")?;
            let suffix = string(args, 1, "endsWith")?;
            Ok(Value::Boolean(s.ends_with(suffix)))
        })),
    );
    members.insert(
        "slice".into(),
        Value::Function(Function::free(|args| {
            let s = string(args, 0, "slice")?;
            let chars: Vec<char> = s.chars().collect();
            let len = chars.len() as i64;
            let start = clamp_index(args.get(1), 0, len)?;
            let end = match args.get(2) {
                Some(_) => clamp_index(args.get(2), len, len)?,
                None => len,
            };
            if start >= end {
                return Ok(Value::String(String::new()));
            }
            Ok(Value::String(chars[start as usize..end as usize].iter().collect()))
        })),
    );
}

fn clamp_index(value: Option<&Value>, default: i64, len: i64) -> Result<i64, String> {
    let raw = match value {
        None => default,
        Some(Value::Number(n)) => *n as i64,
        Some(other) => return Err(format!("slice: expected a number index, got {}", other.type_name())),
    };
    Ok(raw.clamp(0, len))
}

/// Shared with `collections::len`/`includes`, since both dispatch on
/// whether the subject is a string or an array.
pub fn string_len(s: &str) -> usize {
    s.chars().count()
}

pub fn string_includes(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}
