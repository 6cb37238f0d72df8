//! The `std` standard library: a single frozen `Value::Object` built once
//! and bound under the reserved identifier `std` (spec §4.4).
//!
//! Organized the way the teacher organizes builtins — one submodule per
//! category, each exposing a `register(&mut HashMap<String, Value>)`
//! function — except composed into one value instead of bound directly into
//! a scope, since `std` here is a value an `Identifier` resolves to, not an
//! environment of its own.

use crate::value::Value;
use std::collections::HashMap;

pub mod collections;
pub mod numeric;
pub mod strings;

/// Builds the `std` object. Called once per evaluation context; cheap
/// enough not to bother caching (a handful of `Rc<dyn Fn>` allocations).
pub fn build() -> Value {
    let mut members = HashMap::new();
    numeric::register(&mut members);
    strings::register(&mut members);
    collections::register(&mut members);
    Value::object(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_required_member_is_present() {
        let std_obj = build();
        let Value::Object(members) = std_obj else { panic!("std must be an object") };
        for name in [
            "len", "abs", "floor", "ceil", "round", "trunc", "sqrt", "pow", "min", "max", "clamp", "lower",
            "upper", "trim", "startsWith", "endsWith", "includes", "slice",
        ] {
            assert!(members.contains_key(name), "missing std.{name}");
        }
    }
}
