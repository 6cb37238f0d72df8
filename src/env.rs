// ABOUTME: Host environment validation and lookup for evaluation

// The host environment: a single, read-only mapping from identifier names
// to values, validated once before evaluation begins.

use crate::error::EvalError;
use crate::value::Value;
use std::collections::HashMap;
use std::rc::Rc;

/// The reserved name under which the core standard library is exposed.
/// A host environment that also defines this name fails validation rather
/// than silently being shadowed.
pub const STD_NAME: &str = "std";

/// A validated host environment, borrowed read-only for the duration of one
/// evaluation.
///
/// Validation in this implementation reduces to a structural check: `Value`
/// is a closed Rust enum with no computed-accessor concept, so every value
/// reachable through the public API is admissible by construction. What
/// remains to check is (a) the root is an `Object`, not some other shape,
/// and (b) it does not shadow the reserved `std` name.
#[derive(Debug, Clone)]
pub struct Environment {
    members: Rc<HashMap<String, Value>>,
}

impl Environment {
    /// Validates and wraps a host-supplied value as an environment.
    pub fn new(value: Value) -> Result<Self, EvalError> {
        let members = match value {
            Value::Object(map) => map,
            other => {
                return Err(EvalError::EnvInvalid {
                    reason: format!("environment must be an object, got {}", other.type_name()),
                });
            }
        };

        if members.contains_key(STD_NAME) {
            return Err(EvalError::EnvInvalid {
                reason: format!("environment must not define the reserved name '{STD_NAME}'"),
            });
        }

        Ok(Environment { members })
    }

    /// An empty environment, useful for expressions that reference no
    /// identifiers beyond `std`.
    pub fn empty() -> Self {
        Environment { members: Rc::new(HashMap::new()) }
    }

    /// Looks up `name` among the host-supplied own members. Never resolves
    /// `std`; the evaluator handles that name itself before consulting the
    /// environment.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }
}
