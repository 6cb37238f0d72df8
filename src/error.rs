// ABOUTME: Error types for parsing and evaluation failures

// Error types for parsing and evaluation.

use crate::span::Span;
use thiserror::Error;

/// Anything the grammar rejects. Carries the byte index the parser had
/// reached when it gave up: `0 <= index <= len(input)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub index: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, index: usize) -> Self {
        ParseError { message: message.into(), index }
    }
}

/// Every way evaluation of a valid AST can fail to produce a value.
///
/// Every variant is attached to the nearest responsible span where one is
/// available, so a downstream formatter can underline the offending
/// subexpression without re-parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The supplied environment was not a valid host object: not itself an
    /// `Object`, or it shadows the reserved `std` name.
    #[error("invalid environment: {reason}")]
    EnvInvalid { reason: String },

    #[error("undefined identifier: {name}")]
    UnknownIdentifier { name: String, span: Span },

    #[error("access to '{name}' is forbidden")]
    ForbiddenMember { name: String, span: Span },

    #[error("expected a primitive value, got {actual}")]
    ExpectedPrimitive { actual: &'static str, span: Span },

    #[error("value is not callable")]
    NotCallable { span: Span },

    #[error("host function raised: {message}")]
    HostError { message: String, span: Span },

    /// Reserved for a host callable returning something outside the
    /// admissible `Value` shapes. Unreachable by construction today: a host
    /// `Function` already returns a `Value`, and `Value` is a closed Rust
    /// enum, so there is nothing for a runtime check to reject.
    #[error("host function returned an unsupported value")]
    UnsupportedReturn { span: Span },

    #[error("array literal exceeds the maximum of {limit} elements")]
    ArrayTooLarge { limit: usize, span: Span },

    #[error("evaluation exceeded the step budget of {limit}")]
    BudgetExceeded { limit: usize, steps: usize, span: Span },

    #[error("recursion exceeded the depth limit of {limit}")]
    RecursionLimit { limit: usize, steps: usize, span: Span },

    /// Defensive: the AST used an operator tag the evaluator does not
    /// recognize. Unreachable through `parse`; only reachable if a caller
    /// hand-assembles an `Expr`.
    #[error("unrecognized operator in AST")]
    BadOperator { span: Span },

    /// A parse failure surfaced through the combined `evaluate` entry point.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl EvalError {
    /// The span responsible for this error, if one is attached. `Parse`
    /// errors carry a byte index instead (see `parse_index`).
    pub fn span(&self) -> Option<Span> {
        match self {
            EvalError::EnvInvalid { .. } => None,
            EvalError::UnknownIdentifier { span, .. }
            | EvalError::ForbiddenMember { span, .. }
            | EvalError::ExpectedPrimitive { span, .. }
            | EvalError::NotCallable { span }
            | EvalError::HostError { span, .. }
            | EvalError::UnsupportedReturn { span }
            | EvalError::ArrayTooLarge { span, .. }
            | EvalError::BudgetExceeded { span, .. }
            | EvalError::RecursionLimit { span, .. }
            | EvalError::BadOperator { span } => Some(*span),
            EvalError::Parse(_) => None,
        }
    }

    /// Set only when the underlying cause is a parse failure.
    pub fn parse_index(&self) -> Option<usize> {
        match self {
            EvalError::Parse(p) => Some(p.index),
            _ => None,
        }
    }

    /// The step counter at the moment of failure, when tracked.
    pub fn steps(&self) -> Option<usize> {
        match self {
            EvalError::BudgetExceeded { steps, .. } | EvalError::RecursionLimit { steps, .. } => {
                Some(*steps)
            }
            _ => None,
        }
    }
}
