// ABOUTME: Library entry point exposing the parse and evaluate public API

//! An embeddable expression language: a recursive-descent parser producing
//! a span-annotated AST, and a budgeted tree-walking evaluator over a safe,
//! closed value model.
//!
//! ```
//! use exprlang::{evaluate, EvalOptions};
//!
//! let value = evaluate("1 + 2 * 3", EvalOptions::default()).unwrap();
//! assert_eq!(value.to_string(), "7");
//! ```

pub mod ast;
pub mod env;
pub mod error;
pub mod eval;
pub mod json;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod stdlib;
pub mod string_lit;
pub mod value;

pub use ast::Expr;
pub use env::Environment;
pub use error::{EvalError, ParseError};
pub use eval::{Limits, UnknownIdentifierPolicy};
pub use span::Span;
pub use value::Value;

/// Options for [`parse`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// When `true`, `parse` panics with the error's message instead of
    /// returning `Err`. See the crate-level note on `panic_on_error` in
    /// `EvalOptions` for why this exists.
    pub panic_on_error: bool,
}

/// Options for [`evaluate_ast`] and [`evaluate`].
#[derive(Debug, Clone)]
pub struct EvalOptions {
    pub env: Environment,
    pub limits: Limits,
    pub unknown_identifier: UnknownIdentifierPolicy,
    /// When `true`, the top-level wrapper panics with the error's `Display`
    /// message instead of returning `Err`. Rust has no exception/result
    /// duality to map the original `throw_on_error` option onto directly;
    /// this is the most literal rendering of it. Default `false`.
    pub panic_on_error: bool,
    /// When `true` (and only relevant to [`evaluate`]), a parse failure
    /// panics rather than surfacing as `EvalError::Parse`.
    pub panic_on_parse_error: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            env: Environment::empty(),
            limits: Limits::default(),
            unknown_identifier: UnknownIdentifierPolicy::default(),
            panic_on_error: false,
            panic_on_parse_error: false,
        }
    }
}

/// Parses `input` into an [`Expr`]. Requires the entire non-trivia input to
/// be consumed by a single expression.
pub fn parse(input: &str, opts: ParseOptions) -> Result<Expr, ParseError> {
    match parser::parse(input) {
        Ok(expr) => Ok(expr),
        Err(e) if opts.panic_on_error => panic!("{e}"),
        Err(e) => Err(e),
    }
}

/// Evaluates an already-parsed [`Expr`] against `opts.env` under
/// `opts.limits`.
pub fn evaluate_ast(expr: &Expr, opts: EvalOptions) -> Result<Value, EvalError> {
    match eval::evaluate(expr, &opts.env, opts.limits, opts.unknown_identifier) {
        Ok(value) => Ok(value),
        Err(e) if opts.panic_on_error => panic!("{e}"),
        Err(e) => Err(e),
    }
}

/// Parses `input` and evaluates the result in one call.
pub fn evaluate(input: &str, opts: EvalOptions) -> Result<Value, EvalError> {
    let expr = match parser::parse(input) {
        Ok(expr) => expr,
        Err(e) if opts.panic_on_parse_error => panic!("{e}"),
        Err(e) => return Err(EvalError::from(e)),
    };
    evaluate_ast(&expr, opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_parses_and_evaluates_in_one_call() {
        let v = evaluate("1 + 2 * 3", EvalOptions::default()).unwrap();
        assert!(matches!(v, Value::Number(n) if n == 7.0));
    }

    #[test]
    fn parse_failure_surfaces_through_evaluate() {
        let err = evaluate("(", EvalOptions::default()).unwrap_err();
        assert!(matches!(err, EvalError::Parse(_)));
        assert_eq!(err.parse_index(), Some(1));
    }

    #[test]
    fn panic_on_error_panics_instead_of_returning() {
        let result = std::panic::catch_unwind(|| {
            evaluate("(", EvalOptions { panic_on_parse_error: true, ..EvalOptions::default() })
        });
        assert!(result.is_err());
    }
}
