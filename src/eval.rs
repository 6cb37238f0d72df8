// ABOUTME: Tree-walking evaluator for expression ASTs

//! The tree-walking evaluator: per-node dispatch over [`Expr`] under a
//! budgeted [`Context`], producing admissible [`Value`]s or an [`EvalError`]
//! attributed to the responsible span.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::env::{Environment, STD_NAME};
use crate::error::EvalError;
use crate::span::Span;
use crate::stdlib;
use crate::value::{format_number, Value};

const FORBIDDEN_MEMBERS: [&str; 3] = ["__proto__", "prototype", "constructor"];

/// What happens when an `Identifier` resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownIdentifierPolicy {
    #[default]
    Error,
    Undefined,
}

#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_steps: usize,
    pub max_depth: usize,
    pub max_array_elements: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits { max_steps: 10_000, max_depth: 256, max_array_elements: 1_000 }
    }
}

/// Per-evaluation mutable state: the step counter, current recursion depth,
/// the budgets, and the identifier policy. Threaded through every recursive
/// visit; never shared across separate top-level evaluations.
struct Context<'a> {
    env: &'a Environment,
    std: Value,
    limits: Limits,
    unknown_identifier: UnknownIdentifierPolicy,
    steps: usize,
    depth: usize,
}

impl<'a> Context<'a> {
    fn enter_node(&mut self, span: Span) -> Result<(), EvalError> {
        self.steps += 1;
        if self.steps > self.limits.max_steps {
            return Err(EvalError::BudgetExceeded { limit: self.limits.max_steps, steps: self.steps, span });
        }
        Ok(())
    }

    fn enter_frame(&mut self, span: Span) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(EvalError::RecursionLimit { limit: self.limits.max_depth, steps: self.steps, span });
        }
        Ok(())
    }

    fn exit_frame(&mut self) {
        self.depth -= 1;
    }
}

/// Evaluates `expr` against `env` under `limits` and `unknown_identifier`.
pub fn evaluate(
    expr: &Expr,
    env: &Environment,
    limits: Limits,
    unknown_identifier: UnknownIdentifierPolicy,
) -> Result<Value, EvalError> {
    let mut ctx = Context { env, std: stdlib::build(), limits, unknown_identifier, steps: 0, depth: 0 };
    eval_node(expr, &mut ctx)
}

fn eval_node(expr: &Expr, ctx: &mut Context) -> Result<Value, EvalError> {
    let span = expr.span();
    ctx.enter_node(span)?;
    ctx.enter_frame(span)?;
    let result = eval_node_inner(expr, ctx);
    ctx.exit_frame();
    result
}

fn eval_node_inner(expr: &Expr, ctx: &mut Context) -> Result<Value, EvalError> {
    match expr {
        Expr::Number { value, .. } => Ok(Value::Number(*value)),
        Expr::String { value, .. } => Ok(Value::String(value.clone())),
        Expr::Boolean { value, .. } => Ok(Value::Boolean(*value)),
        Expr::Null { .. } => Ok(Value::Null),

        Expr::Identifier { name, span } => eval_identifier(name, *span, ctx),

        Expr::Array { elements, span } => eval_array(elements, *span, ctx),

        Expr::Unary { op, expr, .. } => eval_unary(*op, expr, ctx),

        Expr::Binary { op, left, right, span } => {
            if op.is_short_circuit() {
                eval_short_circuit(*op, left, right, ctx)
            } else {
                eval_binary(*op, left, right, *span, ctx)
            }
        }

        Expr::Conditional { test, consequent, alternate, .. } => {
            if eval_node(test, ctx)?.is_truthy() {
                eval_node(consequent, ctx)
            } else {
                eval_node(alternate, ctx)
            }
        }

        Expr::Member { object, property, span } => {
            let object_value = eval_node(object, ctx)?;
            resolve_member(&object_value, property, *span)
        }

        Expr::Call { callee, args, span } => eval_call(callee, args, *span, ctx),
    }
}

fn eval_identifier(name: &str, span: Span, ctx: &mut Context) -> Result<Value, EvalError> {
    if name == STD_NAME {
        return Ok(ctx.std.clone());
    }
    match ctx.env.get(name) {
        Some(value) => Ok(value.clone()),
        None => match ctx.unknown_identifier {
            UnknownIdentifierPolicy::Error => {
                Err(EvalError::UnknownIdentifier { name: name.to_string(), span })
            }
            UnknownIdentifierPolicy::Undefined => Ok(Value::Undefined),
        },
    }
}

fn eval_array(elements: &[Expr], span: Span, ctx: &mut Context) -> Result<Value, EvalError> {
    if elements.len() > ctx.limits.max_array_elements {
        return Err(EvalError::ArrayTooLarge { limit: ctx.limits.max_array_elements, span });
    }
    let mut values = Vec::with_capacity(elements.len());
    for element in elements {
        values.push(eval_node(element, ctx)?);
    }
    Ok(Value::array(values))
}

fn eval_unary(op: UnaryOp, operand: &Expr, ctx: &mut Context) -> Result<Value, EvalError> {
    let value = eval_node(operand, ctx)?;
    let span = operand.span();
    match op {
        UnaryOp::Not => Ok(Value::Boolean(!value.is_truthy())),
        UnaryOp::Plus => Ok(Value::Number(to_number(&value, span)?)),
        UnaryOp::Minus => Ok(Value::Number(-to_number(&value, span)?)),
    }
}

fn eval_short_circuit(op: BinaryOp, left: &Expr, right: &Expr, ctx: &mut Context) -> Result<Value, EvalError> {
    let left_value = eval_node(left, ctx)?;
    match op {
        BinaryOp::And => {
            if !left_value.is_truthy() {
                Ok(left_value)
            } else {
                eval_node(right, ctx)
            }
        }
        BinaryOp::Or => {
            if left_value.is_truthy() {
                Ok(left_value)
            } else {
                eval_node(right, ctx)
            }
        }
        _ => unreachable!("only And/Or are short-circuiting"),
    }
}

fn eval_binary(op: BinaryOp, left: &Expr, right: &Expr, span: Span, ctx: &mut Context) -> Result<Value, EvalError> {
    let left_value = eval_node(left, ctx)?;
    let right_value = eval_node(right, ctx)?;

    match op {
        BinaryOp::Add => {
            if matches!(left_value, Value::String(_)) || matches!(right_value, Value::String(_)) {
                let l = to_string_coerce(&left_value, span)?;
                let r = to_string_coerce(&right_value, span)?;
                Ok(Value::String(l + &r))
            } else {
                let l = to_number(&left_value, span)?;
                let r = to_number(&right_value, span)?;
                Ok(Value::Number(l + r))
            }
        }
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
            let l = to_number(&left_value, span)?;
            let r = to_number(&right_value, span)?;
            Ok(Value::Number(match op {
                BinaryOp::Sub => l - r,
                BinaryOp::Mul => l * r,
                BinaryOp::Div => l / r,
                BinaryOp::Rem => l % r,
                _ => unreachable!(),
            }))
        }
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let l = to_number(&left_value, span)?;
            let r = to_number(&right_value, span)?;
            Ok(Value::Boolean(match op {
                BinaryOp::Lt => l < r,
                BinaryOp::LtEq => l <= r,
                BinaryOp::Gt => l > r,
                BinaryOp::GtEq => l >= r,
                _ => unreachable!(),
            }))
        }
        BinaryOp::Eq => Ok(Value::Boolean(loose_eq(&left_value, &right_value))),
        BinaryOp::NotEq => Ok(Value::Boolean(!loose_eq(&left_value, &right_value))),
        BinaryOp::And | BinaryOp::Or => unreachable!("handled by eval_short_circuit"),
    }
}

fn resolve_member(object: &Value, property: &str, span: Span) -> Result<Value, EvalError> {
    if FORBIDDEN_MEMBERS.contains(&property) {
        return Err(EvalError::ForbiddenMember { name: property.to_string(), span });
    }
    match object {
        Value::Array(items) => {
            if property == "length" {
                Ok(Value::Number(items.len() as f64))
            } else {
                Ok(Value::Undefined)
            }
        }
        Value::Object(members) => Ok(members.get(property).cloned().unwrap_or(Value::Undefined)),
        _ => Ok(Value::Undefined),
    }
}

fn eval_call(callee: &Expr, args: &[Expr], span: Span, ctx: &mut Context) -> Result<Value, EvalError> {
    let (function, receiver) = match callee {
        Expr::Member { object, property, span: member_span } => {
            let object_value = eval_node(object, ctx)?;
            let member = resolve_member(&object_value, property, *member_span)?;
            (member, Some(object_value))
        }
        other => (eval_node(other, ctx)?, None),
    };

    let Value::Function(f) = &function else {
        return Err(EvalError::NotCallable { span });
    };

    let mut arg_values = Vec::with_capacity(args.len());
    for arg in args {
        arg_values.push(eval_node(arg, ctx)?);
    }

    f.call(receiver.as_ref(), &arg_values).map_err(|message| EvalError::HostError { message, span })
}

/// ToNumber, attributing `ExpectedPrimitive` to `span` on failure.
pub fn to_number(value: &Value, span: Span) -> Result<f64, EvalError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Boolean(true) => Ok(1.0),
        Value::Boolean(false) => Ok(0.0),
        Value::Null => Ok(0.0),
        Value::Undefined => Ok(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(0.0)
            } else {
                Ok(trimmed.parse::<f64>().unwrap_or(f64::NAN))
            }
        }
        other => Err(EvalError::ExpectedPrimitive { actual: other.type_name(), span }),
    }
}

/// ToString, attributing `ExpectedPrimitive` to `span` on failure.
fn to_string_coerce(value: &Value, span: Span) -> Result<String, EvalError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(format_number(*n)),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Undefined => Ok("undefined".to_string()),
        other => Err(EvalError::ExpectedPrimitive { actual: other.type_name(), span }),
    }
}

/// Safe loose equality (spec §4.5): primitive/primitive follows conventional
/// loose equality; any pair with a non-primitive side is reference equality
/// only, never invoking a host method.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    if !a.is_primitive() || !b.is_primitive() {
        return Value::same_reference(a, b);
    }
    match (a, b) {
        (Value::Null | Value::Undefined, Value::Null | Value::Undefined) => true,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Null | Value::Undefined, _) | (_, Value::Null | Value::Undefined) => false,
        // Mixed primitive pairs: coerce both through ToNumber. A coercion
        // failure can't happen here — every remaining primitive has a total
        // ToNumber mapping — so the dummy span is never observed.
        _ => {
            let dummy = Span::new(0, 0);
            let x = to_number(a, dummy);
            let y = to_number(b, dummy);
            matches!((x, y), (Ok(x), Ok(y)) if x == y)
        }
    }
}
