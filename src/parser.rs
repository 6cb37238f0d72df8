// ABOUTME: Precedence-climbing recursive descent parser for the expression grammar

//! The expression grammar: an eleven-level precedence-climbing recursive
//! descent parser over [`crate::lexer::Cursor`], producing span-annotated
//! [`Expr`] nodes.
//!
//! Unlike the s-expression reader this module's ancestor parses, there is no
//! natural `nom`-combinator shape for infix precedence climbing with exact
//! byte-offset error reporting, so the grammar itself is a hand-rolled
//! recursive-descent `Parser` over the cursor from `lexer.rs`; `nom` stays
//! confined to the primitive recognizers the cursor exposes.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ParseError;
use crate::lexer::Cursor;
use crate::span::Span;
use crate::string_lit::decode_string_body;

const RESERVED_WORDS: [&str; 3] = ["true", "false", "null"];

/// Parses a complete expression, requiring the entire non-trivia input to be
/// consumed.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser { cursor: Cursor::new(input) };
    parser.cursor.skip_trivia();
    let expr = parser.parse_conditional()?;
    parser.cursor.skip_trivia();
    if !parser.cursor.is_eof() {
        return Err(ParseError::new("unexpected trailing input", parser.cursor.pos));
    }
    Ok(expr)
}

struct Parser<'a> {
    cursor: Cursor<'a>,
}

type PResult<T> = Result<T, ParseError>;

impl<'a> Parser<'a> {
    fn fail(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.cursor.pos)
    }

    fn fail_at(&self, message: impl Into<String>, index: usize) -> ParseError {
        ParseError::new(message, index)
    }

    fn expect_char(&mut self, c: char, what: &str) -> PResult<()> {
        self.cursor.skip_trivia();
        if self.cursor.eat_char(c) {
            Ok(())
        } else {
            Err(self.fail(format!("expected {what}")))
        }
    }

    // 1. Conditional (ternary), right-associative.
    fn parse_conditional(&mut self) -> PResult<Expr> {
        let test = self.parse_pipeline()?;
        self.cursor.skip_trivia();
        if self.cursor.eat_char('?') {
            self.cursor.skip_trivia();
            let consequent = self.parse_conditional()?;
            self.expect_char(':', "':' in conditional expression")?;
            self.cursor.skip_trivia();
            let alternate = self.parse_conditional()?;
            let span = Span::merge(test.span(), alternate.span());
            Ok(Expr::Conditional {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
                span,
            })
        } else {
            Ok(test)
        }
    }

    // 2. Pipeline `|>`, left-associative; desugars into a call.
    fn parse_pipeline(&mut self) -> PResult<Expr> {
        let mut left = self.parse_or()?;
        loop {
            self.cursor.skip_trivia();
            if !self.cursor.starts_with("|>") {
                break;
            }
            self.cursor.eat_str("|>");
            self.cursor.skip_trivia();
            let rhs = self.parse_postfix()?;
            left = desugar_pipeline(left, rhs);
        }
        Ok(left)
    }

    // 3. Logical OR.
    fn parse_or(&mut self) -> PResult<Expr> {
        self.parse_left_binary(Self::parse_and, &[("||", BinaryOp::Or)])
    }

    // 4. Logical AND.
    fn parse_and(&mut self) -> PResult<Expr> {
        self.parse_left_binary(Self::parse_equality, &[("&&", BinaryOp::And)])
    }

    // 5. Equality.
    fn parse_equality(&mut self) -> PResult<Expr> {
        self.parse_left_binary(
            Self::parse_comparison,
            &[("==", BinaryOp::Eq), ("!=", BinaryOp::NotEq)],
        )
    }

    // 6. Comparison. Longer tokens (`<=`, `>=`) must be tried before their prefixes.
    fn parse_comparison(&mut self) -> PResult<Expr> {
        self.parse_left_binary(
            Self::parse_additive,
            &[
                ("<=", BinaryOp::LtEq),
                (">=", BinaryOp::GtEq),
                ("<", BinaryOp::Lt),
                (">", BinaryOp::Gt),
            ],
        )
    }

    // 7. Additive.
    fn parse_additive(&mut self) -> PResult<Expr> {
        self.parse_left_binary(
            Self::parse_multiplicative,
            &[("+", BinaryOp::Add), ("-", BinaryOp::Sub)],
        )
    }

    // 8. Multiplicative.
    fn parse_multiplicative(&mut self) -> PResult<Expr> {
        self.parse_left_binary(
            Self::parse_unary,
            &[("*", BinaryOp::Mul), ("/", BinaryOp::Div), ("%", BinaryOp::Rem)],
        )
    }

    /// Shared shape for every left-associative binary level: parse one
    /// operand at the next tighter level, then repeatedly look for one of
    /// `ops` (tried in the order given, so longer tokens must be listed
    /// before their prefixes) and fold in another operand.
    fn parse_left_binary(
        &mut self,
        mut next: impl FnMut(&mut Self) -> PResult<Expr>,
        ops: &[(&str, BinaryOp)],
    ) -> PResult<Expr> {
        let mut left = next(self)?;
        loop {
            self.cursor.skip_trivia();
            let matched = ops.iter().find(|(token, _)| self.cursor.starts_with(token));
            let Some((token, op)) = matched else { break };
            self.cursor.eat_str(token);
            self.cursor.skip_trivia();
            let right = next(self)?;
            let span = Span::merge(left.span(), right.span());
            left = Expr::Binary { op: *op, left: Box::new(left), right: Box::new(right), span };
        }
        Ok(left)
    }

    // 9. Unary prefix, right-associative.
    fn parse_unary(&mut self) -> PResult<Expr> {
        self.cursor.skip_trivia();
        let start = self.cursor.pos;
        let op = if self.cursor.eat_char('!') {
            Some(UnaryOp::Not)
        } else if self.cursor.eat_char('+') {
            Some(UnaryOp::Plus)
        } else if self.cursor.eat_char('-') {
            Some(UnaryOp::Minus)
        } else {
            None
        };
        match op {
            Some(op) => {
                self.cursor.skip_trivia();
                let expr = self.parse_unary()?;
                let span = Span::new(start, expr.span().end);
                Ok(Expr::Unary { op, expr: Box::new(expr), span })
            }
            None => self.parse_postfix(),
        }
    }

    // 10. Postfix chain: `.ident` and `(args)` in source order.
    fn parse_postfix(&mut self) -> PResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            self.cursor.skip_trivia();
            if self.cursor.eat_char('.') {
                self.cursor.skip_trivia();
                let prop_start = self.cursor.pos;
                let name = self
                    .cursor
                    .eat_identifier()
                    .ok_or_else(|| self.fail_at("expected a property name after '.'", prop_start))?;
                let span = Span::new(expr.span().start, self.cursor.pos);
                expr = Expr::Member { object: Box::new(expr), property: name.to_string(), span };
            } else if self.cursor.starts_with("(") {
                self.cursor.eat_char('(');
                let args = self.parse_args()?;
                self.expect_char(')', "')' to close call arguments")?;
                let span = Span::new(expr.span().start, self.cursor.pos);
                expr = Expr::Call { callee: Box::new(expr), args, span };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    /// Comma-separated argument/element list with no trailing comma allowed.
    fn parse_args(&mut self) -> PResult<Vec<Expr>> {
        self.cursor.skip_trivia();
        let mut args = Vec::new();
        if self.cursor.starts_with(")") || self.cursor.starts_with("]") {
            return Ok(args);
        }
        loop {
            args.push(self.parse_conditional()?);
            self.cursor.skip_trivia();
            if self.cursor.eat_char(',') {
                self.cursor.skip_trivia();
                if self.cursor.starts_with(")") || self.cursor.starts_with("]") {
                    return Err(self.fail("trailing comma is not permitted"));
                }
            } else {
                break;
            }
        }
        Ok(args)
    }

    // 11. Primary.
    fn parse_primary(&mut self) -> PResult<Expr> {
        self.cursor.skip_trivia();
        let start = self.cursor.pos;

        if self.cursor.eat_keyword("true") {
            return Ok(Expr::Boolean { value: true, span: Span::new(start, self.cursor.pos) });
        }
        if self.cursor.eat_keyword("false") {
            return Ok(Expr::Boolean { value: false, span: Span::new(start, self.cursor.pos) });
        }
        if self.cursor.eat_keyword("null") {
            return Ok(Expr::Null { span: Span::new(start, self.cursor.pos) });
        }
        if self.cursor.starts_with("[") {
            return self.parse_array();
        }
        if self.cursor.starts_with("(") {
            self.cursor.eat_char('(');
            self.cursor.skip_trivia();
            let expr = self.parse_conditional()?;
            self.expect_char(')', "')' to close parenthesized expression")?;
            // A parenthesized expression's span covers the parens
            // themselves, matching "the source substring from the first
            // consumed character through the first unconsumed character".
            return Ok(with_span(expr, Span::new(start, self.cursor.pos)));
        }
        if let Some(c) = self.cursor.peek() {
            if c == '"' || c == '\'' {
                return self.parse_string(c);
            }
        }
        if let Some(value) = self.cursor.eat_number() {
            return Ok(Expr::Number { value, span: Span::new(start, self.cursor.pos) });
        }
        if let Some(name) = self.cursor.eat_identifier() {
            if RESERVED_WORDS.contains(&name) {
                return Err(self.fail_at(format!("'{name}' is a reserved word"), start));
            }
            return Ok(Expr::Identifier { name: name.to_string(), span: Span::new(start, self.cursor.pos) });
        }

        Err(self.fail("expected an expression"))
    }

    fn parse_array(&mut self) -> PResult<Expr> {
        let start = self.cursor.pos;
        self.cursor.eat_char('[');
        let elements = self.parse_args()?;
        self.expect_char(']', "']' to close array literal")?;
        Ok(Expr::Array { elements, span: Span::new(start, self.cursor.pos) })
    }

    fn parse_string(&mut self, quote: char) -> PResult<Expr> {
        let start = self.cursor.pos;
        self.cursor.eat_char(quote);
        let body_start = self.cursor.pos;
        self.scan_string_body(quote)?;
        let body = &self.cursor.source()[body_start..self.cursor.pos];
        let value = decode_string_body(body, quote, body_start)
            .map_err(|(message, index)| self.fail_at(message, index))?;
        if !self.cursor.eat_char(quote) {
            return Err(self.fail_at("unterminated string literal", self.cursor.pos));
        }
        Ok(Expr::String { value, span: Span::new(start, self.cursor.pos) })
    }

    /// Advances the cursor past the raw literal body up to (but not
    /// including) the matching close quote, respecting backslash escapes
    /// and rejecting bare line terminators. Does not interpret escapes
    /// itself — `decode_string_body` does that from the resulting slice.
    fn scan_string_body(&mut self, quote: char) -> PResult<()> {
        loop {
            match self.cursor.peek() {
                None => return Err(self.fail_at("unterminated string literal", self.cursor.pos)),
                Some('\\') => {
                    self.cursor.bump();
                    if self.cursor.bump().is_none() {
                        return Err(self.fail_at("unterminated string literal", self.cursor.pos));
                    }
                }
                Some(c) if c == quote => return Ok(()),
                Some('\n') | Some('\r') | Some('\u{2028}') | Some('\u{2029}') => {
                    return Err(self.fail("line terminator is not permitted inside a string literal"));
                }
                Some(_) => {
                    self.cursor.bump();
                }
            }
        }
    }
}

fn with_span(expr: Expr, span: Span) -> Expr {
    match expr {
        Expr::Number { value, .. } => Expr::Number { value, span },
        Expr::String { value, .. } => Expr::String { value, span },
        Expr::Boolean { value, .. } => Expr::Boolean { value, span },
        Expr::Null { .. } => Expr::Null { span },
        Expr::Identifier { name, .. } => Expr::Identifier { name, span },
        Expr::Array { elements, .. } => Expr::Array { elements, span },
        Expr::Unary { op, expr, .. } => Expr::Unary { op, expr, span },
        Expr::Binary { op, left, right, .. } => Expr::Binary { op, left, right, span },
        Expr::Member { object, property, .. } => Expr::Member { object, property, span },
        Expr::Call { callee, args, .. } => Expr::Call { callee, args, span },
        Expr::Conditional { test, consequent, alternate, .. } => {
            Expr::Conditional { test, consequent, alternate, span }
        }
    }
}

/// `a |> f` → `f(a)`; `a |> f(x, y)` → `f(a, x, y)`.
fn desugar_pipeline(left: Expr, rhs: Expr) -> Expr {
    let span = Span::merge(left.span(), rhs.span());
    match rhs {
        Expr::Call { callee, mut args, .. } => {
            args.insert(0, left);
            Expr::Call { callee, args, span }
        }
        other => Expr::Call { callee: Box::new(other), args: vec![left], span },
    }
}
