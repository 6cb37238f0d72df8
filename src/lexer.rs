// ABOUTME: Byte-position cursor and lexical recognizers for the parser
//
// Lexical primitives: a byte-position cursor over the source text, trivia
// skipping, and the small fixed-grammar recognizers (numbers, identifiers)
// the parser's primaries are built from.
//
// Trivia and number recognition are expressed as `nom` combinators over the
// cursor's remaining input, the same style the reference Lisp reader in this
// codebase's lineage uses for its own literal parsers; the consumed byte
// count is recovered from the difference between the input slice handed to
// `nom` and the slice it hands back, which is what lets a cursor track byte
// position without pulling in a located-span wrapper type.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::{char, digit1};
use nom::combinator::{opt, recognize, value};
use nom::multi::many0;
use nom::sequence::pair;
use nom::IResult;

/// A position in the source, tracked as a byte offset. All cursor
/// operations work in bytes (never code-point counts), matching the spans
/// the rest of the crate carries.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a str,
    pub pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// The full original input, for callers that need to slice an
    /// already-consumed range (e.g. a string literal's raw body).
    pub fn source(&self) -> &'a str {
        self.input
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn peek_at(&self, offset_chars: usize) -> Option<char> {
        self.rest().chars().nth(offset_chars)
    }

    /// Advances past one character, returning it.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Consumes `s` if the cursor is positioned at it, returning whether it did.
    pub fn eat_str(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    pub fn eat_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Runs a `nom` parser against the remaining input and, on success,
    /// advances the cursor by however many bytes it consumed.
    fn run<T>(&mut self, parser: impl Fn(&'a str) -> IResult<&'a str, T>) -> Option<T> {
        let (remaining, value) = parser(self.rest()).ok()?;
        self.pos += self.rest().len() - remaining.len();
        Some(value)
    }
}

fn is_ascii_ws(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

fn line_comment(input: &str) -> IResult<&str, ()> {
    value((), pair(tag("//"), take_while(|c| c != '\n' && c != '\r')))(input)
}

fn block_comment(input: &str) -> IResult<&str, ()> {
    let (input, _) = tag("/*")(input)?;
    // Non-nesting: stop at the first `*/`.
    let mut rest = input;
    loop {
        if rest.is_empty() {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Eof,
            )));
        }
        if let Some(stripped) = rest.strip_prefix("*/") {
            return Ok((stripped, ()));
        }
        let mut chars = rest.chars();
        chars.next();
        rest = chars.as_str();
    }
}

fn one_trivia(input: &str) -> IResult<&str, ()> {
    alt((value((), take_while1(is_ascii_ws)), line_comment, block_comment))(input)
}

fn trivia(input: &str) -> IResult<&str, ()> {
    value((), many0(one_trivia))(input)
}

/// Identifier/keyword start and continuation classes (spec §4.2).
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

pub fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

fn identifier_text(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        nom::combinator::verify(nom::character::complete::anychar, |c| is_ident_start(*c)),
        take_while(is_ident_continue),
    ))(input)
}

/// `digit+ ('.' digit*)? | '.' digit+` — no sign, no exponent (spec §4.2:
/// "a number literal is an optional integer part plus optional fractional
/// part"). Signs are handled by the unary `+`/`-` operators, not here.
fn number_text(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(digit1, opt(pair(char('.'), opt(digit1))))),
        recognize(pair(char('.'), digit1)),
    ))(input)
}

impl<'a> Cursor<'a> {
    /// Skips whitespace, `//` line comments, and non-nesting `/* */` block
    /// comments. Idempotent; safe to call between every token.
    pub fn skip_trivia(&mut self) {
        self.run(trivia);
    }

    /// Recognizes an identifier or reserved word at the cursor, without
    /// checking whether it's reserved — that's the parser's job, since only
    /// it knows whether a keyword is being asked for in a primary position.
    pub fn eat_identifier(&mut self) -> Option<&'a str> {
        self.run(identifier_text)
    }

    /// Matches a fixed keyword only when it is not immediately followed by
    /// an identifier-continuation character (spec §4.2: "keywords match
    /// only when followed by a non-identifier-continue character").
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        if !self.starts_with(keyword) {
            return false;
        }
        let after = self.rest()[keyword.len()..].chars().next();
        if after.is_some_and(is_ident_continue) {
            return false;
        }
        self.pos += keyword.len();
        true
    }

    pub fn eat_number(&mut self) -> Option<f64> {
        let start = self.pos;
        let text = self.run(number_text)?;
        text.parse::<f64>().ok().or_else(|| {
            self.pos = start;
            None
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_whitespace_and_both_comment_styles() {
        let mut c = Cursor::new("  // a comment\n/* block */   42");
        c.skip_trivia();
        assert_eq!(c.rest(), "42");
    }

    #[test]
    fn block_comments_do_not_nest() {
        let mut c = Cursor::new("/* outer /* inner */ still-in-source */");
        c.skip_trivia();
        assert_eq!(c.rest(), "still-in-source */");
    }

    #[test]
    fn identifier_allows_underscore_and_digits_after_first_char() {
        let mut c = Cursor::new("_foo123 + 1");
        assert_eq!(c.eat_identifier(), Some("_foo123"));
        assert_eq!(c.rest(), " + 1");
    }

    #[test]
    fn keyword_requires_word_boundary() {
        let mut c = Cursor::new("nullable");
        assert!(!c.eat_keyword("null"));
        let mut c2 = Cursor::new("null)");
        assert!(c2.eat_keyword("null"));
        assert_eq!(c2.rest(), ")");
    }

    #[test]
    fn number_forms() {
        for (src, expected) in [("42", 42.0), ("42.", 42.0), (".5", 0.5), ("3.14", 3.14)] {
            let mut c = Cursor::new(src);
            assert_eq!(c.eat_number(), Some(expected), "input {src}");
        }
    }

    #[test]
    fn bare_dot_is_not_a_number() {
        let mut c = Cursor::new(".");
        assert_eq!(c.eat_number(), None);
    }
}
