// ABOUTME: String literal escape sequence decoding

// String literal body decoding: escape sequences, following the same
// repertoire and error placement ECMAScript string literals use (spec §4.1).
//
// This is hand-rolled rather than expressed as `nom` combinators: the exact
// byte index of a malformed escape has to survive into the error, and that
// is easiest to track with an explicit index into the raw `&str` rather than
// composing parser combinators that would have to thread it through.

/// Decodes the body of a string literal (the text strictly between the
/// opening and closing quote, still containing backslash escapes) into its
/// runtime string value.
///
/// `body_start` is the absolute byte offset of the first byte of `body`
/// within the original source, used to report absolute error indices.
pub fn decode_string_body(body: &str, quote: char, body_start: usize) -> Result<String, (String, usize)> {
    let bytes = body.as_bytes();
    let mut out = String::with_capacity(body.len());
    let mut i = 0;

    while i < bytes.len() {
        let c = next_char(body, i);
        if c == '\\' {
            let backslash_at = i;
            i += 1;
            if i >= bytes.len() {
                return Err(("string literal ends with a trailing backslash".into(), body_start + backslash_at));
            }
            let esc = next_char(body, i);
            match esc {
                '\n' => i += 1,
                '\r' => {
                    i += 1;
                    if body.as_bytes().get(i) == Some(&b'\n') {
                        i += 1;
                    }
                }
                'n' => {
                    out.push('\n');
                    i += 1;
                }
                't' => {
                    out.push('\t');
                    i += 1;
                }
                'r' => {
                    out.push('\r');
                    i += 1;
                }
                'b' => {
                    out.push('\u{0008}');
                    i += 1;
                }
                'f' => {
                    out.push('\u{000C}');
                    i += 1;
                }
                'v' => {
                    out.push('\u{000B}');
                    i += 1;
                }
                '0' if !bytes.get(i + 1).is_some_and(u8::is_ascii_digit) => {
                    out.push('\0');
                    i += 1;
                }
                '\'' | '"' | '\\' => {
                    out.push(esc);
                    i += 1;
                }
                'x' => {
                    let (value, consumed) = hex_escape(body, i + 1, 2, backslash_at)?;
                    out.push(char_from_u32(value, backslash_at)?);
                    i += 1 + consumed;
                }
                'u' => {
                    let (value, consumed) = unicode_escape(body, i + 1, backslash_at)?;
                    out.push(char_from_u32(value, backslash_at)?);
                    i += 1 + consumed;
                }
                d if d.is_ascii_digit() => {
                    return Err((
                        format!("legacy octal escape '\\{d}' is not permitted"),
                        body_start + backslash_at,
                    ));
                }
                other => {
                    // Identity escape: any other character stands for itself.
                    out.push(other);
                    i += other.len_utf8();
                }
            }
        } else if c == quote {
            return Err(("unescaped quote inside string literal".into(), body_start + i));
        } else {
            out.push(c);
            i += c.len_utf8();
        }
    }

    Ok(out)
}

fn next_char(s: &str, byte_index: usize) -> char {
    s[byte_index..].chars().next().expect("byte_index within bounds")
}

/// Reads exactly `count` hex digits starting at `start`, returning the
/// parsed value and how many bytes were consumed. Errors point at the first
/// invalid (or missing) hex digit.
fn hex_escape(body: &str, start: usize, count: usize, backslash_at: usize) -> Result<(u32, usize), (String, usize)> {
    let rest = &body[start.min(body.len())..];
    let mut value: u32 = 0;
    let mut consumed = 0;
    for (offset, c) in rest.char_indices().take(count) {
        match c.to_digit(16) {
            Some(d) => {
                value = value * 16 + d;
                consumed = offset + c.len_utf8();
            }
            None => return Err(("invalid hex digit in \\x escape".into(), start + offset)),
        }
    }
    if consumed == 0 && count > 0 || rest.chars().take(count).count() < count {
        let at = start + consumed;
        return Err(("incomplete \\x escape".into(), at));
    }
    let _ = backslash_at;
    Ok((value, consumed))
}

/// `\uHHHH` or `\u{H...}`, mirroring the two forms ECMAScript accepts.
fn unicode_escape(body: &str, start: usize, backslash_at: usize) -> Result<(u32, usize), (String, usize)> {
    if body.as_bytes().get(start) == Some(&b'{') {
        let rest = &body[start + 1..];
        let end = rest.find('}').ok_or(("unterminated \\u{...} escape".to_string(), start))?;
        let digits = &rest[..end];
        if digits.is_empty() {
            return Err(("invalid hex digit in \\u{...} escape".into(), start + 1));
        }
        if let Some((offset, _)) = digits.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(("invalid hex digit in \\u{...} escape".into(), start + 1 + offset));
        }
        if digits.len() > 6 {
            return Err(("\\u{...} escape accepts at most 6 hex digits".into(), start + 1));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ("invalid \\u{...} escape".to_string(), start + 1))?;
        Ok((value, 1 + end + 1))
    } else {
        let (value, consumed) = hex_escape(body, start, 4, backslash_at)?;
        Ok((value, consumed))
    }
}

fn char_from_u32(value: u32, backslash_at: usize) -> Result<char, (String, usize)> {
    char::from_u32(value).ok_or(("escape does not denote a valid Unicode scalar value".to_string(), backslash_at))
}
