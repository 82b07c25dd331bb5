//! Basic literal parsing.

use golite_runtime::NativeValue;
use golite_syntax::LitKind;

use crate::LowerError;

/// Parse a basic literal's source text into a host value.
pub fn parse_literal(kind: LitKind, text: &str) -> Result<NativeValue, LowerError> {
    match kind {
        LitKind::Int => parse_int(text).map(NativeValue::Int),
        LitKind::String => parse_string(text).map(NativeValue::string),
        LitKind::Float | LitKind::Imag | LitKind::Char => Err(LowerError::UnsupportedLiteral(kind)),
    }
}

/// Parse an integer literal in any of Go's bases.
///
/// Accepts `0x`, `0o`, `0b` prefixes, legacy leading-zero octal, and `_`
/// digit separators.
pub fn parse_int(text: &str) -> Result<i64, LowerError> {
    let invalid = || LowerError::InvalidIntLiteral(text.to_owned());
    let digits: String = text.chars().filter(|&c| c != '_').collect();

    let (radix, body) = match digits.as_bytes() {
        [b'0', b'x' | b'X', ..] => (16, &digits[2..]),
        [b'0', b'o' | b'O', ..] => (8, &digits[2..]),
        [b'0', b'b' | b'B', ..] => (2, &digits[2..]),
        [b'0', _, ..] => (8, &digits[1..]),
        _ => (10, digits.as_str()),
    };
    if body.is_empty() || body.starts_with(['+', '-']) {
        return Err(invalid());
    }
    i64::from_str_radix(body, radix).map_err(|_| invalid())
}

/// Strip the quotes from a string literal.
///
/// Interpreted strings only translate `\n`; every other escape is kept as
/// written. Raw (backquoted) strings are taken verbatim.
pub fn parse_string(text: &str) -> Result<String, LowerError> {
    let invalid = || LowerError::InvalidStringLiteral(text.to_owned());
    if text.len() < 2 {
        return Err(invalid());
    }
    if let Some(raw) = text.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
        return Ok(raw.to_owned());
    }
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .map(|inner| inner.replace("\\n", "\n"))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests;
