use super::*;
use pretty_assertions::assert_eq;

#[test]
fn integer_bases() {
    assert_eq!(parse_int("42"), Ok(42));
    assert_eq!(parse_int("0"), Ok(0));
    assert_eq!(parse_int("0x2A"), Ok(42));
    assert_eq!(parse_int("0o52"), Ok(42));
    assert_eq!(parse_int("052"), Ok(42));
    assert_eq!(parse_int("0b101010"), Ok(42));
    assert_eq!(parse_int("1_000_000"), Ok(1_000_000));
}

#[test]
fn malformed_integers_are_rejected() {
    for text in ["", "0x", "09", "12a", "99999999999999999999", "0x-1"] {
        assert_eq!(
            parse_int(text),
            Err(LowerError::InvalidIntLiteral(text.to_owned())),
            "{text:?}"
        );
    }
}

#[test]
fn strings_only_unescape_newline() {
    assert_eq!(parse_string(r#""hi""#), Ok("hi".to_owned()));
    assert_eq!(parse_string(r#""a\nb""#), Ok("a\nb".to_owned()));
    assert_eq!(parse_string(r#""tab\t""#), Ok("tab\\t".to_owned()));
    assert_eq!(parse_string(r#""""#), Ok(String::new()));
}

#[test]
fn raw_strings_are_verbatim() {
    assert_eq!(parse_string(r"`a\nb`"), Ok("a\\nb".to_owned()));
}

#[test]
fn unquoted_strings_are_rejected() {
    assert_eq!(
        parse_string("abc"),
        Err(LowerError::InvalidStringLiteral("abc".to_owned()))
    );
    assert_eq!(
        parse_string("\""),
        Err(LowerError::InvalidStringLiteral("\"".to_owned()))
    );
}

#[test]
fn unsupported_kinds() {
    assert_eq!(
        parse_literal(LitKind::Float, "1.5"),
        Err(LowerError::UnsupportedLiteral(LitKind::Float))
    );
    assert_eq!(
        parse_literal(LitKind::Char, "'a'"),
        Err(LowerError::UnsupportedLiteral(LitKind::Char))
    );
    assert_eq!(parse_literal(LitKind::Int, "7"), Ok(NativeValue::Int(7)));
}
