//! Purpose: Decode request bytes into a `JsonValue` under a `ParsePolicy`.
//! Exports: `parse`, `parse_str`, `decode_utf8`, `resolve_shape`.
//! Role: Single parser whose strictness knobs come from policy data.
//! Invariants: Every failure is one typed `Error` with a byte offset where one exists.
//! Invariants: Duplicate detection runs on unescaped keys, before the value is parsed.
//! Invariants: Shape attempts are evaluated in order after a single parse pass.

use indexmap::IndexMap;
use num_bigint::BigInt;

use super::decimal::Decimal;
use super::policy::{NumericMode, ParsePolicy};
use super::value::{JsonNumber, JsonValue, Shape};
use crate::core::error::{Error, ErrorKind};

/// Decode, parse, and resolve the top-level shape in one call.
pub fn parse(input: &[u8], policy: &ParsePolicy) -> Result<JsonValue, Error> {
    let text = decode_utf8(input)?;
    let value = parse_str(text, policy)?;
    resolve_shape(&value, policy.shapes)?;
    Ok(value)
}

pub fn decode_utf8(input: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(input).map_err(|err| {
        Error::new(ErrorKind::Encoding)
            .with_message("input is not valid UTF-8")
            .with_offset(err.valid_up_to() as u64)
            .with_source(err)
    })
}

/// Parse one JSON document without shape resolution.
pub fn parse_str(text: &str, policy: &ParsePolicy) -> Result<JsonValue, Error> {
    let mut parser = Parser::new(text, policy);
    parser.skip_whitespace();
    if parser.peek().is_none() {
        return Err(parser.syntax_error("empty input"));
    }
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.pos < parser.bytes.len() {
        if policy.forbid_trailing_content {
            return Err(parser.error_at(
                ErrorKind::TrailingContent,
                "unexpected content after top-level value",
                parser.pos,
            ));
        }
        tracing::debug!(
            ignored_bytes = parser.bytes.len() - parser.pos,
            "ignoring trailing content"
        );
    }
    Ok(value)
}

/// Walk the ordered shape attempts and return the first one the value satisfies.
pub fn resolve_shape(value: &JsonValue, attempts: &[Shape]) -> Result<Shape, Error> {
    for (index, shape) in attempts.iter().enumerate() {
        if shape.accepts(value) {
            if index > 0 {
                tracing::debug!(
                    attempt = index,
                    shape = shape.label(),
                    "shape fallback matched"
                );
            }
            return Ok(*shape);
        }
        tracing::debug!(
            attempt = index,
            expected = shape.label(),
            actual = value.shape().label(),
            "shape attempt missed"
        );
    }
    let expected = if attempts.is_empty() {
        "nothing".to_string()
    } else {
        attempts
            .iter()
            .map(|shape| shape.label())
            .collect::<Vec<_>>()
            .join(" or ")
    };
    Err(Error::new(ErrorKind::ShapeMismatch).with_message(format!(
        "expected top-level {expected}, found {}",
        value.type_name()
    )))
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    policy: &'a ParsePolicy,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, policy: &'a ParsePolicy) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
            policy,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self) -> Result<JsonValue, Error> {
        match self.peek() {
            None => Err(self.syntax_error("unexpected end of input")),
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => Ok(JsonValue::String(self.parse_string()?)),
            Some(b't') => self.parse_keyword("true", JsonValue::Bool(true)),
            Some(b'f') => self.parse_keyword("false", JsonValue::Bool(false)),
            Some(b'n') => self.parse_keyword("null", JsonValue::Null),
            Some(b'-' | b'+' | b'0'..=b'9') => self.parse_number(),
            Some(b'N') if self.policy.allow_non_finite => {
                self.parse_keyword("NaN", JsonValue::Number(JsonNumber::Float(f64::NAN)))
            }
            Some(b'I') if self.policy.allow_non_finite => self.parse_keyword(
                "Infinity",
                JsonValue::Number(JsonNumber::Float(f64::INFINITY)),
            ),
            Some(_) => Err(self.unexpected_character()),
        }
    }

    fn parse_keyword(&mut self, keyword: &str, value: JsonValue) -> Result<JsonValue, Error> {
        if self.bytes[self.pos..].starts_with(keyword.as_bytes()) {
            self.pos += keyword.len();
            Ok(value)
        } else {
            Err(self.syntax_error(format!("invalid literal, expected '{keyword}'")))
        }
    }

    fn enter(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > self.policy.max_depth {
            return Err(self.syntax_error(format!(
                "nesting exceeds maximum depth of {}",
                self.policy.max_depth
            )));
        }
        Ok(())
    }

    fn parse_object(&mut self) -> Result<JsonValue, Error> {
        self.enter()?;
        let open = self.pos;
        self.pos += 1;

        let mut map = IndexMap::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(JsonValue::Object(map));
        }

        loop {
            self.skip_whitespace();
            let key_offset = self.pos;
            match self.peek() {
                Some(b'"') => {}
                None => return Err(self.error_at(ErrorKind::Syntax, "unterminated object", open)),
                Some(_) => return Err(self.syntax_error("expected string key")),
            }
            let key = self.parse_string()?;
            if map.contains_key(&key) {
                if self.policy.reject_duplicate_keys {
                    return Err(self
                        .error_at(ErrorKind::DuplicateKey, "duplicate object key", key_offset)
                        .with_key(key));
                }
                tracing::trace!(key = %key, "duplicate key, last value wins");
            }

            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(self.syntax_error("expected ':' after object key"));
            }
            self.pos += 1;
            self.skip_whitespace();

            let value = self.parse_value()?;
            // Existing keys keep their original position.
            map.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(self.error_at(ErrorKind::Syntax, "unterminated object", open)),
                Some(_) => return Err(self.syntax_error("expected ',' or '}' in object")),
            }
        }

        self.depth -= 1;
        Ok(JsonValue::Object(map))
    }

    fn parse_array(&mut self) -> Result<JsonValue, Error> {
        self.enter()?;
        let open = self.pos;
        self.pos += 1;

        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(JsonValue::Array(items));
        }

        loop {
            self.skip_whitespace();
            if self.peek() == Some(b']') {
                return Err(self.syntax_error("trailing comma in array"));
            }
            items.push(self.parse_value()?);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(self.error_at(ErrorKind::Syntax, "unterminated array", open)),
                Some(_) => return Err(self.syntax_error("expected ',' or ']' in array")),
            }
        }

        self.depth -= 1;
        Ok(JsonValue::Array(items))
    }

    fn parse_string(&mut self) -> Result<String, Error> {
        let open = self.pos;
        self.pos += 1;

        let mut out = String::new();
        loop {
            let run_start = self.pos;
            while let Some(b) = self.peek() {
                if b == b'"' || b == b'\\' || b < 0x20 {
                    break;
                }
                self.pos += 1;
            }
            // Runs stop on ASCII bytes only, so the slice is on char boundaries.
            out.push_str(&self.text[run_start..self.pos]);

            match self.peek() {
                None => return Err(self.error_at(ErrorKind::Syntax, "unterminated string", open)),
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    let ch = self.parse_escape()?;
                    out.push(ch);
                }
                Some(_) => return Err(self.syntax_error("unescaped control character in string")),
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char, Error> {
        let start = self.pos;
        self.pos += 1;
        let Some(b) = self.peek() else {
            return Err(self.error_at(ErrorKind::Syntax, "unterminated escape sequence", start));
        };
        self.pos += 1;
        let ch = match b {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{08}',
            b'f' => '\u{0C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => return self.parse_unicode_escape(start),
            _ => return Err(self.error_at(ErrorKind::Syntax, "invalid escape sequence", start)),
        };
        Ok(ch)
    }

    fn parse_unicode_escape(&mut self, start: usize) -> Result<char, Error> {
        let unit = self.read_hex4(start)?;
        let code = match unit {
            0xD800..=0xDBFF => {
                if !self.bytes[self.pos..].starts_with(b"\\u") {
                    return Err(self.error_at(ErrorKind::Syntax, "unpaired surrogate escape", start));
                }
                self.pos += 2;
                let low = self.read_hex4(start)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.error_at(ErrorKind::Syntax, "unpaired surrogate escape", start));
                }
                0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(self.error_at(ErrorKind::Syntax, "unpaired surrogate escape", start));
            }
            _ => u32::from(unit),
        };
        char::from_u32(code)
            .ok_or_else(|| self.error_at(ErrorKind::Syntax, "invalid unicode escape", start))
    }

    fn read_hex4(&mut self, start: usize) -> Result<u16, Error> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let digit = match self.peek() {
                Some(b @ b'0'..=b'9') => b - b'0',
                Some(b @ b'a'..=b'f') => b - b'a' + 10,
                Some(b @ b'A'..=b'F') => b - b'A' + 10,
                _ => return Err(self.error_at(ErrorKind::Syntax, "invalid unicode escape", start)),
            };
            self.pos += 1;
            value = (value << 4) | u16::from(digit);
        }
        Ok(value)
    }

    fn parse_number(&mut self) -> Result<JsonValue, Error> {
        let start = self.pos;
        let mut negative = false;
        match self.peek() {
            Some(b'+') => {
                if !self.policy.allow_leading_plus {
                    return Err(self.number_error("leading '+' is not allowed", start));
                }
                self.pos += 1;
            }
            Some(b'-') => {
                negative = true;
                self.pos += 1;
            }
            _ => {}
        }

        if negative && self.policy.allow_non_finite && self.peek() == Some(b'I') {
            return self.parse_keyword(
                "Infinity",
                JsonValue::Number(JsonNumber::Float(f64::NEG_INFINITY)),
            );
        }

        let digits_start = self.pos;
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if matches!(self.peek(), Some(b'0'..=b'9')) {
                    return Err(self.number_error("leading zeros are not allowed", start));
                }
            }
            Some(b'1'..=b'9') => {
                self.consume_digits();
            }
            _ => return Err(self.number_error("expected digit", start)),
        }

        let mut integral = true;
        if self.peek() == Some(b'.') {
            integral = false;
            self.pos += 1;
            if self.consume_digits() == 0 {
                return Err(self.number_error("expected digit after decimal point", start));
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            integral = false;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.consume_digits() == 0 {
                return Err(self.number_error("expected digit in exponent", start));
            }
        }

        // A tolerated '+' is not part of the value.
        let literal = if negative {
            &self.text[start..self.pos]
        } else {
            &self.text[digits_start..self.pos]
        };
        self.number_from_literal(literal, integral, start)
            .map(JsonValue::Number)
    }

    fn consume_digits(&mut self) -> usize {
        let start = self.pos;
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        self.pos - start
    }

    fn number_from_literal(
        &self,
        literal: &str,
        integral: bool,
        start: usize,
    ) -> Result<JsonNumber, Error> {
        if integral {
            if let Ok(value) = literal.parse::<i64>() {
                return Ok(JsonNumber::Int(value));
            }
            if self.policy.exact_big_integers || self.policy.numeric_mode == NumericMode::Decimal {
                return literal
                    .parse::<BigInt>()
                    .map(JsonNumber::BigInt)
                    .map_err(|err| self.number_error("invalid number", start).with_source(err));
            }
        }
        match self.policy.numeric_mode {
            NumericMode::Float => {
                let value: f64 = literal
                    .parse()
                    .map_err(|err| self.number_error("invalid number", start).with_source(err))?;
                if !value.is_finite() && !self.policy.allow_non_finite {
                    return Err(self.number_error("number out of range", start));
                }
                Ok(JsonNumber::Float(value))
            }
            NumericMode::Decimal => Decimal::from_literal(literal)
                .map(JsonNumber::Decimal)
                .ok_or_else(|| self.number_error("decimal exponent out of range", start)),
        }
    }

    fn unexpected_character(&self) -> Error {
        let found = self.text[self.pos..].chars().next().unwrap_or('?');
        self.syntax_error(format!("unexpected character {found:?}"))
    }

    fn syntax_error(&self, message: impl Into<String>) -> Error {
        self.error_at(ErrorKind::Syntax, message, self.pos)
    }

    fn number_error(&self, message: &str, offset: usize) -> Error {
        self.error_at(ErrorKind::NumberSyntax, message, offset)
    }

    fn error_at(&self, kind: ErrorKind, message: impl Into<String>, offset: usize) -> Error {
        let (line, column) = line_column(self.bytes, offset);
        Error::new(kind)
            .with_message(message)
            .with_offset(offset as u64)
            .with_position(line, column)
    }
}

/// 1-based line and column (in characters) of a byte offset.
fn line_column(bytes: &[u8], offset: usize) -> (u64, u64) {
    let prefix = &bytes[..offset.min(bytes.len())];
    let line = prefix.iter().filter(|b| **b == b'\n').count() + 1;
    let line_start = prefix
        .iter()
        .rposition(|b| *b == b'\n')
        .map_or(0, |index| index + 1);
    let column = prefix[line_start..]
        .iter()
        .filter(|b| (**b & 0xC0) != 0x80)
        .count()
        + 1;
    (line as u64, column as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ParsePolicy {
        ParsePolicy::DEFAULT
    }

    fn parse_ok(input: &str, policy: &ParsePolicy) -> JsonValue {
        parse(input.as_bytes(), policy).expect("parse ok")
    }

    fn parse_err(input: &str, policy: &ParsePolicy) -> Error {
        parse(input.as_bytes(), policy).expect_err("parse error")
    }

    #[test]
    fn duplicate_keys_rejected_or_last_wins() {
        let strict = ParsePolicy {
            reject_duplicate_keys: true,
            ..policy()
        };
        let err = parse_err(r#"{"a":1,"a":2}"#, &strict);
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        assert_eq!(err.key(), Some("a"));
        assert_eq!(err.offset(), Some(7));

        let value = parse_ok(r#"{"a":1,"b":0,"a":2}"#, &policy());
        let map = value.as_object().expect("object");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_index(0).map(|(k, _)| k.as_str()), Some("a"));
        assert_eq!(value.get("a"), Some(&JsonValue::Number(JsonNumber::Int(2))));
    }

    #[test]
    fn duplicate_detection_uses_unescaped_keys() {
        let strict = ParsePolicy {
            reject_duplicate_keys: true,
            ..policy()
        };
        let err = parse_err("{\"a\":1,\"\\u0061\":2}", &strict);
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        assert_eq!(err.key(), Some("a"));
    }

    #[test]
    fn trailing_content_rejected_or_ignored() {
        let err = parse_err(r#"{"a":1} garbage"#, &policy());
        assert_eq!(err.kind(), ErrorKind::TrailingContent);
        assert_eq!(err.offset(), Some(8));

        let lenient = ParsePolicy {
            forbid_trailing_content: false,
            ..policy()
        };
        let value = parse_ok(r#"{"a":1} garbage"#, &lenient);
        assert_eq!(value.get("a"), Some(&JsonValue::Number(JsonNumber::Int(1))));
    }

    #[test]
    fn trailing_whitespace_is_not_content() {
        parse_ok("[1]\n\t \r\n", &policy());
    }

    #[test]
    fn leading_plus_follows_policy() {
        let err = parse_err(r#"{"x":+5}"#, &policy());
        assert_eq!(err.kind(), ErrorKind::NumberSyntax);
        assert_eq!(err.offset(), Some(5));

        let lenient = ParsePolicy {
            allow_leading_plus: true,
            ..policy()
        };
        let value = parse_ok(r#"{"x":+5}"#, &lenient);
        assert_eq!(value.get("x"), Some(&JsonValue::Number(JsonNumber::Int(5))));

        let err = parse_err("+-5", &lenient);
        assert_eq!(err.kind(), ErrorKind::NumberSyntax);
    }

    #[test]
    fn decimal_mode_keeps_scale() {
        let decimal = ParsePolicy {
            numeric_mode: NumericMode::Decimal,
            ..policy()
        };
        let value = parse_ok(r#"{"x":1.10}"#, &decimal);
        match value.get("x") {
            Some(JsonValue::Number(JsonNumber::Decimal(d))) => assert_eq!(d.to_string(), "1.10"),
            other => panic!("expected decimal, got {other:?}"),
        }

        let pi = "3.141592653589793238462643383279502884197";
        match parse_ok(pi, &decimal) {
            JsonValue::Number(JsonNumber::Decimal(d)) => assert_eq!(d.to_string(), pi),
            other => panic!("expected decimal, got {other:?}"),
        }

        let value = parse_ok(r#"{"x":1.10}"#, &policy());
        assert_eq!(value.get("x"), Some(&JsonValue::Number(JsonNumber::Float(1.1))));
    }

    #[test]
    fn malformed_numbers_are_number_syntax_errors() {
        for input in ["01", "1.", "-", "1e", "1e+", ".5"] {
            let err = parse_err(input, &policy());
            let expected = if input == ".5" {
                ErrorKind::Syntax
            } else {
                ErrorKind::NumberSyntax
            };
            assert_eq!(err.kind(), expected, "input {input}");
        }
    }

    #[test]
    fn float_overflow_is_out_of_range_unless_non_finite_allowed() {
        let err = parse_err("1e400", &policy());
        assert_eq!(err.kind(), ErrorKind::NumberSyntax);

        let lenient = ParsePolicy {
            allow_non_finite: true,
            ..policy()
        };
        assert_eq!(
            parse_ok("1e400", &lenient),
            JsonValue::Number(JsonNumber::Float(f64::INFINITY))
        );
        assert_eq!(
            parse_ok("-Infinity", &lenient),
            JsonValue::Number(JsonNumber::Float(f64::NEG_INFINITY))
        );
        assert!(matches!(
            parse_ok("[NaN]", &lenient).as_array(),
            Some([JsonValue::Number(JsonNumber::Float(f))]) if f.is_nan()
        ));
        assert_eq!(parse_err("NaN", &policy()).kind(), ErrorKind::Syntax);
    }

    #[test]
    fn large_integers_follow_numeric_mode_and_exactness() {
        let big = "123456789012345678901234";
        assert!(matches!(
            parse_ok(big, &policy()),
            JsonValue::Number(JsonNumber::Float(_))
        ));

        let exact = ParsePolicy {
            exact_big_integers: true,
            ..policy()
        };
        match parse_ok(&format!("[-{big}]"), &exact).as_array() {
            Some([JsonValue::Number(JsonNumber::BigInt(n))]) => {
                assert_eq!(n.to_string(), format!("-{big}"));
            }
            other => panic!("expected big integer, got {other:?}"),
        }

        let decimal = ParsePolicy {
            numeric_mode: NumericMode::Decimal,
            ..policy()
        };
        match parse_ok("79228162514264337593543950336", &decimal) {
            JsonValue::Number(JsonNumber::BigInt(n)) => {
                assert_eq!(n.to_string(), "79228162514264337593543950336");
            }
            other => panic!("expected big integer, got {other:?}"),
        }
    }

    #[test]
    fn decimal_mode_accepts_extreme_exponents() {
        let decimal = ParsePolicy {
            numeric_mode: NumericMode::Decimal,
            ..policy()
        };
        for (input, expected) in [("1e40", "1E+40"), ("1e-30", "1E-30"), ("-2.5e400", "-2.5E+400")] {
            match parse_ok(input, &decimal) {
                JsonValue::Number(JsonNumber::Decimal(d)) => assert_eq!(d.to_string(), expected),
                other => panic!("expected decimal for {input}, got {other:?}"),
            }
        }
        let err = parse_err("1e99999999999", &decimal);
        assert_eq!(err.kind(), ErrorKind::NumberSyntax);
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn structural_errors_carry_line_and_column() {
        let err = parse_err("{\n  \"a\": [1, 2\n}", &policy());
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.column(), Some(1));

        let err = parse_err("\"abc", &policy());
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.offset(), Some(0));

        let err = parse_err(r#"["\x"]"#, &policy());
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.message(), Some("invalid escape sequence"));

        assert_eq!(parse_err("", &policy()).kind(), ErrorKind::Syntax);
        assert_eq!(parse_err("[1,]", &policy()).kind(), ErrorKind::Syntax);
        assert_eq!(parse_err(r#"{"a":1,}"#, &policy()).kind(), ErrorKind::Syntax);
        assert_eq!(parse_err("tru", &policy()).kind(), ErrorKind::Syntax);
    }

    #[test]
    fn unicode_escapes_and_surrogates() {
        let value = parse_ok("\"\\u00e9\\ud83d\\ude00\"", &policy());
        assert_eq!(value, JsonValue::String("\u{e9}\u{1F600}".to_string()));

        let err = parse_err("\"\\ud83d\"", &policy());
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn invalid_utf8_is_encoding_error() {
        let err = parse(&[b'[', b'"', 0xff, b'"', b']'], &policy()).expect_err("encoding");
        assert_eq!(err.kind(), ErrorKind::Encoding);
        assert_eq!(err.offset(), Some(2));
    }

    #[test]
    fn depth_limit_is_enforced() {
        let shallow = ParsePolicy {
            max_depth: 3,
            ..policy()
        };
        parse_ok("[[[1]]]", &shallow);
        let err = parse_err("[[[[1]]]]", &shallow);
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn shape_fallback_exhausts_attempts_in_order() {
        let object_then_array = ParsePolicy {
            shapes: &[Shape::Object, Shape::Array],
            ..policy()
        };
        let value = parse_ok("[1,2,3]", &object_then_array);
        assert_eq!(value.as_array().map(<[JsonValue]>::len), Some(3));
        assert_eq!(
            resolve_shape(&value, object_then_array.shapes).expect("shape"),
            Shape::Array
        );

        let err = parse_err("42", &object_then_array);
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        assert_eq!(
            err.message(),
            Some("expected top-level object or array, found number")
        );
    }

    #[test]
    fn key_order_is_preserved() {
        let value = parse_ok(r#"{"b":1,"a":2,"c":3}"#, &policy());
        let keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }
}
