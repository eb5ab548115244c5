//! Purpose: Serialize a `JsonValue` back to compact JSON text under a `RenderPolicy`.
//! Exports: `render`, `render_to_string`.
//! Role: Output half of the echo transform; escaping is driven by `EscapeTable` data.
//! Invariants: Object keys are written in insertion order unless `sort_keys` is set.
//! Invariants: Escape-table overrides win over the standard JSON escapes.
//! Invariants: Finite floats use shortest round-trip digits; decimals keep their scale.
//! Invariants: Big integers are written digit for digit.

use std::cmp::Ordering;

use super::policy::{CharEscape, EscapeTable, HexCase, RenderPolicy};
use super::value::{JsonNumber, JsonValue};

pub fn render(value: &JsonValue, policy: &RenderPolicy) -> Vec<u8> {
    render_to_string(value, policy).into_bytes()
}

pub fn render_to_string(value: &JsonValue, policy: &RenderPolicy) -> String {
    let mut out = String::new();
    write_value(value, policy, &mut out);
    out
}

fn write_value(value: &JsonValue, policy: &RenderPolicy, out: &mut String) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(true) => out.push_str("true"),
        JsonValue::Bool(false) => out.push_str("false"),
        JsonValue::Number(number) => write_number(number, out),
        JsonValue::String(s) => write_string(s, policy.escapes, out),
        JsonValue::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_value(item, policy, out);
            }
            out.push(']');
        }
        JsonValue::Object(map) => {
            let mut entries: Vec<(&String, &JsonValue)> = map.iter().collect();
            if policy.sort_keys {
                entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
            }
            out.push('{');
            for (index, (key, item)) in entries.into_iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_string(key, policy.escapes, out);
                out.push(':');
                write_value(item, policy, out);
            }
            out.push('}');
        }
    }
}

// Code point order, matching Python's `sort_keys`.
fn compare_keys(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

fn write_number(number: &JsonNumber, out: &mut String) {
    match number {
        JsonNumber::Int(value) => out.push_str(&value.to_string()),
        JsonNumber::BigInt(value) => out.push_str(&value.to_string()),
        JsonNumber::Decimal(value) => out.push_str(&value.to_string()),
        JsonNumber::Float(value) => match serde_json::Number::from_f64(*value) {
            Some(finite) => out.push_str(&finite.to_string()),
            None if value.is_nan() => out.push_str("NaN"),
            None if value.is_sign_negative() => out.push_str("-Infinity"),
            None => out.push_str("Infinity"),
        },
    }
}

fn write_string(s: &str, escapes: &EscapeTable, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        if let Some(escape) = escapes.lookup(ch) {
            match escape {
                CharEscape::Unicode => push_unicode_escape(ch, escapes.hex_case, out),
                CharEscape::Sequence(sequence) => out.push_str(sequence),
            }
            continue;
        }
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => push_unicode_escape(c, escapes.hex_case, out),
            c if escapes.escape_non_ascii && !c.is_ascii() => {
                push_unicode_escape(c, escapes.hex_case, out)
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_unicode_escape(ch: char, case: HexCase, out: &mut String) {
    let mut units = [0u16; 2];
    for unit in ch.encode_utf16(&mut units).iter() {
        let escaped = match case {
            HexCase::Lower => format!("\\u{unit:04x}"),
            HexCase::Upper => format!("\\u{unit:04X}"),
        };
        out.push_str(&escaped);
    }
}
