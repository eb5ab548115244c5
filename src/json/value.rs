//! Purpose: In-memory JSON tree produced by the policy-driven parser.
//! Exports: `JsonValue`, `JsonNumber`, `Shape`.
//! Role: Value model shared by parse, render, and shape resolution.
//! Invariants: Object entries keep parse (insertion) order.
//! Invariants: Decimal numbers keep the literal's scale (`1.10` is not `1.1` on output).

use indexmap::IndexMap;
use num_bigint::BigInt;

use super::decimal::Decimal;

/// Numeric representation chosen at parse time by the numeric mode.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNumber {
    /// Integer literal that fits in 64 bits.
    Int(i64),
    /// Integer literal beyond 64 bits, kept digit for digit.
    BigInt(BigInt),
    /// Binary floating point; may be non-finite when the policy allows it.
    Float(f64),
    /// Exact decimal with preserved scale.
    Decimal(Decimal),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(JsonNumber),
    String(String),
    Array(Vec<JsonValue>),
    Object(IndexMap<String, JsonValue>),
}

impl JsonValue {
    pub fn as_object(&self) -> Option<&IndexMap<String, JsonValue>> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Concrete top-level shape of this value (never `Shape::Any`).
    pub fn shape(&self) -> Shape {
        match self {
            JsonValue::Object(_) => Shape::Object,
            JsonValue::Array(_) => Shape::Array,
            _ => Shape::Scalar,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }
}

/// Top-level shape expectation used by ordered shape attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    Array,
    /// Any non-container value.
    Scalar,
    Any,
}

impl Shape {
    pub fn accepts(self, value: &JsonValue) -> bool {
        match self {
            Shape::Any => true,
            expected => expected == value.shape(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Shape::Object => "object",
            Shape::Array => "array",
            Shape::Scalar => "scalar",
            Shape::Any => "any",
        }
    }
}
