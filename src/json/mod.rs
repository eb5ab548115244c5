//! Purpose: Policy-driven JSON parsing and rendering for the echo transform.
//! Exports: `parse`, `render`, value types, and policy types.
//! Role: Single seam for parse/serialize so variants differ only by policy data.
//! Invariants: No hidden global state; policies are passed in explicitly.
//! Invariants: Parse and render never perform I/O.

pub mod decimal;
pub mod parse;
pub mod policy;
pub mod render;
pub mod value;

pub use decimal::Decimal;
pub use parse::{decode_utf8, parse, parse_str, resolve_shape};
pub use policy::{CharEscape, EscapeTable, HexCase, NumericMode, ParsePolicy, RenderPolicy};
pub use render::{render, render_to_string};
pub use value::{JsonNumber, JsonValue, Shape};
