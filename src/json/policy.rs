//! Purpose: Immutable parse and render configuration values.
//! Exports: `ParsePolicy`, `NumericMode`, `RenderPolicy`, `EscapeTable`, `CharEscape`, `HexCase`.
//! Role: Data-only knobs; parser and renderer branch on these, never on variant names.
//! Invariants: Every policy is `Copy` and constructible in `const` context.
//! Invariants: Escape tables are data; adding a consumer never adds a code path.

use super::value::Shape;

pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=UTF-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericMode {
    /// Non-integer literals become `f64`.
    Float,
    /// Non-integer literals keep their exact decimal value and scale.
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsePolicy {
    pub reject_duplicate_keys: bool,
    pub numeric_mode: NumericMode,
    pub forbid_trailing_content: bool,
    pub allow_leading_plus: bool,
    /// Accept `NaN`, `Infinity`, and `-Infinity` literals (and float overflow).
    pub allow_non_finite: bool,
    /// Keep integers beyond `i64` exact in `Float` mode. `Decimal` mode always does.
    pub exact_big_integers: bool,
    pub max_depth: usize,
    /// Ordered top-level shape attempts; the first match wins.
    pub shapes: &'static [Shape],
}

impl ParsePolicy {
    pub const DEFAULT_MAX_DEPTH: usize = 512;

    pub const DEFAULT: ParsePolicy = ParsePolicy {
        reject_duplicate_keys: false,
        numeric_mode: NumericMode::Float,
        forbid_trailing_content: true,
        allow_leading_plus: false,
        allow_non_finite: false,
        exact_big_integers: false,
        max_depth: Self::DEFAULT_MAX_DEPTH,
        shapes: &[Shape::Any],
    };
}

impl Default for ParsePolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexCase {
    Lower,
    Upper,
}

/// How an overridden character is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharEscape {
    /// `\uXXXX` using the table's hex case.
    Unicode,
    /// A fixed replacement sequence written verbatim.
    Sequence(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeTable {
    pub name: &'static str,
    /// Checked before the standard JSON escapes.
    pub overrides: &'static [(char, CharEscape)],
    pub escape_non_ascii: bool,
    pub hex_case: HexCase,
}

impl EscapeTable {
    /// Minimal JSON escaping: quote, backslash, and control characters.
    pub const STANDARD: EscapeTable = EscapeTable {
        name: "standard",
        overrides: &[],
        escape_non_ascii: false,
        hex_case: HexCase::Lower,
    };

    /// HTML-sensitive characters escaped for OpenMRS consumers.
    pub const OPENMRS: EscapeTable = EscapeTable {
        name: "openmrs",
        overrides: &[
            ('<', CharEscape::Unicode),
            ('>', CharEscape::Unicode),
            ('&', CharEscape::Unicode),
            ('\'', CharEscape::Unicode),
        ],
        escape_non_ascii: false,
        hex_case: HexCase::Upper,
    };

    /// Everything outside ASCII escaped, surrogate pairs for astral code points.
    pub const ASCII: EscapeTable = EscapeTable {
        name: "ascii",
        overrides: &[],
        escape_non_ascii: true,
        hex_case: HexCase::Lower,
    };

    pub fn lookup(&self, ch: char) -> Option<CharEscape> {
        self.overrides
            .iter()
            .find(|(candidate, _)| *candidate == ch)
            .map(|(_, escape)| *escape)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPolicy {
    pub escapes: &'static EscapeTable,
    pub sort_keys: bool,
    pub content_type: &'static str,
}

impl RenderPolicy {
    pub const DEFAULT: RenderPolicy = RenderPolicy {
        escapes: &EscapeTable::STANDARD,
        sort_keys: false,
        content_type: TEXT_PLAIN_UTF8,
    };
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_table_lookup_is_per_character() {
        assert_eq!(EscapeTable::OPENMRS.lookup('<'), Some(CharEscape::Unicode));
        assert_eq!(EscapeTable::OPENMRS.lookup('a'), None);
        assert_eq!(EscapeTable::STANDARD.lookup('<'), None);
    }

    #[test]
    fn defaults_accept_any_shape_and_keep_order() {
        let parse = ParsePolicy::default();
        assert_eq!(parse.shapes, &[Shape::Any]);
        assert!(parse.forbid_trailing_content);
        assert!(!parse.reject_duplicate_keys);
        let render = RenderPolicy::default();
        assert!(!render.sort_keys);
        assert_eq!(render.content_type, TEXT_PLAIN_UTF8);
    }
}
