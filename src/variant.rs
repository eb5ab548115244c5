//! Purpose: Registry of named echo variants (route name -> parse/render policy pair).
//! Exports: `Variant`.
//! Role: Configuration table consulted by the HTTP handler and the CLI.
//! Invariants: Entries are `static` and immutable; lookups never allocate.
//! Invariants: Names are unique and double as the HTTP route segment.
//! Notes: `hapiecho` and `hapiechoresource` are kept as separate configurations on purpose.

use serde_json::{Value, json};

use crate::core::error::Error;
use crate::echo::{EchoOutput, transform};
use crate::json::policy::TEXT_PLAIN_UTF8;
use crate::json::{EscapeTable, NumericMode, ParsePolicy, RenderPolicy, Shape};

#[derive(Debug, Clone, Copy)]
pub struct Variant {
    pub name: &'static str,
    pub description: &'static str,
    pub parse: ParsePolicy,
    pub render: RenderPolicy,
}

const OBJECT_THEN_ARRAY: &[Shape] = &[Shape::Object, Shape::Array];

// Jackson `Map` echo: big decimals, leading '+', trailing tokens rejected.
const JACKSON_MAP: ParsePolicy = ParsePolicy {
    reject_duplicate_keys: false,
    numeric_mode: NumericMode::Decimal,
    forbid_trailing_content: true,
    allow_leading_plus: true,
    allow_non_finite: false,
    exact_big_integers: true,
    max_depth: ParsePolicy::DEFAULT_MAX_DEPTH,
    shapes: OBJECT_THEN_ARRAY,
};

// Plain Jackson mapper: doubles, no '+', trailing tokens ignored, BigInteger for wide ints.
const JACKSON_PLAIN: ParsePolicy = ParsePolicy {
    reject_duplicate_keys: false,
    numeric_mode: NumericMode::Float,
    forbid_trailing_content: false,
    allow_leading_plus: false,
    allow_non_finite: false,
    exact_big_integers: true,
    max_depth: ParsePolicy::DEFAULT_MAX_DEPTH,
    shapes: OBJECT_THEN_ARRAY,
};

static VARIANTS: [Variant; 6] = [
    Variant {
        name: "echo",
        description: "canonical parse and render with default policies",
        parse: ParsePolicy::DEFAULT,
        render: RenderPolicy::DEFAULT,
    },
    Variant {
        name: "hapiecho",
        description: "Jackson map echo with decimal numbers and leading '+' tolerance",
        parse: JACKSON_MAP,
        render: RenderPolicy::DEFAULT,
    },
    Variant {
        name: "openmrsecho",
        description: "plain Jackson map echo rendered with the OpenMRS escape table",
        parse: JACKSON_PLAIN,
        render: RenderPolicy {
            escapes: &EscapeTable::OPENMRS,
            sort_keys: false,
            content_type: TEXT_PLAIN_UTF8,
        },
    },
    Variant {
        name: "ibmecho",
        description: "Jakarta JSON structure echo that rejects duplicate keys",
        parse: ParsePolicy {
            reject_duplicate_keys: true,
            numeric_mode: NumericMode::Decimal,
            forbid_trailing_content: true,
            allow_leading_plus: false,
            allow_non_finite: false,
            exact_big_integers: true,
            max_depth: ParsePolicy::DEFAULT_MAX_DEPTH,
            shapes: OBJECT_THEN_ARRAY,
        },
        render: RenderPolicy::DEFAULT,
    },
    Variant {
        name: "hapiechoresource",
        description: "HAPI resource echo: top-level object only, lenient duplicates",
        parse: ParsePolicy {
            reject_duplicate_keys: false,
            numeric_mode: NumericMode::Decimal,
            forbid_trailing_content: true,
            allow_leading_plus: false,
            allow_non_finite: false,
            exact_big_integers: true,
            max_depth: ParsePolicy::DEFAULT_MAX_DEPTH,
            shapes: &[Shape::Object],
        },
        render: RenderPolicy {
            escapes: &EscapeTable::STANDARD,
            sort_keys: false,
            content_type: "text/plain",
        },
    },
    Variant {
        name: "gnuhealthecho",
        description: "Python json echo: floats, NaN/Infinity, sorted keys, ASCII output",
        parse: ParsePolicy {
            reject_duplicate_keys: false,
            numeric_mode: NumericMode::Float,
            forbid_trailing_content: true,
            allow_leading_plus: false,
            allow_non_finite: true,
            exact_big_integers: true,
            max_depth: ParsePolicy::DEFAULT_MAX_DEPTH,
            shapes: &[Shape::Any],
        },
        render: RenderPolicy {
            escapes: &EscapeTable::ASCII,
            sort_keys: true,
            content_type: "application/json",
        },
    },
];

impl Variant {
    pub fn all() -> &'static [Variant] {
        &VARIANTS
    }

    pub fn lookup(name: &str) -> Option<&'static Variant> {
        VARIANTS.iter().find(|variant| variant.name == name)
    }

    pub fn echo(&self, raw_input: &[u8]) -> Result<EchoOutput, Error> {
        transform(raw_input, &self.parse, &self.render)
    }

    /// JSON description used by `GET /variants` and `jsonecho variants`.
    pub fn describe(&self) -> Value {
        let numeric_mode = match self.parse.numeric_mode {
            NumericMode::Float => "float",
            NumericMode::Decimal => "decimal",
        };
        let shapes: Vec<&str> = self.parse.shapes.iter().map(|shape| shape.label()).collect();
        json!({
            "name": self.name,
            "description": self.description,
            "parse": {
                "reject_duplicate_keys": self.parse.reject_duplicate_keys,
                "numeric_mode": numeric_mode,
                "forbid_trailing_content": self.parse.forbid_trailing_content,
                "allow_leading_plus": self.parse.allow_leading_plus,
                "allow_non_finite": self.parse.allow_non_finite,
                "exact_big_integers": self.parse.exact_big_integers,
                "max_depth": self.parse.max_depth,
                "shapes": shapes,
            },
            "render": {
                "escapes": self.render.escapes.name,
                "sort_keys": self.render.sort_keys,
                "content_type": self.render.content_type,
            },
        })
    }
}
