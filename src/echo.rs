//! Purpose: The echo transform: bytes in, re-rendered bytes out.
//! Exports: `EchoOutput`, `transform`.
//! Role: Composes parse (with shape resolution) and render for one request.
//! Invariants: Pure; no I/O and no shared mutable state, safe to call concurrently.
//! Invariants: Either fully succeeds or returns exactly one typed error.

use crate::core::error::Error;
use crate::json::{ParsePolicy, RenderPolicy, parse, render};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoOutput {
    pub body: Vec<u8>,
    pub content_type: &'static str,
}

pub fn transform(
    raw_input: &[u8],
    parse_policy: &ParsePolicy,
    render_policy: &RenderPolicy,
) -> Result<EchoOutput, Error> {
    let value = parse(raw_input, parse_policy)?;
    Ok(EchoOutput {
        body: render(&value, render_policy),
        content_type: render_policy.content_type,
    })
}

#[cfg(test)]
mod tests {
    use super::transform;
    use crate::core::error::ErrorKind;
    use crate::json::{EscapeTable, NumericMode, ParsePolicy, RenderPolicy, Shape};

    #[test]
    fn transform_echoes_with_content_type() {
        let output = transform(
            b" {\"b\":1, \"a\":[true,null]} ",
            &ParsePolicy::DEFAULT,
            &RenderPolicy::DEFAULT,
        )
        .expect("echo");
        assert_eq!(output.body, br#"{"b":1,"a":[true,null]}"#);
        assert_eq!(output.content_type, "text/plain; charset=UTF-8");
    }

    #[test]
    fn transform_applies_both_policies() {
        let parse = ParsePolicy {
            numeric_mode: NumericMode::Decimal,
            allow_leading_plus: true,
            shapes: &[Shape::Object, Shape::Array],
            ..ParsePolicy::DEFAULT
        };
        let render = RenderPolicy {
            escapes: &EscapeTable::OPENMRS,
            sort_keys: true,
            content_type: "application/json",
        };
        let output = transform(br#"{"z":+1.50,"a":"<"}"#, &parse, &render).expect("echo");
        assert_eq!(
            String::from_utf8(output.body).expect("utf8"),
            "{\"a\":\"\\u003C\",\"z\":1.50}"
        );
        assert_eq!(output.content_type, "application/json");
    }

    #[test]
    fn transform_surfaces_shape_mismatch_after_all_attempts() {
        let parse = ParsePolicy {
            shapes: &[Shape::Object],
            ..ParsePolicy::DEFAULT
        };
        let err = transform(b"[1,2,3]", &parse, &RenderPolicy::DEFAULT).expect_err("mismatch");
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    }
}
