//! Purpose: Arbitrary-precision decimal numbers for decimal-mode parsing.
//! Exports: `Decimal`.
//! Role: Exact value of a non-integer literal as an unscaled integer and a scale.
//! Invariants: Value is `unscaled * 10^-scale`; the scale always fits in an `i32`.
//! Invariants: Rendering uses plain notation unless the adjusted exponent is below -6
//! or the scale is negative, then `d.dddE±n`.

use std::fmt;

use num_bigint::{BigInt, Sign};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    unscaled: BigInt,
    scale: i64,
}

impl Decimal {
    pub fn new(unscaled: BigInt, scale: i32) -> Self {
        Self {
            unscaled,
            scale: i64::from(scale),
        }
    }

    /// Build from a literal that already matched the JSON number grammar
    /// (no leading `+`). Returns `None` when the scale leaves the `i32` range.
    pub fn from_literal(literal: &str) -> Option<Self> {
        let (mantissa, exponent) = match literal.find(['e', 'E']) {
            Some(index) => (&literal[..index], parse_exponent(&literal[index + 1..])?),
            None => (literal, 0),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let mut digits = String::with_capacity(int_part.len() + frac_part.len());
        digits.push_str(int_part);
        digits.push_str(frac_part);
        let unscaled: BigInt = digits.parse().ok()?;

        let scale = i64::try_from(frac_part.len()).ok()?.checked_sub(exponent)?;
        if i32::try_from(scale).is_err() {
            return None;
        }
        Some(Self { unscaled, scale })
    }

    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }
}

fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Some(0);
    }
    // Anything longer cannot produce an i32 scale.
    if digits.len() > 12 {
        return None;
    }
    let magnitude: i64 = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coefficient = self.unscaled.magnitude().to_string();
        if self.unscaled.sign() == Sign::Minus {
            f.write_str("-")?;
        }

        let width = i64::try_from(coefficient.len()).map_err(|_| fmt::Error)?;
        let adjusted = width - 1 - self.scale;
        if self.scale >= 0 && adjusted >= -6 {
            let scale = usize::try_from(self.scale).map_err(|_| fmt::Error)?;
            if scale == 0 {
                f.write_str(&coefficient)
            } else if coefficient.len() > scale {
                let (whole, fraction) = coefficient.split_at(coefficient.len() - scale);
                write!(f, "{whole}.{fraction}")
            } else {
                let zeros = "0".repeat(scale - coefficient.len());
                write!(f, "0.{zeros}{coefficient}")
            }
        } else {
            let (lead, rest) = coefficient.split_at(1);
            f.write_str(lead)?;
            if !rest.is_empty() {
                write!(f, ".{rest}")?;
            }
            let sign = if adjusted >= 0 { "+" } else { "" };
            write!(f, "E{sign}{adjusted}")
        }
    }
}
