// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsing for the numeric literals found in coefficient files.

use crate::types::{c64, CoeffKind};

/// A value a coefficient grid can hold. Implemented for `f64` and [`c64`];
/// each type brings its own literal grammar.
pub(crate) trait CoeffValue: Copy + Default {
    fn parse_literal(token: &str) -> Option<Self>;
}

impl CoeffValue for f64 {
    fn parse_literal(token: &str) -> Option<f64> {
        token.parse().ok()
    }
}

impl CoeffValue for c64 {
    fn parse_literal(token: &str) -> Option<c64> {
        parse_complex(token)
    }
}

/// Decides the numeric kind of a whole file from one of its coefficient
/// tokens. A token that reads as a real number marks a real file; failing
/// that, a token that reads as a complex literal marks a complex file.
pub(crate) fn detect_kind(token: &str) -> Option<CoeffKind> {
    if token.parse::<f64>().is_ok() {
        Some(CoeffKind::Real)
    } else if parse_complex(token).is_some() {
        Some(CoeffKind::Complex)
    } else {
        None
    }
}

/// Parses a complex literal such as `-1.2e-3+4.5j`.
///
/// The accepted forms are `<real>`, `<imag>j` and `<real><sign><imag>j`,
/// with no internal whitespace; `J` works in place of `j`. A plain real
/// literal gets a zero imaginary part, as complex files are free to carry
/// real-valued tokens.
pub(crate) fn parse_complex(token: &str) -> Option<c64> {
    if let Ok(re) = token.parse::<f64>() {
        return Some(c64::new(re, 0.0));
    }
    let body = token.strip_suffix(['j', 'J'])?;
    if let Ok(im) = body.parse::<f64>() {
        return Some(c64::new(0.0, im));
    }
    // Split on the sign between the two parts. It can't open the token and
    // can't belong to an exponent.
    let split = body.char_indices().rev().find_map(|(i, c)| {
        let splits_here =
            (c == '+' || c == '-') && i > 0 && !matches!(body.as_bytes()[i - 1], b'e' | b'E');
        splits_here.then_some(i)
    })?;
    let re = body[..split].parse::<f64>().ok()?;
    let im = body[split..].parse::<f64>().ok()?;
    Some(c64::new(re, im))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    #[test]
    fn complex_literals() {
        assert_abs_diff_eq!(parse_complex("1+2j").unwrap(), c64::new(1.0, 2.0));
        assert_abs_diff_eq!(parse_complex("1-2j").unwrap(), c64::new(1.0, -2.0));
        assert_abs_diff_eq!(parse_complex("-0.5+0.25j").unwrap(), c64::new(-0.5, 0.25));
        assert_abs_diff_eq!(parse_complex("2j").unwrap(), c64::new(0.0, 2.0));
        assert_abs_diff_eq!(parse_complex("-2J").unwrap(), c64::new(0.0, -2.0));
        assert_abs_diff_eq!(parse_complex("3.25").unwrap(), c64::new(3.25, 0.0));
    }

    #[test]
    fn exponents_do_not_confuse_the_split() {
        assert_abs_diff_eq!(
            parse_complex("1.5e-3+2j").unwrap(),
            c64::new(1.5e-3, 2.0)
        );
        assert_abs_diff_eq!(
            parse_complex("1.0-2.0e+3j").unwrap(),
            c64::new(1.0, -2.0e3)
        );
        assert_abs_diff_eq!(parse_complex("1e-3j").unwrap(), c64::new(0.0, 1e-3));
    }

    #[test]
    fn malformed_complex_literals() {
        assert!(parse_complex("j").is_none());
        assert!(parse_complex("+j").is_none());
        assert!(parse_complex("1+j").is_none());
        assert!(parse_complex("1+2i").is_none());
        assert!(parse_complex("(1+2j)").is_none());
        assert!(parse_complex("1 +2j").is_none());
        assert!(parse_complex("--4j").is_none());
        assert!(parse_complex("abc").is_none());
    }

    #[test]
    fn real_values_only_parse_real_literals() {
        assert_eq!(f64::parse_literal("-1.25e2"), Some(-125.0));
        assert_eq!(f64::parse_literal("1+2j"), None);
        assert_eq!(f64::parse_literal("4j"), None);
    }

    #[test]
    fn kind_detection() {
        assert_eq!(detect_kind("1.0"), Some(CoeffKind::Real));
        assert_eq!(detect_kind("-3e5"), Some(CoeffKind::Real));
        assert_eq!(detect_kind("1+2j"), Some(CoeffKind::Complex));
        assert_eq!(detect_kind("4j"), Some(CoeffKind::Complex));
        assert_eq!(detect_kind("abc"), None);
        assert_eq!(detect_kind(""), None);
    }
}
