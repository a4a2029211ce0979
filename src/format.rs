//! Text rendering of a [`Pwm`] for copy-paste

use crate::pwm::Pwm;
use crate::types::Base;

/// Formats one matrix cell.
///
/// Finite values use the shortest decimal that round-trips, keeping a trailing `.0` on
/// integral values (`100.0`, `75.0`, `33.33333333333333` for 1 of 3 sequences). Very small
/// or large values switch to scientific notation with a signed, two-digit exponent
/// (`1e-05`). Anything else prints as `NA`.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return "NA".to_string();
    }

    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

/// Renders the matrix as one line per base in [`Base::ROW_ORDER`].
///
/// Each line is the base letter, ` [`, then every value wrapped in tabs, then `]`:
///
/// ```text
/// A [	100.0		0.0	]
/// ```
pub fn format_pwm(pwm: &Pwm) -> String {
    let mut text = String::new();
    for base in Base::ROW_ORDER {
        text.push_str(&format!("{} [", base));
        for value in pwm.row(base).iter() {
            text.push_str(&format!("\t{}\t", format_value(*value)));
        }
        text.push_str("]\n");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(100.0), "100.0");
        assert_eq!(format_value(0.0), "0.0");
        assert_eq!(format_value(1.0 / 3.0 * 100.0), "33.33333333333333");
        assert_eq!(format_value(f64::NAN), "NA");
        assert_eq!(format_value(-f64::INFINITY), "NA");
        assert_eq!(format_value(f64::INFINITY), "NA");
    }

    #[test]
    fn test_format_value_exponent() {
        assert_eq!(format_value(0.0001), "0.0001");
        assert_eq!(format_value(1.0 / 100_000.0), "1e-05");
        assert_eq!(format_value(1.5e-7), "1.5e-07");
        assert_eq!(format_value(1e-100), "1e-100");
        assert_eq!(format_value(1e16), "1e+16");
        assert_eq!(format_value(1e15), "1000000000000000.0");
    }
}
