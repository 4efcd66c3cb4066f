//! printf-style floating point formatting.
//!
//! Numeric scalars in a document are rendered with a [`FloatFormat`], the
//! equivalent of a C `%.<n>g`, `%.<n>f` or `%.<n>e` conversion. The output
//! matches the C library for finite values; non-finite values use the YAML
//! spellings `.nan`, `.inf` and `-.inf`.

use std::fmt;

use crate::DocumentError;

/// Conversion style of a [`FloatFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// `%g`: shortest of fixed and exponent form, trailing zeros removed.
    #[default]
    General,
    /// `%f`: fixed number of digits after the decimal point.
    Fixed,
    /// `%e`: one leading digit and an exponent.
    Exponent,
}

impl Notation {
    fn conversion(self) -> char {
        match self {
            Notation::General => 'g',
            Notation::Fixed => 'f',
            Notation::Exponent => 'e',
        }
    }
}

/// A printf-style float format.
///
/// For [`Notation::General`] the precision is the number of significant
/// digits; for the other notations it is the number of digits after the
/// decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatFormat {
    notation: Notation,
    precision: usize,
}

impl FloatFormat {
    /// Default number of significant digits (`%.7g`).
    pub const DEFAULT_PRECISION: usize = 7;

    /// Creates a format with the given notation and precision.
    pub const fn new(notation: Notation, precision: usize) -> Self {
        Self {
            notation,
            precision,
        }
    }

    /// `%.<n>g`
    pub const fn general(precision: usize) -> Self {
        Self::new(Notation::General, precision)
    }

    /// `%.<n>f`
    pub const fn fixed(precision: usize) -> Self {
        Self::new(Notation::Fixed, precision)
    }

    /// `%.<n>e`
    pub const fn exponent(precision: usize) -> Self {
        Self::new(Notation::Exponent, precision)
    }

    /// Parses a printf conversion such as `%.7g`, `%g` or `%.3f`.
    ///
    /// A missing precision means 6, as in C. Flags and field widths are not
    /// supported.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let invalid = || DocumentError::InvalidFloatFormat(text.to_owned());

        let spec = text.strip_prefix('%').ok_or_else(invalid)?;
        let mut chars = spec.chars();
        let conversion = chars.next_back().ok_or_else(invalid)?;
        let notation = match conversion {
            'g' | 'G' => Notation::General,
            'f' | 'F' => Notation::Fixed,
            'e' | 'E' => Notation::Exponent,
            _ => return Err(invalid()),
        };

        let precision = match chars.as_str() {
            "" => 6,
            rest => {
                let digits = rest.strip_prefix('.').ok_or_else(invalid)?;
                if digits.is_empty() {
                    0
                } else if digits.bytes().all(|b| b.is_ascii_digit()) {
                    digits.parse().map_err(|_| invalid())?
                } else {
                    return Err(invalid());
                }
            }
        };

        Ok(Self::new(notation, precision))
    }

    /// Get the notation.
    pub fn notation(&self) -> Notation {
        self.notation
    }

    /// Get the precision.
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// The printf conversion string, e.g. `%.7g`.
    pub fn to_printf(&self) -> String {
        format!("%.{}{}", self.precision, self.notation.conversion())
    }

    /// Formats a value.
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return ".nan".to_owned();
        }
        if value.is_infinite() {
            return if value > 0.0 { ".inf" } else { "-.inf" }.to_owned();
        }

        match self.notation {
            Notation::Fixed => format!("{:.*}", self.precision, value),
            Notation::Exponent => {
                let (mantissa, exp) = split_exponent(format!("{:.*e}", self.precision, value));
                c_exponent(&mantissa, exp)
            }
            Notation::General => {
                // C treats a precision of 0 as 1 for %g.
                let digits = self.precision.max(1);
                let (mantissa, exp) = split_exponent(format!("{:.*e}", digits - 1, value));
                if exp < -4 || exp >= digits as i32 {
                    c_exponent(trim_fraction_zeros(&mantissa), exp)
                } else {
                    let decimals = (digits as i32 - 1 - exp) as usize;
                    trim_fraction_zeros(&format!("{value:.decimals$}")).to_owned()
                }
            }
        }
    }
}

impl Default for FloatFormat {
    fn default() -> Self {
        Self::general(Self::DEFAULT_PRECISION)
    }
}

impl fmt::Display for FloatFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%.{}{}", self.precision, self.notation.conversion())
    }
}

/// Split Rust's `{:e}` output (`1.5e-7`) into mantissa and exponent.
fn split_exponent(text: String) -> (String, i32) {
    match text.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_owned(), exp.parse().unwrap_or(0)),
        None => (text, 0),
    }
}

/// C exponent suffix: explicit sign, at least two digits.
fn c_exponent(mantissa: &str, exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

fn trim_fraction_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g7(value: f64) -> String {
        FloatFormat::general(7).format(value)
    }

    #[test]
    fn general_matches_c() {
        assert_eq!(g7(0.0), "0");
        assert_eq!(g7(1.0), "1");
        assert_eq!(g7(0.1), "0.1");
        assert_eq!(g7(0.5), "0.5");
        assert_eq!(g7(90.0), "90");
        assert_eq!(g7(-2.25), "-2.25");
        assert_eq!(g7(1e-5), "1e-05");
        assert_eq!(g7(0.0001), "0.0001");
        assert_eq!(g7(123456789.0), "1.234568e+08");
        assert_eq!(g7(1234567.0), "1234567");
        assert_eq!(g7(12345678.0), "1.234568e+07");
        assert_eq!(g7(1.0 / 3.0), "0.3333333");
        assert_eq!(g7(-0.0), "-0");
    }

    #[test]
    fn general_rounding_can_bump_exponent() {
        assert_eq!(g7(9.99999999), "10");
        assert_eq!(g7(9999999.9), "1e+07");
    }

    #[test]
    fn general_with_f32_input() {
        assert_eq!(g7(f64::from(0.1f32)), "0.1");
        assert_eq!(g7(f64::from(0.8f32)), "0.8");
    }

    #[test]
    fn general_low_precision() {
        assert_eq!(FloatFormat::general(3).format(1.23456), "1.23");
        assert_eq!(FloatFormat::general(0).format(3.7), "4");
        assert_eq!(FloatFormat::general(1).format(0.26), "0.3");
    }

    #[test]
    fn fixed_and_exponent() {
        assert_eq!(FloatFormat::fixed(3).format(1.5), "1.500");
        assert_eq!(FloatFormat::fixed(0).format(2.4), "2");
        assert_eq!(FloatFormat::exponent(2).format(1234.5), "1.23e+03");
        assert_eq!(FloatFormat::exponent(1).format(0.00015), "1.5e-04");
    }

    #[test]
    fn non_finite() {
        assert_eq!(g7(f64::NAN), ".nan");
        assert_eq!(g7(f64::INFINITY), ".inf");
        assert_eq!(g7(f64::NEG_INFINITY), "-.inf");
    }

    #[test]
    fn parse_printf() {
        assert_eq!(FloatFormat::parse("%.7g").unwrap(), FloatFormat::general(7));
        assert_eq!(FloatFormat::parse("%.12G").unwrap(), FloatFormat::general(12));
        assert_eq!(FloatFormat::parse("%g").unwrap(), FloatFormat::general(6));
        assert_eq!(FloatFormat::parse("%.3f").unwrap(), FloatFormat::fixed(3));
        assert_eq!(FloatFormat::parse("%.e").unwrap(), FloatFormat::exponent(0));
    }

    #[test]
    fn parse_rejects_garbage() {
        for text in ["", "%", ".7g", "%.7d", "%7g", "%.x7g", "%.7"] {
            assert!(
                matches!(
                    FloatFormat::parse(text),
                    Err(DocumentError::InvalidFloatFormat(_))
                ),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn printf_round_trip() {
        let format = FloatFormat::general(9);
        assert_eq!(format.to_printf(), "%.9g");
        assert_eq!(format.to_string(), "%.9g");
        assert_eq!(FloatFormat::parse(&format.to_printf()).unwrap(), format);
        assert_eq!(FloatFormat::default().to_printf(), "%.7g");
    }
}
