//! # Lexical Primitives
//!
//! Numeric padding and rounding helpers shared by every encoder, and the
//! field values that remember how they were written on the wire so that they
//! can be written back byte for byte: [`Decimal`] for floating-point fields
//! and [`Integer`] for counters and identifiers.

use std::fmt;

use nom::{
    Parser,
    character::complete::{char, digit0, digit1},
    combinator::opt,
    error::ErrorKind,
    sequence::preceded,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FieldError, IResult, NmeaParse, parse::consumed};

/// Threshold used by every encoder: a fraction of one half or more rounds up.
pub const HALF_UP: f64 = 0.5;

/// Most digits a numeric field may carry.
///
/// Longer fields are rejected when decoding: beyond this count an `f64` no
/// longer holds every digit and the value could not be written back.
pub const MAX_DIGITS: usize = 15;

fn round_scaled(digit: f64, threshold: f64) -> f64 {
    if digit - digit.floor() >= threshold {
        digit.ceil()
    } else {
        digit.floor()
    }
}

/// Rounds `value` to `decimals` fractional digits.
///
/// The discarded fraction is compared against `threshold`: at or above it the
/// value is rounded up (towards positive infinity), below it the value is
/// rounded down.
///
/// ```rust
/// use nmea0183_envelope::lexical::round;
///
/// assert_eq!(round(1.25, 1, 0.5), 1.3);
/// assert_eq!(round(1.24, 1, 0.5), 1.2);
/// assert_eq!(round(1.21, 1, 0.1), 1.3);
/// ```
pub fn round(value: f64, decimals: u8, threshold: f64) -> f64 {
    let pow = 10f64.powi(decimals as i32);

    round_scaled(value * pow, threshold) / pow
}

/// Scales the magnitude of `value` by `10^decimals` and rounds it half-up to an integer.
///
/// Magnitudes beyond `u64` saturate.
pub(crate) fn scaled(value: f64, decimals: u8) -> u64 {
    round_scaled(value.abs() * 10f64.powi(decimals as i32), HALF_UP) as u64
}

/// Zero-pads an integer to at least `width` digits.
///
/// ```rust
/// use nmea0183_envelope::lexical::pad;
///
/// assert_eq!(pad(7u8, 2), "07");
/// assert_eq!(pad(59u16, 3), "059");
/// assert_eq!(pad(1234u16, 2), "1234");
/// ```
pub fn pad<T: Into<u64>>(value: T, width: usize) -> String {
    format!("{:0width$}", value.into())
}

/// Formats a scaled magnitude (`n / 10^fraction_digits`) with its integer part
/// zero-padded to `integer_digits`.
///
/// A zero integer part padded to zero digits is omitted entirely (`.5`).
/// More than 19 fraction digits leave the integer part at zero.
pub(crate) fn format_scaled(n: u64, integer_digits: u8, fraction_digits: Option<u8>) -> String {
    let decimals = fraction_digits.unwrap_or(0);
    let (integer, fraction) = match 10u64.checked_pow(decimals as u32) {
        Some(pow) => (n / pow, n % pow),
        None => (0, n),
    };

    let mut out = if integer == 0 && integer_digits == 0 {
        String::new()
    } else {
        pad(integer, integer_digits as usize)
    };

    if let Some(decimals) = fraction_digits {
        out.push('.');
        if decimals > 0 {
            out.push_str(&pad(fraction, decimals as usize));
        }
    }

    out
}

/// Formats `value` with `decimals` fractional digits, then drops trailing
/// zeros (and a trailing decimal point).
///
/// ```rust
/// use nmea0183_envelope::lexical::format_trimmed;
///
/// assert_eq!(format_trimmed(3150.683780, 6), "3150.68378");
/// assert_eq!(format_trimmed(12.0, 6), "12");
/// ```
pub fn format_trimmed(value: f64, decimals: u8) -> String {
    let text = format!("{:.*}", decimals as usize, value);

    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text
    }
}

/// Renders an optional field value, empty when absent.
pub fn display_or_empty<T: fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(T::to_string).unwrap_or_default()
}

/// How a numeric value was laid out on the wire.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    /// Minimum number of integer digits (leading zeros are added up to this count)
    pub integer_digits: u8,
    /// Number of fractional digits, `None` when the value had no decimal point
    pub fraction_digits: Option<u8>,
}

/// A decimal field value together with its wire [`Precision`].
///
/// Parsing `"0051.6"` yields `51.6` with four integer digits and one fractional
/// digit; displaying it writes `"0051.6"` again. Fields with a leading `+` or
/// with more than [`MAX_DIGITS`] digits are rejected.
///
/// ```rust
/// use nmea0183_envelope::{Decimal, field};
///
/// let altitude: Decimal = field("0051.6").unwrap();
/// assert_eq!(altitude.value(), 51.6);
/// assert_eq!(altitude.to_string(), "0051.6");
///
/// assert_eq!(Decimal::from(0.6).to_string(), "0.6");
/// assert_eq!(Decimal::new(1.0, 3, Some(1)).to_string(), "001.0");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decimal {
    value: f64,
    precision: Precision,
}

impl Decimal {
    /// Creates a value written with `integer_digits` and `fraction_digits`.
    ///
    /// Fraction digits are capped at [`MAX_DIGITS`].
    pub fn new(value: f64, integer_digits: u8, fraction_digits: Option<u8>) -> Self {
        Decimal {
            value,
            precision: Precision {
                integer_digits,
                fraction_digits: fraction_digits.map(|digits| digits.min(MAX_DIGITS as u8)),
            },
        }
    }

    /// The numeric value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The wire layout.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// The same value with its sign flipped, keeping the layout.
    pub fn negated(self) -> Self {
        Decimal {
            value: -self.value,
            ..self
        }
    }

    /// The magnitude of the value, keeping the layout.
    pub fn abs(self) -> Self {
        Decimal {
            value: self.value.abs(),
            ..self
        }
    }
}

impl From<f64> for Decimal {
    /// Uses the shortest representation of `value`.
    fn from(value: f64) -> Self {
        let text = value.abs().to_string();
        let (integer, fraction) = match text.split_once('.') {
            Some((integer, fraction)) => (integer, Some(digit_count(fraction))),
            None => (text.as_str(), None),
        };

        Decimal::new(value, digit_count(integer), fraction)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_sign_negative() {
            f.write_str("-")?;
        }

        let decimals = self.precision.fraction_digits.unwrap_or(0);
        f.write_str(&format_scaled(
            scaled(self.value, decimals),
            self.precision.integer_digits,
            self.precision.fraction_digits,
        ))
    }
}

impl NmeaParse for Decimal {
    fn parse(i: &str) -> IResult<&str, Self> {
        let result: IResult<&str, _> =
            (opt(char('-')), digit0, opt(preceded(char('.'), digit0))).parse(i);
        let (rest, (_, integer, fraction)) = result?;

        if integer.is_empty() && fraction.is_none_or(str::is_empty) {
            return Err(nom::Err::Error(FieldError::Malformed(ErrorKind::Digit)));
        }
        if integer.len() + fraction.map_or(0, str::len) > MAX_DIGITS {
            return Err(nom::Err::Error(FieldError::Malformed(ErrorKind::TooLarge)));
        }

        let text = &i[..i.len() - rest.len()];
        let value = text
            .parse::<f64>()
            .map_err(|_| nom::Err::Error(FieldError::Malformed(ErrorKind::Float)))?;

        Ok((
            rest,
            Decimal::new(
                value,
                integer.len() as u8,
                fraction.map(|fraction| fraction.len() as u8),
            ),
        ))
    }
}

fn digit_count(digits: &str) -> u8 {
    u8::try_from(digits.len()).unwrap_or(u8::MAX)
}

/// An integer field value together with the number of digits it was written with.
///
/// Values parsed from the wire keep their width, so `"8"` and `"08"` are
/// written back unchanged. Values built with [`From`] carry no width and are
/// written with the conventional width of the field they are placed in.
///
/// ```rust
/// use nmea0183_envelope::{Integer, field};
///
/// let count: Integer<u8> = field("8").unwrap();
/// assert_eq!(count.value(), 8);
/// assert_eq!(count.to_padded(2), "8");
///
/// assert_eq!(Integer::from(8u8).to_padded(2), "08");
/// assert_eq!(Integer::new(60u16, 3).to_string(), "060");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integer<T> {
    value: T,
    digits: Option<u8>,
}

impl<T: Copy> Integer<T> {
    /// Creates a value written with `digits` digits.
    pub fn new(value: T, digits: u8) -> Self {
        Integer {
            value,
            digits: Some(digits),
        }
    }

    /// The numeric value.
    pub fn value(&self) -> T {
        self.value
    }

    /// The wire width, `None` when the value was not parsed from the wire.
    pub fn digits(&self) -> Option<u8> {
        self.digits
    }
}

impl<T: Copy + Into<u64>> Integer<T> {
    /// Writes the value with its own width, or `width` when it has none.
    pub fn to_padded(&self, width: usize) -> String {
        pad(self.value, self.digits.map_or(width, usize::from))
    }
}

impl<T> From<T> for Integer<T> {
    fn from(value: T) -> Self {
        Integer {
            value,
            digits: None,
        }
    }
}

impl<T: Copy + Into<u64>> fmt::Display for Integer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_padded(0))
    }
}

impl<T: NmeaParse> NmeaParse for Integer<T> {
    fn parse(i: &str) -> IResult<&str, Self> {
        let result: IResult<&str, &str> = digit1(i);
        let (rest, digits) = result?;

        if digits.len() > MAX_DIGITS {
            return Err(nom::Err::Error(FieldError::Malformed(ErrorKind::TooLarge)));
        }

        let (_, value) = consumed(T::parse, ErrorKind::Digit).parse(digits)?;

        Ok((
            rest,
            Integer {
                value,
                digits: Some(digits.len() as u8),
            },
        ))
    }
}
