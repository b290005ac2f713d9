//! # Coordinate Converter
//!
//! GPS receivers write positions as degrees and decimal minutes (`ddmm.mmmm`)
//! followed by a hemisphere letter in the next field. [`LatLong`] holds the
//! signed decimal-degree value and converts back to the DM and DMS notations.

use std::str::FromStr;

use nom::{
    Parser,
    character::complete::{char, digit0, digit1, space0},
    combinator::{opt, recognize},
    error::ErrorKind,
    sequence::preceded,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    FieldError, IResult, NmeaParse, field,
    lexical::{format_scaled, format_trimmed, pad, scaled},
    nmea_content::CardinalPoint,
};

/// Which coordinate a [`LatLong`] is.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// North/south, degrees written with 2 digits
    Latitude,
    /// East/west, degrees written with 3 digits
    Longitude,
}

impl Axis {
    fn degree_digits(self) -> usize {
        match self {
            Axis::Latitude => 2,
            Axis::Longitude => 3,
        }
    }

    /// Hemisphere letters of this axis, positive first.
    pub fn hemispheres(self) -> (CardinalPoint, CardinalPoint) {
        match self {
            Axis::Latitude => (CardinalPoint::North, CardinalPoint::South),
            Axis::Longitude => (CardinalPoint::East, CardinalPoint::West),
        }
    }
}

/// A latitude or longitude in signed decimal degrees.
///
/// Parsed from the wire form `ddmm.mmmm` followed by a hemisphere letter,
/// optionally separated by whitespace. Southern and western values are negative.
/// The number of fractional minute digits is kept for re-encoding, up to
/// [`LatLong::MAX_MINUTE_DIGITS`].
///
/// ```rust
/// use nmea0183_envelope::{Axis, CardinalPoint, LatLong};
///
/// let latitude: LatLong = "3150.68378 N".parse().unwrap();
/// assert!((latitude.degrees() - 31.8447297).abs() < 1e-7);
/// assert_eq!(latitude.cardinal_point(Axis::Latitude), Some(CardinalPoint::North));
/// assert_eq!(latitude.to_wire(Axis::Latitude), ("3150.68378".to_owned(), CardinalPoint::North));
///
/// let longitude: LatLong = "07400.35838W".parse().unwrap();
/// assert_eq!(longitude.to_dms(), "74° 0' 21.503\"");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLong {
    degrees: f64,
    minute_digits: Option<u8>,
}

impl LatLong {
    /// Largest accepted magnitude, in degrees.
    pub const MAX_DEGREES: f64 = 180.0;

    /// Fractional minute digits used when a value was not parsed from the wire.
    pub const DEFAULT_MINUTE_DIGITS: u8 = 4;

    /// Most fractional minute digits a coordinate may carry.
    pub const MAX_MINUTE_DIGITS: u8 = 9;

    /// Creates a coordinate from signed decimal degrees.
    pub fn new(degrees: f64) -> Result<Self, FieldError> {
        if !(degrees.abs() <= Self::MAX_DEGREES) {
            return Err(FieldError::OutOfRange {
                value: degrees.to_string(),
                range: format!("-{0}..={0}", Self::MAX_DEGREES),
            });
        }

        Ok(LatLong {
            degrees,
            minute_digits: Some(Self::DEFAULT_MINUTE_DIGITS),
        })
    }

    /// The same coordinate written with `digits` fractional minute digits.
    ///
    /// The count is capped at [`Self::MAX_MINUTE_DIGITS`].
    pub fn with_minute_digits(self, digits: Option<u8>) -> Self {
        LatLong {
            minute_digits: digits.map(|digits| digits.min(Self::MAX_MINUTE_DIGITS)),
            ..self
        }
    }

    /// Signed decimal degrees.
    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    /// Fractional minute digits used on the wire.
    pub fn minute_digits(&self) -> Option<u8> {
        self.minute_digits
    }

    /// Hemisphere of the value on `axis`.
    ///
    /// Zero has no hemisphere and yields `None`.
    pub fn cardinal_point(&self, axis: Axis) -> Option<CardinalPoint> {
        if self.degrees == 0.0 {
            return None;
        }

        let (positive, negative) = axis.hemispheres();
        Some(if self.degrees < 0.0 { negative } else { positive })
    }

    /// Magnitude in the `ddmm.mmmm` notation, as a number.
    pub fn to_dm_value(&self) -> f64 {
        let magnitude = self.degrees.abs();
        let degrees = magnitude.floor();

        degrees * 100.0 + (magnitude - degrees) * 60.0
    }

    /// Magnitude in the `ddmm.mmmm` notation, with trailing zeros removed.
    pub fn to_dm(&self) -> String {
        format_trimmed(self.to_dm_value(), 6)
    }

    /// Magnitude as `d° m' s.sss"`.
    ///
    /// Seconds are rounded half-up to the millisecond first, so a value just
    /// below a whole minute carries into the minutes.
    pub fn to_dms(&self) -> String {
        let millis = scaled(self.degrees * 3600.0, 3);

        let (degrees, millis) = (millis / 3_600_000, millis % 3_600_000);
        let (minutes, millis) = (millis / 60_000, millis % 60_000);

        format!(
            "{}° {}' {}\"",
            degrees,
            minutes,
            format_scaled(millis, 1, Some(3))
        )
    }

    /// Wire fields: the zero-padded `ddmm.mmmm` value and its hemisphere letter.
    ///
    /// The hemisphere follows the sign bit, so a negative zero keeps `S`/`W`.
    pub fn to_wire(&self, axis: Axis) -> (String, CardinalPoint) {
        let decimals = self
            .minute_digits
            .unwrap_or(0)
            .min(Self::MAX_MINUTE_DIGITS);
        let magnitude = self.degrees.abs();

        let mut degrees = magnitude.floor() as u64;
        let mut minutes = scaled((magnitude - magnitude.floor()) * 60.0, decimals);

        let full_degree = 60 * 10u64.pow(decimals as u32);
        if minutes >= full_degree {
            degrees += 1;
            minutes -= full_degree;
        }

        let (positive, negative) = axis.hemispheres();
        let hemisphere = if self.degrees.is_sign_negative() {
            negative
        } else {
            positive
        };

        (
            format!(
                "{}{}",
                pad(degrees, axis.degree_digits()),
                format_scaled(minutes, 2, self.minute_digits.map(|_| decimals))
            ),
            hemisphere,
        )
    }
}

impl NmeaParse for LatLong {
    fn parse(i: &str) -> IResult<&str, Self> {
        let result: IResult<&str, _> =
            (recognize((digit1, opt(preceded(char('.'), digit0)))), space0).parse(i);
        let (rest, (dm, _)) = result?;
        let (rest, hemisphere) = CardinalPoint::parse(rest)?;

        let minute_digits = match dm.split_once('.') {
            Some((_, fraction)) if fraction.len() > Self::MAX_MINUTE_DIGITS as usize => {
                return Err(nom::Err::Error(FieldError::Malformed(ErrorKind::TooLarge)));
            }
            Some((_, fraction)) => Some(fraction.len() as u8),
            None => None,
        };
        let dm = dm
            .parse::<f64>()
            .map_err(|_| nom::Err::Error(FieldError::Malformed(ErrorKind::Float)))?;

        let degrees = (dm / 100.0).floor();
        let minutes = dm - degrees * 100.0;
        let mut value = degrees + minutes / 60.0;

        if matches!(hemisphere, CardinalPoint::South | CardinalPoint::West) {
            value = -value;
        }

        let coordinate = LatLong::new(value).map_err(nom::Err::Error)?;
        Ok((rest, coordinate.with_minute_digits(minute_digits)))
    }
}

impl FromStr for LatLong {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        field(s)
    }
}
