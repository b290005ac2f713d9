use std::fmt;

use nom::{
    Parser,
    bytes::complete::take_while_m_n,
    character::complete::{char, digit0},
    combinator::{map_res, opt},
    sequence::preceded,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Axis, FieldError, IResult, Integer, LatLong, NmeaParse, lexical::pad};

const NANOS_DIGITS: usize = 9;

fn two_digits(i: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_digit()), str::parse::<u8>).parse(i)
}

/// A UTC time of day as written on the wire (`hhmmss` or `hhmmss.sss`).
///
/// The number of fractional-second digits is kept so the time can be written
/// back exactly as it was received.
///
/// ```rust
/// use nmea0183_envelope::{UtcTime, field};
///
/// let fix_time: UtcTime = field("015540.000").unwrap();
/// assert_eq!(fix_time.time(), time::macros::time!(01:55:40));
/// assert_eq!(fix_time.to_string(), "015540.000");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcTime {
    time: time::Time,
    fraction_digits: Option<u8>,
}

impl UtcTime {
    /// Wraps `time`, written with `fraction_digits` fractional-second digits (at most 9).
    pub fn new(time: time::Time, fraction_digits: Option<u8>) -> Self {
        UtcTime {
            time,
            fraction_digits: fraction_digits.map(|digits| digits.min(NANOS_DIGITS as u8)),
        }
    }

    /// The time of day.
    pub fn time(&self) -> time::Time {
        self.time
    }

    /// Fractional-second digits used on the wire.
    pub fn fraction_digits(&self) -> Option<u8> {
        self.fraction_digits
    }
}

impl From<time::Time> for UtcTime {
    fn from(time: time::Time) -> Self {
        UtcTime::new(time, Some(3))
    }
}

impl fmt::Display for UtcTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, minute, second, nanos) = self.time.as_hms_nano();
        write!(
            f,
            "{}{}{}",
            pad(hour, 2),
            pad(minute, 2),
            pad(second, 2)
        )?;

        if let Some(digits) = self.fraction_digits {
            let nanos = pad(nanos, NANOS_DIGITS);
            write!(f, ".{}", &nanos[..digits as usize])?;
        }

        Ok(())
    }
}

impl NmeaParse for UtcTime {
    fn parse(i: &str) -> IResult<&str, Self> {
        let (i, (hour, minute, second, fraction)) = (
            two_digits,
            two_digits,
            two_digits,
            opt(preceded(char('.'), digit0)),
        )
            .parse(i)?;

        let nanos = match fraction {
            Some(fraction) if fraction.len() > NANOS_DIGITS => {
                return Err(nom::Err::Error(FieldError::Malformed(
                    nom::error::ErrorKind::TooLarge,
                )));
            }
            Some(fraction) => format!("{fraction:0<width$}", width = NANOS_DIGITS)
                .parse::<u32>()
                .map_err(|_| nom::Err::Error(FieldError::InvalidTime))?,
            None => 0,
        };

        let time = time::Time::from_hms_nano(hour, minute, second, nanos)
            .map_err(|_| nom::Err::Error(FieldError::InvalidTime))?;

        Ok((
            i,
            UtcTime::new(time, fraction.map(|fraction| fraction.len() as u8)),
        ))
    }
}

/// Parses `ddmmyy`.
///
/// Two-digit years from 83 to 99 belong to the 20th century, every other year
/// to the 21st.
impl NmeaParse for time::Date {
    fn parse(i: &str) -> IResult<&str, Self> {
        let (i, (day, month, year)) = (two_digits, two_digits, two_digits).parse(i)?;

        let month = time::Month::try_from(month)
            .map_err(|_| nom::Err::Error(FieldError::InvalidDate))?;

        let year = match year {
            83..=99 => 1900 + year as i32,
            _ => 2000 + year as i32,
        };

        let date = time::Date::from_calendar_date(year, month, day)
            .map_err(|_| nom::Err::Error(FieldError::InvalidDate))?;

        Ok((i, date))
    }
}

/// Writes a date as `ddmmyy`.
pub(crate) fn format_date(date: time::Date) -> String {
    format!(
        "{}{}{}",
        pad(date.day(), 2),
        pad(u8::from(date.month()), 2),
        pad(date.year().rem_euclid(100) as u8, 2)
    )
}

/// Writes an optional integer with its wire width, or zero-padded to `width`
/// when it has none. Empty when absent.
pub(crate) fn format_padded<T: Copy + Into<u64>>(value: Option<Integer<T>>, width: usize) -> String {
    value.map(|value| value.to_padded(width)).unwrap_or_default()
}

/// Writes an optional coordinate as its value and hemisphere fields.
pub(crate) fn format_coordinate(coordinate: Option<LatLong>, axis: Axis) -> [String; 2] {
    match coordinate {
        Some(coordinate) => {
            let (value, hemisphere) = coordinate.to_wire(axis);
            [value, hemisphere.code().to_owned()]
        }
        None => [String::new(), String::new()],
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, time};

    use super::*;
    use crate::field;

    #[test]
    fn test_utc_time() {
        let cases = [
            ("015540.000", time!(01:55:40), Some(3)),
            ("225446", time!(22:54:46), None),
            ("123456.78", time!(12:34:56.78), Some(2)),
            ("000000.", time!(00:00:00), Some(0)),
        ];

        for (input, expected, digits) in cases {
            let parsed: UtcTime = field(input).unwrap();
            assert_eq!(parsed.time(), expected, "{input}");
            assert_eq!(parsed.fraction_digits(), digits, "{input}");
            assert_eq!(parsed.to_string(), input);
        }
    }

    #[test]
    fn test_utc_time_rejects() {
        assert_eq!(field::<UtcTime>("250000"), Err(FieldError::InvalidTime));
        assert_eq!(field::<UtcTime>("126100"), Err(FieldError::InvalidTime));
        assert!(matches!(field::<UtcTime>("12345"), Err(FieldError::Malformed(_))));
        assert!(matches!(field::<UtcTime>("1234a6"), Err(FieldError::Malformed(_))));
        assert!(matches!(field::<UtcTime>("123456.1x"), Err(FieldError::Malformed(_))));
        assert_eq!(field::<UtcTime>(""), Err(FieldError::Missing));
    }

    #[test]
    fn test_date() {
        assert_eq!(field::<time::Date>("220413"), Ok(date!(2013 - 04 - 22)));
        assert_eq!(field::<time::Date>("191194"), Ok(date!(1994 - 11 - 19)));
        assert_eq!(field::<time::Date>("010100"), Ok(date!(2000 - 01 - 01)));
        assert_eq!(field::<time::Date>("320413"), Err(FieldError::InvalidDate));
        assert_eq!(field::<time::Date>("011313"), Err(FieldError::InvalidDate));
        assert!(field::<time::Date>("2204133").is_err());

        assert_eq!(format_date(date!(2013 - 04 - 22)), "220413");
        assert_eq!(format_date(date!(1994 - 11 - 19)), "191194");
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_padded(Some(Integer::from(6u8)), 2), "06");
        assert_eq!(format_padded(Some(Integer::new(6u8, 1)), 2), "6");
        assert_eq!(format_padded(None::<Integer<u16>>, 3), "");

        let latitude: LatLong = "0000.00 S".parse().unwrap();
        assert_eq!(
            format_coordinate(Some(latitude), Axis::Latitude),
            ["0000.00".to_owned(), "S".to_owned()]
        );
        assert_eq!(
            format_coordinate(None, Axis::Longitude),
            [String::new(), String::new()]
        );
    }
}
