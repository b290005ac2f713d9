use nom::{Parser, error::ErrorKind};

use crate::{FieldError, IResult};

/// Trait for parsing types from a single NMEA 0183 sentence field.
///
/// The `NmeaParse` trait provides a generic interface for parsing values from the text
/// of one comma-delimited field. Implementations are provided for unsigned integers,
/// `Option<T>`, every wire enumeration and the crate's value types
/// ([`Decimal`](crate::Decimal), [`Integer`](crate::Integer), [`UtcTime`](crate::UtcTime),
/// [`LatLong`](crate::LatLong) and [`time::Date`]).
///
/// Parsers are ordinary nom parsers: they consume a prefix of the input and return the
/// rest. Use [`field`] to require that the whole field is consumed.
///
/// # Examples
///
/// ```rust
/// use nmea0183_envelope::{NmeaParse, IResult, field};
///
/// // Parsing a single integer field
/// let result: IResult<_, _> = u8::parse("42");
/// assert_eq!(result, Ok(("", 42)));
///
/// // Parsing an optional field (empty string yields None)
/// assert_eq!(field::<Option<u8>>(""), Ok(None));
/// assert_eq!(field::<Option<u8>>("07"), Ok(Some(7)));
/// ```
///
/// # Implementing for Custom Types
///
/// ```rust
/// use nmea0183_envelope::{FieldError, IResult, NmeaParse, field};
/// use nom::{Parser, character::complete::char};
///
/// #[derive(Debug, PartialEq)]
/// struct Ratio(u8, u8);
///
/// impl NmeaParse for Ratio {
///     fn parse(i: &str) -> IResult<&str, Self> {
///         let (i, a) = u8::parse(i)?;
///         let (i, _) = char('/').parse(i)?;
///         let (i, b) = u8::parse(i)?;
///
///         Ok((i, Ratio(a, b)))
///     }
/// }
///
/// assert_eq!(field::<Ratio>("3/4"), Ok(Ratio(3, 4)));
/// assert!(matches!(field::<Ratio>("3/4/5"), Err(FieldError::Malformed(_))));
/// ```
pub trait NmeaParse: Sized {
    /// Parses the input and returns the remaining input with the parsed value.
    fn parse(i: &str) -> IResult<&str, Self>;
}

macro_rules! impl_uints_type {
    ($($t:tt),*) => ($(
        impl NmeaParse for $t {
            fn parse(i: &str) -> IResult<&str, Self> {
                nom::character::complete::$t.parse(i)
            }
        }
    )*)
}

impl_uints_type!(u8, u16, u32, u64);

impl<T> NmeaParse for Option<T>
where
    T: NmeaParse,
{
    fn parse(i: &str) -> IResult<&str, Self> {
        if i.is_empty() {
            return Ok((i, None));
        }

        T::parse(i).map(|(i, value)| (i, Some(value)))
    }
}

/// Parses a complete field.
///
/// Runs `T`'s parser and fails with [`FieldError::Malformed`] if anything is left over.
/// A required value missing from an empty field is reported as [`FieldError::Missing`].
pub fn field<T: NmeaParse>(raw: &str) -> Result<T, FieldError> {
    match consumed(T::parse, ErrorKind::Eof).parse(raw) {
        Ok((_, value)) => Ok(value),
        Err(nom::Err::Error(_) | nom::Err::Failure(_)) if raw.is_empty() => {
            Err(FieldError::Missing)
        }
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(e),
        Err(nom::Err::Incomplete(_)) => Err(FieldError::Malformed(ErrorKind::Complete)),
    }
}

/// Ensures that the parser consumes all input.
///
/// # Arguments
///
/// * `f` - The parser to run
/// * `e` - Error kind to return if input is not fully consumed
pub(crate) fn consumed<'a, O, F>(mut f: F, e: ErrorKind) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: Parser<&'a str, Output = O, Error = FieldError>,
{
    move |i: &'a str| {
        let (rest, o) = f.parse(i)?;

        if !rest.is_empty() {
            return Err(nom::Err::Error(FieldError::Malformed(e)));
        }

        Ok((rest, o))
    }
}
