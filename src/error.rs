//! # Error Types
//!
//! This module defines the error types used throughout the NMEA codec.
//!
//! Errors are layered the same way a sentence is: framing problems come first,
//! then checksum verification, then the registry lookup, and finally the
//! per-sentence dissection (field count, fixed literals, individual fields).

use std::fmt;

use nom::error::{ErrorKind, FromExternalError, ParseError};

/// Holds the result of field-level parsing functions.
///
/// The `Ok` side is a pair containing the remainder of the input (the part of the data that
/// was not parsed) and the produced value. The `Err` side contains an instance of `nom::Err`
/// wrapping a [`FieldError`].
pub type IResult<I, O> = nom::IResult<I, O, FieldError>;

/// Represents all possible errors that can occur while decoding an NMEA sentence.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The sentence wrapper (`$...*hh`) is missing or misplaced.
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// The checksum of the sentence was corrupt or incorrect.
    ///
    /// Contains both the expected checksum (calculated from the payload)
    /// and the checksum transmitted with the sentence.
    #[error("checksum mismatch: computed {expected:02X}, transmitted {found:02X}")]
    ChecksumMismatch {
        /// The checksum calculated from the payload
        expected: u8,
        /// The checksum found in the sentence
        found: u8,
    },

    /// The sentence code is not present in the registry.
    #[error("unrecognized sentence type {0:?}")]
    UnrecognizedMessage(String),

    /// The sentence does not have the shape its grammar requires.
    #[error("{sentence}: {cause} (fields: {fields:?})")]
    Structural {
        /// Sentence code, e.g. `GPGGA`
        sentence: String,
        /// Every raw field of the offending sentence
        fields: Vec<String>,
        /// What was wrong with the shape
        cause: StructuralError,
    },

    /// A single field of the sentence could not be decoded.
    #[error("{sentence}: field {field} ({value:?}) {cause} (fields: {fields:?})")]
    InvalidField {
        /// Sentence code, e.g. `GPGGA`
        sentence: String,
        /// Every raw field of the offending sentence
        fields: Vec<String>,
        /// 1-based field number, as in the NMEA field diagrams
        field: usize,
        /// Raw text of the field
        value: String,
        /// Why the field was rejected
        #[source]
        cause: FieldError,
    },

    /// A typed decoder was given the envelope of another sentence.
    #[error("expected a {expected} sentence, found {found}")]
    UnexpectedSentence {
        /// Code the decoder handles
        expected: String,
        /// Code of the envelope it was given
        found: String,
    },
}

/// Problems with the `$...*hh` wrapper around a sentence.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FramingError {
    /// The line cannot hold a start marker, an end marker and two checksum digits.
    #[error("line too short ({0} bytes)")]
    TooShort(usize),

    /// The first character is not `$`.
    #[error("sentence should start with '$' (got {0:?})")]
    MissingStart(char),

    /// The third character from the end is not `*`.
    #[error("sentence should end with '*hh' (got {0:?} where '*' was expected)")]
    MissingEnd(char),

    /// The two characters after `*` are not a hexadecimal byte.
    #[error("invalid checksum digits {0:?}")]
    InvalidChecksum(String),

    /// The header code is empty or contains something other than ASCII letters and digits.
    #[error("invalid sentence header {0:?}")]
    InvalidHeader(String),

    /// The payload contains non-ASCII characters.
    #[error("payload contains non-ASCII characters")]
    NonAscii,

    /// A CRLF line ending was required but absent.
    #[error("missing CRLF line ending")]
    MissingLineEnding,

    /// A line ending was present although forbidden.
    #[error("unexpected line ending")]
    UnexpectedLineEnding,
}

/// Shape violations detected before any field is parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StructuralError {
    /// The sentence carries the wrong number of fields.
    #[error("has {found} fields, expected {expected}")]
    FieldCount {
        /// Accepted field count
        expected: Arity,
        /// Actual field count
        found: usize,
    },

    /// A field whose content is fixed by the grammar holds something else.
    #[error("fixed field {field} should be {expected:?} (got {found:?})")]
    FixedField {
        /// 1-based field number
        field: usize,
        /// The literal the grammar requires
        expected: &'static str,
        /// What was actually there
        found: String,
    },
}

/// The field counts a sentence grammar accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` fields.
    Exactly(usize),
    /// `n` fields or more.
    AtLeast(usize),
    /// `fixed` leading fields followed by up to `max_groups` groups of `group` fields.
    Groups {
        /// Leading fields
        fixed: usize,
        /// Fields per repeated group
        group: usize,
        /// Maximum number of groups
        max_groups: usize,
    },
}

impl Arity {
    /// Whether `count` fields satisfy this arity.
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Groups {
                fixed,
                group,
                max_groups,
            } => {
                count >= fixed
                    && (count - fixed) % group == 0
                    && (count - fixed) / group <= max_groups
            }
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
            Arity::Groups {
                fixed,
                group,
                max_groups,
            } => write!(f, "{fixed} + {group}*k with k <= {max_groups}"),
        }
    }
}

/// Why a single field was rejected.
///
/// This is also the error type of every field parser, so it implements nom's
/// [`ParseError`]: lexical failures become [`FieldError::Malformed`] while
/// semantic checks (ranges, codes, calendar validity) use the dedicated variants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// The text does not match the field's lexical grammar.
    #[error("is malformed ({0:?})")]
    Malformed(ErrorKind),

    /// The field is empty but a value is required.
    #[error("is required")]
    Missing,

    /// The value is not one of the codes the field allows.
    #[error("holds an unknown code {0:?}")]
    UnknownCode(String),

    /// The value is outside the range the field allows.
    #[error("value {value} is outside {range}")]
    OutOfRange {
        /// Parsed value
        value: String,
        /// Accepted range
        range: String,
    },

    /// `hhmmss` does not name a valid time of day.
    #[error("is not a valid time of day")]
    InvalidTime,

    /// `ddmmyy` does not name a valid calendar date.
    #[error("is not a valid date")]
    InvalidDate,
}

impl<I> ParseError<I> for FieldError {
    fn from_error_kind(_: I, kind: ErrorKind) -> Self {
        FieldError::Malformed(kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I, EX> FromExternalError<I, EX> for FieldError {
    fn from_external_error(_: I, kind: ErrorKind, _: EX) -> Self {
        FieldError::Malformed(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        assert!(Arity::Exactly(14).accepts(14));
        assert!(!Arity::Exactly(14).accepts(13));
        assert!(Arity::AtLeast(4).accepts(6));
        assert!(!Arity::AtLeast(4).accepts(3));

        let gsv = Arity::Groups {
            fixed: 3,
            group: 4,
            max_groups: 4,
        };
        for count in [3, 7, 11, 15, 19] {
            assert!(gsv.accepts(count), "{count}");
        }
        for count in [0, 2, 4, 8, 18, 23] {
            assert!(!gsv.accepts(count), "{count}");
        }
    }

    #[test]
    fn test_field_count_message() {
        let error = StructuralError::FieldCount {
            expected: Arity::Exactly(14),
            found: 13,
        };
        assert_eq!(error.to_string(), "has 13 fields, expected 14");
    }
}
