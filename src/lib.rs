//! # NMEA 0183 Envelope Codec
//!
//! This library decodes and encodes NMEA 0183 sentences with the format:
//! `$HHH,D1,D2,...,Dn*CC\r\n`
//!
//! Decoding happens in layers:
//! - the envelope codec strips the markers, verifies the checksum and splits the fields
//! - the registry resolves the header code (`GPGGA`, `PMTK251`, ...)
//! - a typed decoder turns the fields of GGA, GLL, GSA, GSV, RMC, TXT and VTG
//!   sentences into records; every other registered sentence stays an [`Envelope`]
//!
//! Encoding goes the other way, and a decoded sentence encodes back to the exact
//! line it was read from.
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_envelope::{Nmea0183Parser, nmea_content::NmeaSentence};
//!
//! let parser = Nmea0183Parser::new();
//! let line = "$GPGGA,015540.000,3150.68378,N,11711.93139,E,1,17,0.6,0051.6,M,0.0,M,,*58";
//!
//! let sentence = parser.parse(line).unwrap();
//! if let NmeaSentence::GGA(gga) = &sentence {
//!     assert_eq!(gga.satellite_count.map(|n| n.value()), Some(17));
//! }
//! assert_eq!(sentence.encode(), line);
//! ```

mod coordinate;
mod envelope;
mod error;
pub mod lexical;
mod nmea0183;
pub mod nmea_content;
mod parse;
mod registry;

pub use coordinate::{Axis, LatLong};
pub use envelope::{Envelope, checksum, format_checksum};
pub use error::{Arity, Error, FieldError, FramingError, IResult, StructuralError};
pub use lexical::{Decimal, Integer, Precision};
pub use nmea_content::{CardinalPoint, UtcTime};
pub use nmea0183::*;
pub use parse::{NmeaParse, field};
pub use registry::{Registry, SentenceHeader, SentenceKind, Talker};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
