//! # Typed NMEA sentences
//!
//! Decoders and encoders for the GPS sentences this crate understands, plus
//! [`NmeaSentence`], the tagged union the dispatcher returns.
//!
//! Every record is a projection of an [`Envelope`]'s raw fields: decoding
//! checks the field count and any fixed literals, then parses each field with
//! its [`NmeaParse`] implementation. Encoding produces an envelope whose wire
//! form is byte-identical to the one the record was decoded from.

pub(crate) mod parse;
mod sentences;

pub use parse::UtcTime;
pub use sentences::*;

use std::{fmt, ops::RangeInclusive};

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Arity, Axis, Envelope, Error, FieldError, Integer, LatLong, NmeaParse, SentenceKind,
    StructuralError, field,
};

/// The raw fields of one sentence, with error reporting tied to their position.
///
/// Indexes are 0-based; errors report them 1-based, matching the NMEA field
/// diagrams.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    kind: SentenceKind,
    raw: &'a [String],
}

impl<'a> Fields<'a> {
    /// Wraps the fields of a `kind` sentence.
    pub fn new(kind: SentenceKind, raw: &'a [String]) -> Self {
        Fields { kind, raw }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether there are no fields at all.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Raw text of field `index`, empty when out of bounds.
    pub fn get(&self, index: usize) -> &'a str {
        self.raw.get(index).map(String::as_str).unwrap_or_default()
    }

    /// Raw text of every field from `index` on.
    pub fn rest(&self, index: usize) -> &'a [String] {
        self.raw.get(index..).unwrap_or_default()
    }

    /// Fails unless the field count satisfies `arity`.
    pub fn expect(&self, arity: Arity) -> Result<(), Error> {
        if arity.accepts(self.raw.len()) {
            return Ok(());
        }

        Err(self.structural(StructuralError::FieldCount {
            expected: arity,
            found: self.raw.len(),
        }))
    }

    /// Fails unless field `index` holds exactly `expected`.
    pub fn literal(&self, index: usize, expected: &'static str) -> Result<(), Error> {
        let found = self.get(index);
        if found == expected {
            return Ok(());
        }

        Err(self.structural(StructuralError::FixedField {
            field: index + 1,
            expected,
            found: found.to_owned(),
        }))
    }

    /// Parses field `index` as a `T`.
    pub fn parse<T: NmeaParse>(&self, index: usize) -> Result<T, Error> {
        field(self.get(index)).map_err(|cause| self.error(index, cause))
    }

    /// Fails unless `value`, read from field `index`, lies within `range`.
    pub fn in_range<T>(&self, index: usize, value: T, range: RangeInclusive<T>) -> Result<T, Error>
    where
        T: PartialOrd + fmt::Display,
    {
        if range.contains(&value) {
            return Ok(value);
        }

        Err(self.error(
            index,
            FieldError::OutOfRange {
                value: value.to_string(),
                range: format!("{}..={}", range.start(), range.end()),
            },
        ))
    }

    /// Parses an optional integer field `index` and checks its value against `range`.
    pub fn bounded<T>(
        &self,
        index: usize,
        range: RangeInclusive<T>,
    ) -> Result<Option<Integer<T>>, Error>
    where
        T: NmeaParse + Copy + PartialOrd + fmt::Display,
    {
        self.parse::<Option<Integer<T>>>(index)?
            .map(|integer| {
                self.in_range(index, integer.value(), range)
                    .map(|_| integer)
            })
            .transpose()
    }

    /// Parses the coordinate held by field `index` and the hemisphere letter after it.
    ///
    /// Both fields empty means the coordinate is absent. The hemisphere must
    /// belong to `axis`.
    pub fn coordinate(&self, index: usize, axis: Axis) -> Result<Option<LatLong>, Error> {
        let (value, hemisphere) = (self.get(index), self.get(index + 1));

        match (value.is_empty(), hemisphere.is_empty()) {
            (true, true) => return Ok(None),
            (true, false) => return Err(self.error(index, FieldError::Missing)),
            (false, true) => return Err(self.error(index + 1, FieldError::Missing)),
            (false, false) => {}
        }

        let (positive, negative) = axis.hemispheres();
        let point: CardinalPoint = self.parse(index + 1)?;
        if point != positive && point != negative {
            return Err(self.error(
                index + 1,
                FieldError::UnknownCode(hemisphere.to_owned()),
            ));
        }

        format!("{value}{hemisphere}")
            .parse::<LatLong>()
            .map(Some)
            .map_err(|cause| self.error(index, cause))
    }

    /// A field error for field `index`, annotated with the whole sentence.
    pub fn error(&self, index: usize, cause: FieldError) -> Error {
        Error::InvalidField {
            sentence: self.kind.code().to_owned(),
            fields: self.raw.to_vec(),
            field: index + 1,
            value: self.get(index).to_owned(),
            cause,
        }
    }

    fn structural(&self, cause: StructuralError) -> Error {
        Error::Structural {
            sentence: self.kind.code().to_owned(),
            fields: self.raw.to_vec(),
            cause,
        }
    }
}

/// A sentence with a typed record.
///
/// Implementors describe how to read their record from the raw fields and how
/// to write it back; framing, header checks and logging are provided.
pub trait TypedSentence: Sized {
    /// The sentence this record is decoded from.
    const KIND: SentenceKind;

    /// Reads the record from the raw fields of a [`Self::KIND`] sentence.
    fn from_fields(fields: &Fields<'_>) -> Result<Self, Error>;

    /// Writes the record back as raw fields.
    fn to_fields(&self) -> Vec<String>;

    /// Decodes the record from an envelope carrying a [`Self::KIND`] sentence.
    fn decode(envelope: &Envelope) -> Result<Self, Error> {
        if SentenceKind::from_header(envelope.header()) != Some(Self::KIND) {
            return Err(Error::UnexpectedSentence {
                expected: Self::KIND.code().to_owned(),
                found: envelope.header().to_string(),
            });
        }

        let record = Self::from_fields(&Fields::new(Self::KIND, envelope.fields()))?;
        trace!("decoded {}", Self::KIND);

        Ok(record)
    }

    /// Encodes the record into an envelope with a derived checksum.
    fn encode(&self) -> Envelope {
        Envelope::new(Self::KIND.header(), self.to_fields())
    }
}

/// Every sentence the dispatcher can return.
///
/// Sentences with a typed decoder are returned as their record; every other
/// well-framed sentence is returned as its [`Envelope`].
///
/// ```rust
/// use nmea0183_envelope::{Envelope, Registry, nmea_content::NmeaSentence};
///
/// let registry = Registry::standard();
/// let line = "$GPGSA,A,3,14,06,16,31,23,,,,,,,,1.66,1.42,0.84*0F";
///
/// let sentence = NmeaSentence::decode(Envelope::decode(line, &registry).unwrap()).unwrap();
/// match &sentence {
///     NmeaSentence::GSA(gsa) => assert_eq!(gsa.satellite_on_channel(2), Some(6)),
///     _ => unreachable!(),
/// }
/// assert_eq!(sentence.encode(), line);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum NmeaSentence {
    /// Global Positioning System Fix Data
    GGA(GGA),
    /// Geographic Position - Latitude/Longitude
    GLL(GLL),
    /// GPS DOP and active satellites
    GSA(GSA),
    /// Satellites in View
    GSV(GSV),
    /// Recommended Minimum Navigation Information
    RMC(RMC),
    /// Text transmission
    TXT(TXT),
    /// Track made good and Ground speed
    VTG(VTG),
    /// Well-framed sentence without a typed decoder
    Untyped(Envelope),
}

impl NmeaSentence {
    /// Decodes the typed record carried by `envelope`, or keeps the envelope
    /// when its sentence has no decoder.
    pub fn decode(envelope: Envelope) -> Result<Self, Error> {
        let Some(kind) = SentenceKind::from_header(envelope.header()) else {
            debug!(
                "no decoder for {}, keeping the envelope",
                envelope.header()
            );
            return Ok(NmeaSentence::Untyped(envelope));
        };

        match kind {
            SentenceKind::Gga => GGA::decode(&envelope).map(NmeaSentence::GGA),
            SentenceKind::Gll => GLL::decode(&envelope).map(NmeaSentence::GLL),
            SentenceKind::Gsa => GSA::decode(&envelope).map(NmeaSentence::GSA),
            SentenceKind::Gsv => GSV::decode(&envelope).map(NmeaSentence::GSV),
            SentenceKind::Rmc => RMC::decode(&envelope).map(NmeaSentence::RMC),
            SentenceKind::Txt => TXT::decode(&envelope).map(NmeaSentence::TXT),
            SentenceKind::Vtg => VTG::decode(&envelope).map(NmeaSentence::VTG),
        }
    }

    /// The typed sentence kind, `None` for [`NmeaSentence::Untyped`].
    pub fn kind(&self) -> Option<SentenceKind> {
        match self {
            NmeaSentence::GGA(_) => Some(GGA::KIND),
            NmeaSentence::GLL(_) => Some(GLL::KIND),
            NmeaSentence::GSA(_) => Some(GSA::KIND),
            NmeaSentence::GSV(_) => Some(GSV::KIND),
            NmeaSentence::RMC(_) => Some(RMC::KIND),
            NmeaSentence::TXT(_) => Some(TXT::KIND),
            NmeaSentence::VTG(_) => Some(VTG::KIND),
            NmeaSentence::Untyped(_) => None,
        }
    }

    /// Re-encodes the sentence into an envelope.
    pub fn to_envelope(&self) -> Envelope {
        match self {
            NmeaSentence::GGA(gga) => gga.encode(),
            NmeaSentence::GLL(gll) => gll.encode(),
            NmeaSentence::GSA(gsa) => gsa.encode(),
            NmeaSentence::GSV(gsv) => gsv.encode(),
            NmeaSentence::RMC(rmc) => rmc.encode(),
            NmeaSentence::TXT(txt) => txt.encode(),
            NmeaSentence::VTG(vtg) => vtg.encode(),
            NmeaSentence::Untyped(envelope) => envelope.clone(),
        }
    }

    /// Writes the sentence in wire form, `$...*HH` without line terminator.
    pub fn encode(&self) -> String {
        self.to_envelope().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|field| field.to_string()).collect()
    }

    #[test]
    fn test_fields_expect() {
        let raw = raw(&["1", "2", "3"]);
        let fields = Fields::new(SentenceKind::Gga, &raw);

        assert_eq!(fields.expect(Arity::Exactly(3)), Ok(()));
        assert_eq!(
            fields.expect(Arity::Exactly(14)),
            Err(Error::Structural {
                sentence: "GPGGA".to_owned(),
                fields: raw.clone(),
                cause: StructuralError::FieldCount {
                    expected: Arity::Exactly(14),
                    found: 3,
                },
            })
        );
    }

    #[test]
    fn test_fields_literal() {
        let raw = raw(&["0.0", "T", "", "X"]);
        let fields = Fields::new(SentenceKind::Vtg, &raw);

        assert_eq!(fields.literal(1, "T"), Ok(()));
        assert_eq!(
            fields.literal(3, "M"),
            Err(Error::Structural {
                sentence: "GPVTG".to_owned(),
                fields: raw.clone(),
                cause: StructuralError::FixedField {
                    field: 4,
                    expected: "M",
                    found: "X".to_owned(),
                },
            })
        );
    }

    #[test]
    fn test_fields_parse() {
        let raw = raw(&["17", "", "x"]);
        let fields = Fields::new(SentenceKind::Gga, &raw);

        assert_eq!(fields.parse::<u8>(0), Ok(17));
        assert_eq!(fields.parse::<Option<u8>>(1), Ok(None));
        assert_eq!(fields.parse::<Option<u8>>(7), Ok(None));

        match fields.parse::<u8>(2) {
            Err(Error::InvalidField { field, value, .. }) => {
                assert_eq!(field, 3);
                assert_eq!(value, "x");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_fields_bounded() {
        let raw = raw(&["90", "91", ""]);
        let fields = Fields::new(SentenceKind::Gsv, &raw);

        assert_eq!(fields.bounded::<u8>(0, 0..=90), Ok(Some(Integer::new(90, 2))));
        assert_eq!(fields.bounded::<u8>(2, 0..=90), Ok(None));
        assert!(matches!(
            fields.bounded::<u8>(1, 0..=90),
            Err(Error::InvalidField {
                field: 2,
                cause: FieldError::OutOfRange { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_fields_coordinate() {
        let raw = raw(&["3150.68378", "N", "", "", "11711.93139", "", "4916.45", "E"]);
        let fields = Fields::new(SentenceKind::Gga, &raw);

        let latitude = fields.coordinate(0, Axis::Latitude).unwrap().unwrap();
        assert!((latitude.degrees() - 31.8447297).abs() < 1e-7);

        assert_eq!(fields.coordinate(2, Axis::Longitude), Ok(None));
        assert!(matches!(
            fields.coordinate(4, Axis::Longitude),
            Err(Error::InvalidField {
                field: 6,
                cause: FieldError::Missing,
                ..
            })
        ));
        assert!(matches!(
            fields.coordinate(6, Axis::Latitude),
            Err(Error::InvalidField {
                field: 8,
                cause: FieldError::UnknownCode(_),
                ..
            })
        ));
    }
}
