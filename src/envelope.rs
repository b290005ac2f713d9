//! # Envelope Codec
//!
//! Frames and unframes the `$<payload>*HH` wrapper of a sentence. The payload
//! is the header code followed by the comma-separated fields; `HH` is the XOR
//! of every payload byte written as two uppercase hexadecimal digits.

use std::fmt;

use log::trace;
use nom::{Parser, error::ErrorKind, number::complete::hex_u32};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    ChecksumMode, Error, FramingError, IResult, Registry, SentenceHeader, parse::consumed,
};

const START: u8 = b'$';
const END: u8 = b'*';
const DELIMITER: char = ',';

/// Calculates the NMEA 0183 checksum of a payload.
///
/// The checksum is the XOR of every byte between the `$` and the `*`, both
/// markers excluded.
///
/// # Examples
///
/// ```rust
/// use nmea0183_envelope::checksum;
///
/// assert_eq!(checksum("GPTXT,01,01,02,ANTSTATUS=OK"), 0x3B);
/// assert_eq!(checksum("PMTK101"), 0x32);
/// ```
pub fn checksum(payload: &str) -> u8 {
    payload
        .as_bytes()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}

/// Formats a checksum value as a two-digit uppercase hexadecimal string.
///
/// # Examples
///
/// ```rust
/// use nmea0183_envelope::format_checksum;
///
/// assert_eq!(format_checksum(0x41), "41");
/// assert_eq!(format_checksum(0x0A), "0A");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}

/// A framed but undissected sentence: header, raw fields and checksum.
///
/// The checksum is always derived from the header and fields, so an envelope
/// can never carry a checksum that does not match its content.
///
/// # Examples
///
/// ```rust
/// use nmea0183_envelope::{Envelope, Registry};
///
/// let registry = Registry::standard();
/// let envelope = Envelope::decode("$PMTK251,38400*27", &registry).unwrap();
///
/// assert_eq!(envelope.header().to_string(), "PMTK251");
/// assert_eq!(envelope.fields(), ["38400"]);
/// assert_eq!(envelope.checksum(), 0x27);
/// assert_eq!(envelope.to_string(), "$PMTK251,38400*27");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    header: SentenceHeader,
    fields: Vec<String>,
    checksum: u8,
}

impl Envelope {
    /// Builds an envelope and derives its checksum.
    pub fn new(header: SentenceHeader, fields: Vec<String>) -> Self {
        let mut envelope = Envelope {
            header,
            fields,
            checksum: 0,
        };
        envelope.checksum = checksum(&envelope.payload());
        envelope
    }

    /// Decodes one line, without line terminator.
    ///
    /// The checksum is mandatory and verified before the header code is looked
    /// up in `registry`, so a corrupted code is reported as a checksum mismatch.
    pub fn decode(line: &str, registry: &Registry) -> Result<Self, Error> {
        let (code, fields) = unframe(line, ChecksumMode::Required)?;
        let header = registry
            .lookup(code)
            .cloned()
            .ok_or_else(|| Error::UnrecognizedMessage(code.to_owned()))?;

        Ok(Envelope::new(header, fields))
    }

    /// The sentence header.
    pub fn header(&self) -> &SentenceHeader {
        &self.header
    }

    /// Raw fields, in wire order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Checksum of the payload.
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Everything between the markers: the header code, then each field after a comma.
    ///
    /// A header without fields is written alone (`PMTK101`).
    pub fn payload(&self) -> String {
        let mut payload = self.header.to_string();
        for field in &self.fields {
            payload.push(DELIMITER);
            payload.push_str(field);
        }

        payload
    }

    /// Consumes the envelope, returning its fields.
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            START as char,
            self.payload(),
            END as char,
            format_checksum(self.checksum)
        )
    }
}

/// Strips the markers, verifies the checksum and splits the payload.
///
/// Returns the header code and the raw fields. The header code is validated but
/// not looked up.
pub(crate) fn unframe(line: &str, mode: ChecksumMode) -> Result<(&str, Vec<String>), Error> {
    let bytes = line.as_bytes();
    let has_checksum = bytes.len() >= 3 && bytes[bytes.len() - 3] == END;

    let min_len = match mode {
        ChecksumMode::Optional if !has_checksum => 2,
        _ => 4,
    };
    if bytes.len() < min_len {
        return Err(FramingError::TooShort(bytes.len()).into());
    }

    if bytes[0] != START {
        let found = line.chars().next().unwrap_or_default();
        return Err(FramingError::MissingStart(found).into());
    }

    let (payload, transmitted) = if has_checksum {
        let end = bytes.len() - 3;
        let digits = &line[end + 1..];
        let (_, transmitted) = checksum_digits(digits)
            .map_err(|_| FramingError::InvalidChecksum(digits.to_owned()))?;

        (&line[1..end], Some(transmitted))
    } else if mode == ChecksumMode::Required || line.contains(END as char) {
        let found = line.chars().rev().nth(2).unwrap_or_default();
        return Err(FramingError::MissingEnd(found).into());
    } else {
        (&line[1..], None)
    };

    let computed = checksum(payload);
    if let Some(found) = transmitted
        && found != computed
    {
        return Err(Error::ChecksumMismatch {
            expected: computed,
            found,
        });
    }

    if !payload.is_ascii() {
        return Err(FramingError::NonAscii.into());
    }

    let mut tokens = payload.split(DELIMITER);
    let code = tokens.next().unwrap_or_default();
    SentenceHeader::parse(code)?;

    let fields: Vec<String> = tokens.map(str::to_owned).collect();
    trace!("framed {code} with {} fields, checksum {computed:02X}", fields.len());

    Ok((code, fields))
}

fn checksum_digits(i: &str) -> IResult<&str, u8> {
    consumed(hex_u32, ErrorKind::IsA)
        .map(|cc| cc as u8)
        .parse(i)
}
