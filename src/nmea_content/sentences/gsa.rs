#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Arity, Decimal, Error, Integer, SentenceKind,
    lexical::display_or_empty,
    nmea_content::{FixStatus, Fields, Mode, TypedSentence, parse::format_padded},
};

/// Number of satellite channels reported by a GSA sentence.
pub const GSA_CHANNELS: usize = 12;

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///         1 2 3                        14 15  16  17
///         | | |                         |  |   |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x*hh<CR><LF>
/// ```
///
/// Fields 3 to 14 hold the satellite used on channels 1 to 12, empty when the
/// channel is unused.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GSA {
    /// Selection mode
    pub mode: Mode,
    /// Fix status
    pub fix_status: FixStatus,
    /// Satellite ID per channel, channel 1 first
    pub satellites: [Option<Integer<u8>>; GSA_CHANNELS],
    /// Position Dilution of Precision
    pub pdop: Option<Decimal>,
    /// Horizontal Dilution of Precision
    pub hdop: Option<Decimal>,
    /// Vertical Dilution of Precision
    pub vdop: Option<Decimal>,
}

impl GSA {
    /// Satellite used on `channel` (1 to 12).
    pub fn satellite_on_channel(&self, channel: usize) -> Option<u8> {
        let index = channel.checked_sub(1)?;
        self.satellites
            .get(index)
            .copied()
            .flatten()
            .map(|satellite| satellite.value())
    }

    /// IDs of the satellites used in the fix, in channel order.
    pub fn active_satellites(&self) -> impl Iterator<Item = u8> + '_ {
        self.satellites.iter().flatten().map(Integer::value)
    }
}

impl TypedSentence for GSA {
    const KIND: SentenceKind = SentenceKind::Gsa;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, Error> {
        fields.expect(Arity::Exactly(17))?;

        let mut satellites = [None; GSA_CHANNELS];
        for (channel, satellite) in satellites.iter_mut().enumerate() {
            *satellite = fields.parse(2 + channel)?;
        }

        Ok(GSA {
            mode: fields.parse(0)?,
            fix_status: fields.parse(1)?,
            satellites,
            pdop: fields.parse(14)?,
            hdop: fields.parse(15)?,
            vdop: fields.parse(16)?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(17);
        fields.push(self.mode.code().to_owned());
        fields.push(self.fix_status.code().to_owned());
        fields.extend(
            self.satellites
                .iter()
                .map(|satellite| format_padded(*satellite, 2)),
        );
        fields.push(display_or_empty(&self.pdop));
        fields.push(display_or_empty(&self.hdop));
        fields.push(display_or_empty(&self.vdop));

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Envelope, Registry, StructuralError, checksum, format_checksum};

    fn decode(line: &str) -> Result<GSA, Error> {
        GSA::decode(&Envelope::decode(line, &Registry::standard())?)
    }

    #[test]
    fn test_gsa_decoding() {
        let line = "$GPGSA,A,3,14,06,16,31,23,,,,,,,,1.66,1.42,0.84*0F";
        let gsa = decode(line).unwrap();

        assert_eq!(gsa.mode, Mode::Automatic);
        assert_eq!(gsa.fix_status, FixStatus::Fix3D);
        assert_eq!(gsa.satellite_on_channel(1), Some(14));
        assert_eq!(gsa.satellite_on_channel(2), Some(6));
        assert_eq!(gsa.satellite_on_channel(5), Some(23));
        assert_eq!(gsa.satellite_on_channel(6), None);
        assert_eq!(gsa.satellite_on_channel(0), None);
        assert_eq!(gsa.satellite_on_channel(13), None);
        assert_eq!(
            gsa.active_satellites().collect::<Vec<_>>(),
            vec![14, 6, 16, 31, 23]
        );
        assert_eq!(gsa.pdop.map(|v| v.value()), Some(1.66));
        assert_eq!(gsa.hdop.map(|v| v.value()), Some(1.42));
        assert_eq!(gsa.vdop.map(|v| v.value()), Some(0.84));

        assert_eq!(gsa.encode().to_string(), line);
    }

    #[test]
    fn test_gsa_sparse_channels() {
        let payload = "GPGSA,M,2,,04,,,,,,,,,,32,,,";
        let line = format!("${payload}*{}", format_checksum(checksum(payload)));
        let gsa = decode(&line).unwrap();

        assert_eq!(gsa.mode, Mode::Manual);
        assert_eq!(gsa.fix_status, FixStatus::Fix2D);
        assert_eq!(gsa.satellite_on_channel(1), None);
        assert_eq!(gsa.satellite_on_channel(2), Some(4));
        assert_eq!(gsa.satellite_on_channel(12), Some(32));
        assert_eq!(gsa.pdop, None);

        assert_eq!(gsa.encode().to_string(), line);
    }

    #[test]
    fn test_gsa_unpadded_channels() {
        let payload = "GPGSA,A,3,4,6,016,,,,,,,,,,1.66,1.42,0.84";
        let line = format!("${payload}*{}", format_checksum(checksum(payload)));
        let gsa = decode(&line).unwrap();

        assert_eq!(gsa.active_satellites().collect::<Vec<_>>(), vec![4, 6, 16]);
        assert_eq!(gsa.encode().to_string(), line);
    }

    #[test]
    fn test_gsa_errors() {
        let short = "GPGSA,A,3,14,06,16,31,23,,,,,,,1.66,1.42,0.84";
        let line = format!("${short}*{}", format_checksum(checksum(short)));
        assert!(matches!(
            decode(&line),
            Err(Error::Structural {
                cause: StructuralError::FieldCount { found: 16, .. },
                ..
            })
        ));

        let invalid = "GPGSA,A,4,14,06,16,31,23,,,,,,,,1.66,1.42,0.84";
        let line = format!("${invalid}*{}", format_checksum(checksum(invalid)));
        assert!(matches!(
            decode(&line),
            Err(Error::InvalidField { field: 2, .. })
        ));

        let prn = "GPGSA,A,3,14,x6,16,31,23,,,,,,,,1.66,1.42,0.84";
        let line = format!("${prn}*{}", format_checksum(checksum(prn)));
        assert!(matches!(
            decode(&line),
            Err(Error::InvalidField { field: 4, .. })
        ));
    }
}
