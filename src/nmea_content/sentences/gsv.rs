#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Arity, Error, FieldError, Integer, SentenceKind,
    nmea_content::{Fields, Satellite, TypedSentence, parse::format_padded},
};

const FIXED_FIELDS: usize = 3;
const SATELLITE_FIELDS: usize = 4;
const MAX_SATELLITES: usize = 4;

/// GSV - Satellites in View
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsv_satellites_in_view>
///
/// ```text
///         1 2 3 4 5 6 7     n
///         | | | | | | |     |
///  $--GSV,x,x,x,x,x,x,x,...,x*hh<CR><LF>
/// ```
///
/// Fields 4 to 7 describe one satellite (ID, elevation, azimuth, SNR); a
/// sentence carries up to four such groups.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GSV {
    /// Total number of GSV sentences to be transmitted in this group
    pub total_messages: Integer<u8>,
    /// Sentence number of this GSV message within current group
    pub message_number: Integer<u8>,
    /// Total number of satellites in view
    pub satellites_in_view: Integer<u8>,
    /// Satellite information
    pub satellites: heapless::Vec<Satellite, MAX_SATELLITES>,
}

fn satellite(fields: &Fields<'_>, index: usize) -> Result<Satellite, Error> {
    Ok(Satellite {
        prn: fields.parse(index)?,
        elevation: fields.bounded(index + 1, 0..=90)?,
        azimuth: fields.bounded(index + 2, 0..=359)?,
        snr: fields.bounded(index + 3, 0..=99)?,
    })
}

impl TypedSentence for GSV {
    const KIND: SentenceKind = SentenceKind::Gsv;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, Error> {
        fields.expect(Arity::Groups {
            fixed: FIXED_FIELDS,
            group: SATELLITE_FIELDS,
            max_groups: MAX_SATELLITES,
        })?;

        let total_messages: Integer<u8> = fields.parse(0)?;
        fields.in_range(0, total_messages.value(), 1..=3)?;
        let message_number: Integer<u8> = fields.parse(1)?;
        fields.in_range(1, message_number.value(), 1..=3)?;
        let satellites_in_view = fields.parse(2)?;

        let mut satellites = heapless::Vec::new();
        for index in (FIXED_FIELDS..fields.len()).step_by(SATELLITE_FIELDS) {
            satellites
                .push(satellite(fields, index)?)
                .map_err(|_| {
                    fields.error(
                        index,
                        FieldError::OutOfRange {
                            value: fields.len().to_string(),
                            range: format!("..={}", FIXED_FIELDS + SATELLITE_FIELDS * MAX_SATELLITES),
                        },
                    )
                })?;
        }

        Ok(GSV {
            total_messages,
            message_number,
            satellites_in_view,
            satellites,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.total_messages.to_padded(1),
            self.message_number.to_padded(1),
            self.satellites_in_view.to_padded(2),
        ];

        for satellite in &self.satellites {
            fields.push(satellite.prn.to_padded(2));
            fields.push(format_padded(satellite.elevation, 2));
            fields.push(format_padded(satellite.azimuth, 3));
            fields.push(format_padded(satellite.snr, 2));
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Envelope, Registry, StructuralError, checksum, format_checksum};

    fn decode(line: &str) -> Result<GSV, Error> {
        GSV::decode(&Envelope::decode(line, &Registry::standard())?)
    }

    fn line(payload: &str) -> String {
        format!("${payload}*{}", format_checksum(checksum(payload)))
    }

    #[test]
    fn test_gsv_decoding() {
        let line = "$GPGSV,3,1,12,01,05,060,18,02,17,259,43,04,56,287,28,09,08,277,28*77";
        let gsv = decode(line).unwrap();

        assert_eq!(gsv.total_messages.value(), 3);
        assert_eq!(gsv.message_number.value(), 1);
        assert_eq!(gsv.satellites_in_view.value(), 12);
        assert_eq!(
            gsv.satellites.iter().map(|s| s.prn.value()).collect::<Vec<_>>(),
            vec![1, 2, 4, 9]
        );
        assert!(gsv.satellites.iter().all(|s| s.snr.is_some()));
        assert_eq!(
            gsv.satellites[0],
            Satellite {
                prn: Integer::new(1, 2),
                elevation: Some(Integer::new(5, 2)),
                azimuth: Some(Integer::new(60, 3)),
                snr: Some(Integer::new(18, 2)),
            }
        );

        assert_eq!(gsv.encode().to_string(), line);
    }

    #[test]
    fn test_gsv_untracked_satellite() {
        let line = "$GPGSV,3,2,12,10,34,195,46,13,08,125,45,17,67,014,,20,32,048,24*74";
        let gsv = decode(line).unwrap();

        assert_eq!(gsv.satellites[2].prn.value(), 17);
        assert_eq!(gsv.satellites[2].azimuth.map(|a| a.value()), Some(14));
        assert_eq!(gsv.satellites[2].snr, None);
        assert_eq!(gsv.encode().to_string(), line);
    }

    #[test]
    fn test_gsv_partial_groups() {
        for payload in ["GPGSV,1,1,00", "GPGSV,2,2,05,32,06,037,", "GPGSV,1,1,01,07,,,"] {
            let line = line(payload);
            let gsv = decode(&line).unwrap();
            assert_eq!(gsv.encode().to_string(), line);
        }
    }

    #[test]
    fn test_gsv_unpadded_integers() {
        for payload in [
            "GPGSV,1,1,4,1,5,60,18,2,17,259,43,4,56,287,28,9,8,277,28",
            "GPGSV,01,01,004,001,05,0060,018",
        ] {
            let line = line(payload);
            let gsv = decode(&line).unwrap();
            assert_eq!(gsv.encode().to_string(), line);
        }
    }

    #[test]
    fn test_gsv_encoding() {
        let mut satellites = heapless::Vec::new();
        satellites
            .push(Satellite {
                prn: Integer::from(7),
                elevation: Some(Integer::from(5)),
                azimuth: Some(Integer::from(60)),
                snr: None,
            })
            .unwrap();
        let gsv = GSV {
            total_messages: Integer::from(1),
            message_number: Integer::from(1),
            satellites_in_view: Integer::from(1),
            satellites,
        };

        assert_eq!(gsv.encode().to_string(), line("GPGSV,1,1,01,07,05,060,"));
    }

    #[test]
    fn test_gsv_group_length() {
        for payload in [
            "GPGSV,3,3,12,23,13,094",
            "GPGSV,3,3,12,23,13,094,48,24",
            "GPGSV,3,1",
            "GPGSV,3,1,12,01,05,060,18,02,17,259,43,04,56,287,28,09,08,277,28,10,34,195,46",
        ] {
            assert!(
                matches!(
                    decode(&line(payload)),
                    Err(Error::Structural {
                        cause: StructuralError::FieldCount { .. },
                        ..
                    })
                ),
                "{payload}"
            );
        }
    }

    #[test]
    fn test_gsv_ranges() {
        let cases = [
            ("GPGSV,4,1,12,01,05,060,18", 1),
            ("GPGSV,0,1,12,01,05,060,18", 1),
            ("GPGSV,3,4,12,01,05,060,18", 2),
            ("GPGSV,3,1,12,01,91,060,18", 5),
            ("GPGSV,3,1,12,01,05,360,18", 6),
            ("GPGSV,3,1,12,01,05,060,100", 7),
            ("GPGSV,3,1,12,,05,060,18", 4),
        ];

        for (payload, expected) in cases {
            match decode(&line(payload)) {
                Err(Error::InvalidField { field, .. }) => assert_eq!(field, expected, "{payload}"),
                other => panic!("{payload}: unexpected result {other:?}"),
            }
        }
    }
}
