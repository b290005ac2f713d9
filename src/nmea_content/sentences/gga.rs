#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Arity, Axis, Decimal, Error, Integer, LatLong, SentenceKind,
    lexical::display_or_empty,
    nmea_content::{
        Fields, QualityIndicator, TypedSentence, UtcTime,
        parse::{format_coordinate, format_padded},
    },
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
///
/// Fields 10 and 12 must hold the unit `M`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GGA {
    /// Fix time in UTC
    pub fix_time: Option<UtcTime>,
    /// Latitude
    pub latitude: Option<LatLong>,
    /// Longitude
    pub longitude: Option<LatLong>,
    /// GPS Quality Indicator
    pub fix_quality: QualityIndicator,
    /// Number of satellites in use
    pub satellite_count: Option<Integer<u8>>,
    /// Horizontal Dilution of Precision
    pub hdop: Option<Decimal>,
    /// Altitude above/below mean sea level (geoid) in meters
    pub altitude: Option<Decimal>,
    /// Geoidal separation in meters, the difference between the WGS-84 earth ellipsoid and mean sea level (geoid),
    /// negative values indicate that the geoid is below the ellipsoid
    pub geoidal_separation: Option<Decimal>,
    /// Age of Differential GPS data in seconds, null field when DGPS is not used
    pub dgps_age: Option<Decimal>,
    /// Differential reference station ID
    pub dgps_station_id: Option<String>,
}

impl TypedSentence for GGA {
    const KIND: SentenceKind = SentenceKind::Gga;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, Error> {
        fields.expect(Arity::Exactly(14))?;
        fields.literal(9, "M")?;
        fields.literal(11, "M")?;

        Ok(GGA {
            fix_time: fields.parse(0)?,
            latitude: fields.coordinate(1, Axis::Latitude)?,
            longitude: fields.coordinate(3, Axis::Longitude)?,
            fix_quality: fields.parse(5)?,
            satellite_count: fields.parse(6)?,
            hdop: fields.parse(7)?,
            altitude: fields.parse(8)?,
            geoidal_separation: fields.parse(10)?,
            dgps_age: fields.parse(12)?,
            dgps_station_id: Some(fields.get(13))
                .filter(|id| !id.is_empty())
                .map(str::to_owned),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        let [latitude, north_south] = format_coordinate(self.latitude, Axis::Latitude);
        let [longitude, east_west] = format_coordinate(self.longitude, Axis::Longitude);

        vec![
            display_or_empty(&self.fix_time),
            latitude,
            north_south,
            longitude,
            east_west,
            self.fix_quality.code().to_owned(),
            format_padded(self.satellite_count, 2),
            display_or_empty(&self.hdop),
            display_or_empty(&self.altitude),
            "M".to_owned(),
            display_or_empty(&self.geoidal_separation),
            "M".to_owned(),
            display_or_empty(&self.dgps_age),
            self.dgps_station_id.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Envelope, Registry, StructuralError};

    fn envelope(line: &str) -> Envelope {
        Envelope::decode(line, &Registry::standard()).unwrap()
    }

    #[test]
    fn test_gga_decoding() {
        let line = "$GPGGA,015540.000,3150.68378,N,11711.93139,E,1,17,0.6,0051.6,M,0.0,M,,*58";
        let gga = GGA::decode(&envelope(line)).unwrap();

        assert_eq!(
            gga.fix_time.map(|t| t.time()),
            Some(time::macros::time!(01:55:40))
        );
        let latitude = gga.latitude.unwrap().degrees();
        let longitude = gga.longitude.unwrap().degrees();
        assert!((latitude - 31.8447297).abs() < 1e-7, "{latitude}");
        assert!((longitude - 117.1988565).abs() < 1e-7, "{longitude}");
        assert_eq!(gga.fix_quality, QualityIndicator::GnssFix);
        assert_eq!(gga.satellite_count, Some(Integer::new(17, 2)));
        assert_eq!(gga.hdop.map(|v| v.value()), Some(0.6));
        assert_eq!(gga.altitude.map(|v| v.value()), Some(51.6));
        assert_eq!(gga.geoidal_separation.map(|v| v.value()), Some(0.0));
        assert_eq!(gga.dgps_age, None);
        assert_eq!(gga.dgps_station_id, None);

        assert_eq!(gga.encode().to_string(), line);
    }

    #[test]
    fn test_gga_round_trip() {
        let payloads = [
            "GPGGA,,,,,,0,00,,,M,,M,,",
            "GPGGA,001043.00,4404.14036,N,12118.85961,W,1,12,0.98,1113.0,M,-21.3,M,,",
            "GPGGA,092725.00,4717.113,S,00833.915,E,2,08,1.0,499.7,M,48.0,M,1.5,0136",
        ];

        for payload in payloads {
            let line = format!(
                "${payload}*{}",
                crate::format_checksum(crate::checksum(payload))
            );
            let gga = GGA::decode(&envelope(&line)).unwrap();
            assert_eq!(gga.encode().to_string(), line);
        }
    }

    #[test]
    fn test_gga_unpadded_satellite_count() {
        let line = "$GPGGA,015540.000,3150.68378,N,11711.93139,E,1,8,0.6,0051.6,M,0.0,M,,*66";
        let gga = GGA::decode(&envelope(line)).unwrap();

        assert_eq!(gga.satellite_count, Some(Integer::new(8, 1)));
        assert_eq!(gga.encode().to_string(), line);

        let gga = GGA {
            satellite_count: Some(Integer::from(8)),
            ..gga
        };
        assert!(gga.encode().to_string().contains(",1,08,0.6,"));
    }

    #[test]
    fn test_gga_field_count() {
        for line in [
            "$GPGGA,015540.000,3150.68378,N,11711.93139,E,1,17,0.6,0051.6,M,0.0,M,*74",
            "$GPGGA,015540.000,3150.68378,N,11711.93139,E,1,17,0.6,0051.6,M,0.0,M,,,*74",
        ] {
            let envelope = envelope(line);
            let found = envelope.fields().len();

            match GGA::decode(&envelope) {
                Err(Error::Structural { sentence, cause, .. }) => {
                    assert_eq!(sentence, "GPGGA");
                    assert_eq!(
                        cause,
                        StructuralError::FieldCount {
                            expected: Arity::Exactly(14),
                            found,
                        }
                    );
                    assert!(cause.to_string().contains("14"));
                    assert!(cause.to_string().contains(&found.to_string()));
                }
                other => panic!("unexpected result {other:?}"),
            }
        }
    }

    #[test]
    fn test_gga_fixed_units() {
        let fields: Vec<String> =
            "015540.000,3150.68378,N,11711.93139,E,1,17,0.6,0051.6,F,0.0,M,,"
                .split(',')
                .map(str::to_owned)
                .collect();

        assert!(matches!(
            GGA::from_fields(&Fields::new(SentenceKind::Gga, &fields)),
            Err(Error::Structural {
                cause: StructuralError::FixedField { field: 10, .. },
                ..
            })
        ));
    }

    #[test]
    fn test_gga_invalid_fields() {
        let cases = [
            ("123519,4807.038,N,01131.000,X,1,08,0.9,545.4,M,46.9,M,,", 5),
            ("123519,4807.038,N,01131.000,E,9,08,0.9,545.4,M,46.9,M,,", 6),
            ("123519,4807.038,N,01131.000,E,1,A8,0.9,545.4,M,46.9,M,,", 7),
            ("123519,4807.038,,01131.000,E,1,08,0.9,545.4,M,46.9,M,,", 3),
            ("123519,4807.038,E,01131.000,E,1,08,0.9,545.4,M,46.9,M,,", 3),
            ("1235,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,", 1),
        ];

        for (input, expected) in cases {
            let fields: Vec<String> = input.split(',').map(str::to_owned).collect();

            match GGA::from_fields(&Fields::new(SentenceKind::Gga, &fields)) {
                Err(Error::InvalidField {
                    sentence,
                    fields: raw,
                    field,
                    ..
                }) => {
                    assert_eq!(sentence, "GPGGA");
                    assert_eq!(raw, fields);
                    assert_eq!(field, expected, "{input}");
                }
                other => panic!("{input}: unexpected result {other:?}"),
            }
        }
    }

    #[test]
    fn test_gga_unexpected_sentence() {
        let envelope = envelope("$GPTXT,01,01,02,ANTSTATUS=OK*3B");
        assert_eq!(
            GGA::decode(&envelope),
            Err(Error::UnexpectedSentence {
                expected: "GPGGA".to_owned(),
                found: "GPTXT".to_owned(),
            })
        );
    }
}
