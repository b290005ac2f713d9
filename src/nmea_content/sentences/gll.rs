#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Arity, Axis, Error, LatLong, SentenceKind,
    lexical::display_or_empty,
    nmea_content::{
        DataValid, Fields, PositioningMode, TypedSentence, UtcTime, parse::format_coordinate,
    },
};

/// GLL - Geographic Position - Latitude/Longitude
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gll_geographic_position_latitudelongitude>
///
/// ```text
///         1       2 3        4 5         6 7
///         |       | |        | |         | |
///  $--GLL,ddmm.mm,a,dddmm.mm,a,hhmmss.ss,a,m*hh<CR><LF>
/// ```
///
/// An empty status field reads as [`DataValid::Invalid`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GLL {
    /// Latitude
    pub latitude: Option<LatLong>,
    /// Longitude
    pub longitude: Option<LatLong>,
    /// Fix time in UTC
    pub fix_time: Option<UtcTime>,
    /// Status Mode Indicator
    pub status: DataValid,
    /// Positioning system mode
    pub positioning_mode: PositioningMode,
}

impl TypedSentence for GLL {
    const KIND: SentenceKind = SentenceKind::Gll;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, Error> {
        fields.expect(Arity::Exactly(7))?;

        Ok(GLL {
            latitude: fields.coordinate(0, Axis::Latitude)?,
            longitude: fields.coordinate(2, Axis::Longitude)?,
            fix_time: fields.parse(4)?,
            status: fields
                .parse::<Option<DataValid>>(5)?
                .unwrap_or(DataValid::Invalid),
            positioning_mode: fields.parse(6)?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        let [latitude, north_south] = format_coordinate(self.latitude, Axis::Latitude);
        let [longitude, east_west] = format_coordinate(self.longitude, Axis::Longitude);

        vec![
            latitude,
            north_south,
            longitude,
            east_west,
            display_or_empty(&self.fix_time),
            self.status.code().to_owned(),
            self.positioning_mode.code().to_owned(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Envelope, Registry, checksum, format_checksum};

    fn decode(line: &str) -> Result<GLL, Error> {
        GLL::decode(&Envelope::decode(line, &Registry::standard())?)
    }

    fn line(payload: &str) -> String {
        format!("${payload}*{}", format_checksum(checksum(payload)))
    }

    #[test]
    fn test_gll_decoding() {
        let line = "$GPGLL,3110.2908,N,12123.2348,E,041139.000,A,A*59";
        let gll = decode(line).unwrap();

        let latitude = gll.latitude.unwrap().degrees();
        let longitude = gll.longitude.unwrap().degrees();
        assert!((latitude - 31.17151333).abs() < 1e-7, "{latitude}");
        assert!((longitude - 121.38724667).abs() < 1e-7, "{longitude}");
        assert_eq!(
            gll.fix_time.map(|t| t.time()),
            Some(time::macros::time!(04:11:39))
        );
        assert_eq!(gll.status, DataValid::Valid);
        assert_eq!(gll.positioning_mode, PositioningMode::Autonomous);

        assert_eq!(gll.encode().to_string(), line);
    }

    #[test]
    fn test_gll_status() {
        let gll = decode(&line("GPGLL,,,,,,,N")).unwrap();
        assert_eq!(gll.latitude, None);
        assert_eq!(gll.fix_time, None);
        assert_eq!(gll.status, DataValid::Invalid);
        assert_eq!(gll.encode().to_string(), line("GPGLL,,,,,,V,N"));

        let gll = decode(&line("GPGLL,4916.45,N,12311.12,W,225444,V,N")).unwrap();
        assert_eq!(gll.status, DataValid::Invalid);

        assert!(matches!(
            decode(&line("GPGLL,4916.45,N,12311.12,W,225444,X,N")),
            Err(Error::InvalidField { field: 6, .. })
        ));
    }

    #[test]
    fn test_gll_round_trip() {
        for payload in [
            "GPGLL,4916.45,N,12311.12,W,225444,A,D",
            "GPGLL,0000.00,S,00000.00,W,000000.00,V,N",
        ] {
            let line = line(payload);
            assert_eq!(decode(&line).unwrap().encode().to_string(), line);
        }
    }
}
