//! Property tests for the envelope codec and the coordinate converter.

use nmea0183_envelope::{Axis, CardinalPoint, Error, LatLong, Nmea0183Parser};
use proptest::prelude::*;

const SAMPLES: [&str; 6] = [
    "$GPGGA,015540.000,3150.68378,N,11711.93139,E,1,17,0.6,0051.6,M,0.0,M,,*58",
    "$GPGSV,3,2,12,10,34,195,46,13,08,125,45,17,67,014,,20,32,048,24*74",
    "$GPRMC,013732.000,A,3150.7238,N,11711.7278,E,0.00,0.00,220413,,,A*68",
    "$GPTXT,01,01,02,ANTSTATUS=OK*3B",
    "$GPVTG,0.0,T,,M,0.0,N,0.1,K,A*0C",
    "$PMTK300,1000,0,0,0,0*1C",
];

/// A sample line with one payload character replaced by another printable one.
fn corrupted_line_strategy() -> impl Strategy<Value = (String, String)> {
    (0..SAMPLES.len(), any::<prop::sample::Index>(), 0x20u8..0x7f).prop_filter_map(
        "replacement must differ from the original",
        |(sample, position, replacement)| {
            let line = SAMPLES[sample];
            // payload sits between the leading '$' and the trailing "*hh"
            let index = 1 + position.index(line.len() - 4);
            let original = line.as_bytes()[index];

            if original == replacement {
                return None;
            }

            let mut corrupted = line.as_bytes().to_vec();
            corrupted[index] = replacement;
            let corrupted = String::from_utf8(corrupted).ok()?;

            Some((line.to_owned(), corrupted))
        },
    )
}

/// A latitude as written on the wire: `ddmm.f...` and its hemisphere.
fn wire_latitude_strategy() -> impl Strategy<Value = (String, CardinalPoint)> {
    (
        0u8..90,
        0u8..60,
        "[0-9]{1,5}",
        prop::bool::ANY,
    )
        .prop_map(|(degrees, minutes, fraction, south)| {
            let hemisphere = if south {
                CardinalPoint::South
            } else {
                CardinalPoint::North
            };

            (format!("{degrees:02}{minutes:02}.{fraction}"), hemisphere)
        })
}

proptest! {
    #[test]
    fn test_single_character_corruption((line, corrupted) in corrupted_line_strategy()) {
        let parser = Nmea0183Parser::new();

        prop_assert!(parser.parse(&line).is_ok());
        prop_assert!(
            matches!(parser.parse(&corrupted), Err(Error::ChecksumMismatch { .. })),
            "{corrupted}"
        );
    }

    #[test]
    fn test_dm_round_trip(degrees in -180.0f64..=180.0) {
        let axis = if degrees.abs() <= 90.0 { Axis::Latitude } else { Axis::Longitude };
        let coordinate = LatLong::new(degrees).unwrap();

        let (value, hemisphere) = coordinate.to_wire(axis);
        let parsed: LatLong = format!("{value}{}", hemisphere.code()).parse().unwrap();

        // four minute digits resolve 1e-4 minutes
        prop_assert!((parsed.degrees() - degrees).abs() <= 1e-4 / 60.0, "{degrees} -> {value}");
    }

    #[test]
    fn test_wire_latitude_is_byte_exact((value, hemisphere) in wire_latitude_strategy()) {
        let parsed: LatLong = format!("{value}{}", hemisphere.code()).parse().unwrap();

        prop_assert_eq!(parsed.to_wire(Axis::Latitude), (value, hemisphere));
    }
}
