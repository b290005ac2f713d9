#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Arity, Axis, Decimal, Error, FieldError, LatLong, SentenceKind,
    lexical::display_or_empty,
    nmea_content::{
        CardinalPoint, DataValid, Fields, PositioningMode, TypedSentence, UtcTime,
        parse::{format_coordinate, format_date},
    },
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///                                                            12
///         1         2 3       4 5        6 7   8   9      10  11|
///         |         | |       | |        | |   |   |      |   | |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,ddmmyy,x.x,a,m*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct RMC {
    /// Fix time in UTC
    pub fix_time: Option<UtcTime>,
    /// Status Mode Indicator
    pub status: DataValid,
    /// Latitude
    pub latitude: Option<LatLong>,
    /// Longitude
    pub longitude: Option<LatLong>,
    /// Speed over ground in knots
    pub speed_over_ground: Option<Decimal>,
    /// Course over ground in degrees
    pub course_over_ground: Option<Decimal>,
    /// Fix date in UTC
    pub fix_date: Option<time::Date>,
    /// Magnetic variation in degrees, negative when west
    pub magnetic_variation: Option<Decimal>,
    /// Positioning system mode
    pub positioning_mode: PositioningMode,
}

impl RMC {
    /// Fix date and time combined into one UTC timestamp.
    pub fn timestamp(&self) -> Option<time::OffsetDateTime> {
        let date = self.fix_date?;
        let time = self.fix_time?.time();

        Some(time::PrimitiveDateTime::new(date, time).assume_utc())
    }
}

fn magnetic_variation(fields: &Fields<'_>, index: usize) -> Result<Option<Decimal>, Error> {
    let (value, direction) = (fields.get(index), fields.get(index + 1));

    match (value.is_empty(), direction.is_empty()) {
        (true, true) => Ok(None),
        (true, false) => Err(fields.error(index, FieldError::Missing)),
        (false, true) => Err(fields.error(index + 1, FieldError::Missing)),
        (false, false) => {
            let variation: Decimal = fields.parse(index)?;
            match fields.parse(index + 1)? {
                CardinalPoint::East => Ok(Some(variation)),
                CardinalPoint::West => Ok(Some(variation.negated())),
                _ => Err(fields.error(
                    index + 1,
                    FieldError::UnknownCode(direction.to_owned()),
                )),
            }
        }
    }
}

impl TypedSentence for RMC {
    const KIND: SentenceKind = SentenceKind::Rmc;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, Error> {
        fields.expect(Arity::Exactly(12))?;

        Ok(RMC {
            fix_time: fields.parse(0)?,
            status: fields.parse(1)?,
            latitude: fields.coordinate(2, Axis::Latitude)?,
            longitude: fields.coordinate(4, Axis::Longitude)?,
            speed_over_ground: fields.parse(6)?,
            course_over_ground: fields.parse(7)?,
            fix_date: fields.parse(8)?,
            magnetic_variation: magnetic_variation(fields, 9)?,
            positioning_mode: fields.parse(11)?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        let [latitude, north_south] = format_coordinate(self.latitude, Axis::Latitude);
        let [longitude, east_west] = format_coordinate(self.longitude, Axis::Longitude);
        let (variation, direction) = match self.magnetic_variation {
            Some(variation) => {
                let direction = if variation.value().is_sign_negative() {
                    CardinalPoint::West
                } else {
                    CardinalPoint::East
                };
                (variation.abs().to_string(), direction.code().to_owned())
            }
            None => (String::new(), String::new()),
        };

        vec![
            display_or_empty(&self.fix_time),
            self.status.code().to_owned(),
            latitude,
            north_south,
            longitude,
            east_west,
            display_or_empty(&self.speed_over_ground),
            display_or_empty(&self.course_over_ground),
            self.fix_date.map(format_date).unwrap_or_default(),
            variation,
            direction,
            self.positioning_mode.code().to_owned(),
        ]
    }
}
