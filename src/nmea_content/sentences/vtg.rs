#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Arity, Decimal, Error, SentenceKind,
    lexical::display_or_empty,
    nmea_content::{Fields, PositioningMode, TypedSentence},
};

/// VTG - Track made good and Ground speed
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_vtg_track_made_good_and_ground_speed>
///
/// ```text
///          1  2  3  4  5  6  7  8 9
///          |  |  |  |  |  |  |  | |
///  $--VTG,x.x,T,x.x,M,x.x,N,x.x,K,m*hh<CR><LF>
/// ```
///
/// Fields 2, 4, 6 and 8 hold the fixed units `T`, `M`, `N` and `K`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct VTG {
    /// Course over ground in degrees true
    pub course_over_ground_true: Option<Decimal>,
    /// Course over ground in degrees magnetic
    pub course_over_ground_magnetic: Option<Decimal>,
    /// Speed over ground in knots
    pub speed_knots: Option<Decimal>,
    /// Speed over ground in kilometers per hour
    pub speed_kmh: Option<Decimal>,
    /// Positioning system mode
    pub positioning_mode: PositioningMode,
}

impl TypedSentence for VTG {
    const KIND: SentenceKind = SentenceKind::Vtg;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, Error> {
        fields.expect(Arity::Exactly(9))?;
        fields.literal(1, "T")?;
        fields.literal(3, "M")?;
        fields.literal(5, "N")?;
        fields.literal(7, "K")?;

        Ok(VTG {
            course_over_ground_true: fields.parse(0)?,
            course_over_ground_magnetic: fields.parse(2)?,
            speed_knots: fields.parse(4)?,
            speed_kmh: fields.parse(6)?,
            positioning_mode: fields.parse(8)?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            display_or_empty(&self.course_over_ground_true),
            "T".to_owned(),
            display_or_empty(&self.course_over_ground_magnetic),
            "M".to_owned(),
            display_or_empty(&self.speed_knots),
            "N".to_owned(),
            display_or_empty(&self.speed_kmh),
            "K".to_owned(),
            self.positioning_mode.code().to_owned(),
        ]
    }
}
