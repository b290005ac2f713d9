//! # Sentence-Type Registry
//!
//! Maps full sentence codes (`GPGGA`, `PMTK010`, ...) to their
//! [`SentenceHeader`]. A [`Registry`] is an ordinary value: build it once
//! (usually with [`Registry::standard`]) and hand it to the parser, which owns
//! it for the rest of its life. There is no way to mutate a registry after it
//! has been built, so a parser can be shared between threads freely.

use std::{collections::HashMap, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::FramingError;

/// The subsystem that emitted a sentence.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Talker {
    /// `P`: manufacturer proprietary sentence
    Proprietary,
    /// `GP`: Global Positioning System receiver
    Gps,
    /// `LC`: Loran-C receiver
    LoranC,
    /// `II`: Integrated Instrumentation
    IntegratedInstrumentation,
    /// `IN`: Integrated Navigation
    IntegratedNavigation,
    /// `EC`: Electronic Chart Display & Information System (ECDIS)
    Ecdis,
    /// `CD`: Digital Selective Calling (DSC)
    Dsc,
    /// `GA`: Galileo Positioning System
    Galileo,
    /// `GL`: GLONASS
    Glonass,
    /// `GN`: mixed GNSS constellations
    Gnss,
    /// `GB`: BeiDou
    BeiDou,
    /// `BD`: BeiDou
    BeiDouLegacy,
    /// `QZ`: QZSS regional augmentation system
    Qzss,
    /// Any other two-character talker
    Other(String),
}

impl Talker {
    /// The talker's wire prefix.
    pub fn code(&self) -> &str {
        match self {
            Talker::Proprietary => "P",
            Talker::Gps => "GP",
            Talker::LoranC => "LC",
            Talker::IntegratedInstrumentation => "II",
            Talker::IntegratedNavigation => "IN",
            Talker::Ecdis => "EC",
            Talker::Dsc => "CD",
            Talker::Galileo => "GA",
            Talker::Glonass => "GL",
            Talker::Gnss => "GN",
            Talker::BeiDou => "GB",
            Talker::BeiDouLegacy => "BD",
            Talker::Qzss => "QZ",
            Talker::Other(code) => code,
        }
    }

    fn from_code(code: &str) -> Self {
        match code {
            "P" => Talker::Proprietary,
            "GP" => Talker::Gps,
            "LC" => Talker::LoranC,
            "II" => Talker::IntegratedInstrumentation,
            "IN" => Talker::IntegratedNavigation,
            "EC" => Talker::Ecdis,
            "CD" => Talker::Dsc,
            "GA" => Talker::Galileo,
            "GL" => Talker::Glonass,
            "GN" => Talker::Gnss,
            "GB" => Talker::BeiDou,
            "BD" => Talker::BeiDouLegacy,
            "QZ" => Talker::Qzss,
            other => Talker::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for Talker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The first token of a sentence: talker, sentence code and, for proprietary
/// sentences, the command sub-code.
///
/// Displaying a header reproduces the code it was parsed from.
///
/// ```rust
/// use nmea0183_envelope::{SentenceHeader, Talker};
///
/// let header = SentenceHeader::parse("PMTK251").unwrap();
/// assert_eq!(header.talker(), &Talker::Proprietary);
/// assert_eq!(header.sentence(), "MTK");
/// assert_eq!(header.sub_code(), Some("251"));
/// assert_eq!(header.to_string(), "PMTK251");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SentenceHeader {
    talker: Talker,
    sentence: String,
    sub_code: Option<String>,
}

impl SentenceHeader {
    /// Builds a header from its parts.
    pub fn new(talker: Talker, sentence: impl Into<String>, sub_code: Option<String>) -> Self {
        SentenceHeader {
            talker,
            sentence: sentence.into(),
            sub_code: sub_code.filter(|sub_code| !sub_code.is_empty()),
        }
    }

    /// Splits a full sentence code into its parts.
    ///
    /// Codes starting with `P` and at least four characters long are proprietary:
    /// `P`, a three-character manufacturer code, then an optional sub-code.
    /// Every other code is a two-character talker followed by the sentence code.
    pub fn parse(code: &str) -> Result<Self, FramingError> {
        if code.len() < 3 || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(FramingError::InvalidHeader(code.to_owned()));
        }

        let header = if code.starts_with('P') && code.len() >= 4 {
            SentenceHeader::new(
                Talker::Proprietary,
                &code[1..4],
                Some(code[4..].to_owned()),
            )
        } else {
            SentenceHeader::new(Talker::from_code(&code[..2]), &code[2..], None)
        };

        Ok(header)
    }

    /// Who emitted the sentence.
    pub fn talker(&self) -> &Talker {
        &self.talker
    }

    /// The sentence code (`GGA`), or the manufacturer code of a proprietary sentence (`MTK`).
    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    /// The command of a proprietary sentence (`251` in `PMTK251`).
    pub fn sub_code(&self) -> Option<&str> {
        self.sub_code.as_deref()
    }
}

impl fmt::Display for SentenceHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.talker, self.sentence)?;
        if let Some(sub_code) = &self.sub_code {
            f.write_str(sub_code)?;
        }

        Ok(())
    }
}

/// The sentences this crate decodes into typed records.
///
/// This is the only place that knows their wire codes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceKind {
    /// Global Positioning System Fix Data
    Gga,
    /// Geographic Position, Latitude/Longitude
    Gll,
    /// GPS DOP and Active Satellites
    Gsa,
    /// GPS Satellites in View
    Gsv,
    /// Recommended Minimum Specific GPS/TRANSIT Data
    Rmc,
    /// Text transmission
    Txt,
    /// Track Made Good and Ground Speed
    Vtg,
}

impl SentenceKind {
    /// Every typed sentence.
    pub const ALL: [SentenceKind; 7] = [
        SentenceKind::Gga,
        SentenceKind::Gll,
        SentenceKind::Gsa,
        SentenceKind::Gsv,
        SentenceKind::Rmc,
        SentenceKind::Txt,
        SentenceKind::Vtg,
    ];

    /// Full wire code, e.g. `GPGGA`.
    pub fn code(self) -> &'static str {
        match self {
            SentenceKind::Gga => "GPGGA",
            SentenceKind::Gll => "GPGLL",
            SentenceKind::Gsa => "GPGSA",
            SentenceKind::Gsv => "GPGSV",
            SentenceKind::Rmc => "GPRMC",
            SentenceKind::Txt => "GPTXT",
            SentenceKind::Vtg => "GPVTG",
        }
    }

    /// Header written in front of the sentence's fields.
    pub fn header(self) -> SentenceHeader {
        SentenceHeader::new(Talker::Gps, &self.code()[2..], None)
    }

    /// The kind decoded from sentences carrying `header`, if any.
    pub fn from_header(header: &SentenceHeader) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| header.sub_code.is_none() && kind.code() == header.to_string())
    }
}

impl fmt::Display for SentenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Every code known to [`Registry::standard`], with its description.
const STANDARD: &[(&str, &str)] = &[
    ("GPAAM", "Waypoint Arrival Alarm"),
    ("GPALM", "GPS Almanac Data"),
    ("GPAPA", "Autopilot Sentence \"A\""),
    ("GPAPB", "Autopilot Sentence \"B\""),
    ("GPASD", "Autopilot System Data"),
    ("GPBEC", "Bearing & Distance to Waypoint, Dead Reckoning"),
    ("GPBOD", "Bearing, Origin to Destination"),
    ("GPBWC", "Bearing & Distance to Waypoint, Great Circle"),
    ("GPBWR", "Bearing & Distance to Waypoint, Rhumb Line"),
    ("GPBWW", "Bearing, Waypoint to Waypoint"),
    ("GPDBT", "Depth Below Transducer"),
    ("GPDCN", "Decca Position"),
    ("GPDPT", "Depth"),
    ("GPFSI", "Frequency Set Information"),
    ("GPGGA", "Global Positioning System Fix Data"),
    ("GPGLC", "Geographic Position, Loran-C"),
    ("GPGLL", "Geographic Position, Latitude/Longitude"),
    ("GPGSA", "GPS DOP and Active Satellites"),
    ("GPGSV", "GPS Satellites in View"),
    ("GPGXA", "TRANSIT Position"),
    ("GPHDG", "Heading, Deviation & Variation"),
    ("GPHDT", "Heading, True"),
    ("GPHSC", "Heading Steering Command"),
    ("GPLCD", "Loran-C Signal Data"),
    ("GPMTA", "Air Temperature"),
    ("GPMTW", "Water Temperature"),
    ("GPMWD", "Wind Direction"),
    ("GPMWV", "Wind Speed and Angle"),
    ("GPOLN", "Omega Lane Numbers"),
    ("GPOSD", "Own Ship Data"),
    ("GPR00", "Waypoints in Active Route"),
    ("GPRMA", "Recommended Minimum Specific Loran-C Data"),
    ("GPRMB", "Recommended Minimum Navigation Information"),
    ("GPRMC", "Recommended Minimum Specific GPS/TRANSIT Data"),
    ("GPROT", "Rate of Turn"),
    ("GPRPM", "Revolutions"),
    ("GPRSA", "Rudder Sensor Angle"),
    ("GPRSD", "RADAR System Data"),
    ("GPRTE", "Routes"),
    ("GPSFI", "Scanning Frequency Information"),
    ("GPSTN", "Multiple Data ID"),
    ("GPTRF", "Transit Fix Data"),
    ("GPTTM", "Tracked Target Message"),
    ("GPTXT", "Text Transmission"),
    ("GPVBW", "Dual Ground/Water Speed"),
    ("GPVDR", "Set and Drift"),
    ("GPVHW", "Water Speed and Heading"),
    ("GPVLW", "Distance Traveled through the Water"),
    ("GPVPW", "Speed, Measured Parallel to Wind"),
    ("GPVTG", "Track Made Good and Ground Speed"),
    ("GPWCV", "Waypoint Closure Velocity"),
    ("GPWNC", "Distance, Waypoint to Waypoint"),
    ("GPWPL", "Waypoint Location"),
    ("GPXDR", "Transducer Measurements"),
    ("GPXTE", "Cross-Track Error, Measured"),
    ("GPXTR", "Cross-Track Error, Dead Reckoning"),
    ("GPZDA", "Time & Date"),
    ("GPZFO", "UTC & Time from Origin Waypoint"),
    ("GPZTG", "UTC & Time to Destination Waypoint"),
    ("PMTK010", "System Message"),
    ("PMTK011", "Text Message"),
    ("PMTK001", "Acknowledge"),
    ("PMTK101", "Hot Start"),
    ("PMTK102", "Warm Start"),
    ("PMTK103", "Cold Start"),
    ("PMTK104", "Full Cold Start"),
    ("PMTK161", "Standby Mode"),
    ("PMTK183", "LOCUS Query Status"),
    ("PMTKLOG", "LOCUS Status"),
    ("PMTK184", "LOCUS Erase Flash"),
    ("PMTK185", "LOCUS Stop Logger"),
    ("PMTK622", "LOCUS Query Data"),
    ("PMTK225", "Set Periodic Mode"),
    ("PMTK251", "Set NMEA Baud Rate"),
    ("PMTK286", "Set Active Interference Cancellation"),
    ("PMTK300", "Set Fix Interval"),
    ("PMTK301", "Set DGPS Mode"),
    ("PMTK313", "Set SBAS Enabled"),
    ("PMTK314", "Set NMEA Output"),
    ("PMTK386", "Set Static Navigation Threshold"),
    ("PMTK400", "Query Fix Interval"),
    ("PMTK401", "Query DGPS Mode"),
    ("PMTK413", "Query SBAS Enabled"),
    ("PMTK414", "Query NMEA Output"),
    ("PMTK605", "Query Firmware Release"),
    ("PMTK500", "Fix Interval"),
    ("PMTK501", "DGPS Mode"),
    ("PMTK513", "SBAS Enabled"),
    ("PMTK514", "NMEA Output"),
    ("PMTK705", "Firmware Release"),
    ("PMTK869", "EASY Enable"),
];

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    header: SentenceHeader,
    description: Option<&'static str>,
}

/// Read-only table from full sentence codes to headers.
///
/// ```rust
/// use nmea0183_envelope::Registry;
///
/// let registry = Registry::standard();
/// let header = registry.lookup("GPGGA").unwrap();
/// assert_eq!(header.to_string(), "GPGGA");
/// assert_eq!(registry.description("PMTK101"), Some("Hot Start"));
/// assert!(registry.lookup("GPXYZ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    entries: HashMap<String, Entry>,
}

impl Registry {
    /// Every `GP` sentence and MediaTek `PMTK` packet the crate knows about.
    pub fn standard() -> Self {
        let entries = STANDARD
            .iter()
            .filter_map(|&(code, description)| {
                let header = SentenceHeader::parse(code).ok()?;
                Some((
                    code.to_owned(),
                    Entry {
                        header,
                        description: Some(description),
                    },
                ))
            })
            .collect();

        Registry { entries }
    }

    /// A registry holding exactly `codes`, without descriptions.
    pub fn from_codes<I, S>(codes: I) -> Result<Self, FramingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = codes
            .into_iter()
            .map(|code| {
                let code = code.as_ref();
                let header = SentenceHeader::parse(code)?;
                Ok((
                    code.to_owned(),
                    Entry {
                        header,
                        description: None,
                    },
                ))
            })
            .collect::<Result<_, FramingError>>()?;

        Ok(Registry { entries })
    }

    /// The header registered for `code`.
    pub fn lookup(&self, code: &str) -> Option<&SentenceHeader> {
        self.entries.get(code).map(|entry| &entry.header)
    }

    /// Human-readable name of the sentence registered for `code`.
    pub fn description(&self, code: &str) -> Option<&'static str> {
        self.entries.get(code).and_then(|entry| entry.description)
    }

    /// Whether `code` is registered.
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Number of registered codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every registered header, in no particular order.
    pub fn headers(&self) -> impl Iterator<Item = &SentenceHeader> {
        self.entries.values().map(|entry| &entry.header)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_round_trip() {
        let registry = Registry::standard();
        assert_eq!(registry.len(), STANDARD.len());

        for (code, _) in STANDARD {
            let header = registry.lookup(code).unwrap();
            assert_eq!(&header.to_string(), code);
        }
    }

    #[test]
    fn test_header_parse() {
        let header = SentenceHeader::parse("GPGGA").unwrap();
        assert_eq!(header.talker(), &Talker::Gps);
        assert_eq!(header.sentence(), "GGA");
        assert_eq!(header.sub_code(), None);

        let header = SentenceHeader::parse("PMTKLOG").unwrap();
        assert_eq!(header.talker(), &Talker::Proprietary);
        assert_eq!(header.sentence(), "MTK");
        assert_eq!(header.sub_code(), Some("LOG"));

        let header = SentenceHeader::parse("PGRM").unwrap();
        assert_eq!(header.talker(), &Talker::Proprietary);
        assert_eq!(header.sub_code(), None);
        assert_eq!(header.to_string(), "PGRM");

        let header = SentenceHeader::parse("XXABC").unwrap();
        assert_eq!(header.talker(), &Talker::Other("XX".to_owned()));
        assert_eq!(header.to_string(), "XXABC");
    }

    #[test]
    fn test_header_parse_rejects() {
        for code in ["", "GP", "GP GGA", "GP-GA", "GPGGA\r"] {
            assert_eq!(
                SentenceHeader::parse(code),
                Err(FramingError::InvalidHeader(code.to_owned())),
                "{code:?}"
            );
        }
    }

    #[test]
    fn test_sentence_kinds() {
        let registry = Registry::standard();

        for kind in SentenceKind::ALL {
            assert_eq!(registry.lookup(kind.code()), Some(&kind.header()));
            assert_eq!(SentenceKind::from_header(&kind.header()), Some(kind));
        }

        let zda = registry.lookup("GPZDA").unwrap();
        assert_eq!(SentenceKind::from_header(zda), None);
    }

    #[test]
    fn test_from_codes() {
        let registry = Registry::from_codes(["GNGGA", "PUBX00"]).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("GNGGA"));
        assert!(!registry.contains("GPGGA"));
        assert_eq!(registry.description("GNGGA"), None);
        assert_eq!(registry.lookup("PUBX00").unwrap().sub_code(), Some("00"));

        assert!(Registry::from_codes(["GP,GGA"]).is_err());
    }
}
