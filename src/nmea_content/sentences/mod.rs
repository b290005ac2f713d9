mod gga;
mod gll;
mod gsa;
mod gsv;
mod rmc;
mod txt;
mod vtg;

pub use gga::GGA;
pub use gll::GLL;
pub use gsa::GSA;
pub use gsv::GSV;
pub use rmc::RMC;
pub use txt::TXT;
pub use vtg::VTG;

use std::fmt;

use nom::Parser;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FieldError, IResult, Integer, NmeaParse};

/// Declares a closed set of wire codes.
///
/// Each variant names its wire code and a human-readable label. The generated
/// enum implements [`NmeaParse`] (an unknown code is a [`FieldError::UnknownCode`]),
/// exposes `code()` and `label()`, and displays as its label.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $code:literal => $variant:ident ($label:literal)
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Code written on the wire.
            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)*
                }
            }

            /// Human-readable name.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)*
                }
            }
        }

        impl NmeaParse for $name {
            fn parse(i: &str) -> IResult<&str, Self> {
                let result: IResult<&str, Self> = nom::branch::alt(($(
                    nom::combinator::value(
                        $name::$variant,
                        nom::bytes::complete::tag($code),
                    ),
                )*))
                .parse(i);

                result.map_err(|_| nom::Err::Error(FieldError::UnknownCode(i.to_owned())))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

wire_enum! {
    /// Validity flag of RMC and GLL sentences
    pub enum DataValid {
        /// A - Data valid
        "A" => Valid("valid"),
        /// V - Data invalid
        "V" => Invalid("invalid"),
    }
}

wire_enum! {
    /// Positioning system mode indicator
    pub enum PositioningMode {
        /// N - Data not valid
        "N" => NoFix("no fix"),
        /// A - Autonomous GNSS fix
        "A" => Autonomous("autonomous GNSS fix"),
        /// D - Differential GNSS fix
        "D" => Differential("differential GNSS fix"),
    }
}

wire_enum! {
    /// Fix status of a GSA sentence
    pub enum FixStatus {
        /// 1 - No fix
        "1" => NoFix("no fix"),
        /// 2 - 2D fix
        "2" => Fix2D("2D fix"),
        /// 3 - 3D fix
        "3" => Fix3D("3D fix"),
    }
}

wire_enum! {
    /// Quality of the GPS fix
    pub enum QualityIndicator {
        /// 0 - Fix not available
        "0" => Invalid("invalid"),
        /// 1 - GNSS fix
        "1" => GnssFix("GNSS fix"),
        /// 2 - Differential GNSS fix
        "2" => DgpsFix("DGPS fix"),
    }
}

wire_enum! {
    /// Selection mode of a GSA sentence
    pub enum Mode {
        /// M - Manual, forced to operate in 2D or 3D
        "M" => Manual("manual"),
        /// A - Automatic, 2D/3D
        "A" => Automatic("automatic"),
    }
}

wire_enum! {
    /// Severity of a TXT message
    pub enum Severity {
        /// 00 - Error
        "00" => Error("error"),
        /// 01 - Warning
        "01" => Warning("warning"),
        /// 02 - Notice
        "02" => Notice("notice"),
        /// 07 - User
        "07" => User("user"),
    }
}

wire_enum! {
    /// Hemisphere of a coordinate
    pub enum CardinalPoint {
        /// N - North
        "N" => North("north"),
        /// S - South
        "S" => South("south"),
        /// E - East
        "E" => East("east"),
        /// W - West
        "W" => West("west"),
    }
}

/// Satellite information used in [`GSV`] sentences
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Satellite {
    /// Satellite PRN number
    pub prn: Integer<u8>,
    /// Elevation in degrees, 0 to 90
    pub elevation: Option<Integer<u8>>,
    /// Azimuth in degrees from true north, 0 to 359
    pub azimuth: Option<Integer<u16>>,
    /// Signal-to-noise ratio in dBHz, 0 to 99, empty when not tracking
    pub snr: Option<Integer<u8>>,
}
