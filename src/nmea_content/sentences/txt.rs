#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Arity, Error, Integer, SentenceKind,
    nmea_content::{Fields, Severity, TypedSentence},
};

/// TXT - Text Transmission
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_txt_text_transmission>
///
/// ```text
///         1  2  3  4
///         |  |  |  |
///  $--TXT,xx,xx,xx,c--c*hh<CR><LF>
/// ```
///
/// Commas inside the message split it over several fields; they are joined
/// back with a space.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TXT {
    /// Total number of TXT sentences in this transmission
    pub total_messages: Integer<u8>,
    /// Sentence number of this TXT message within the transmission
    pub message_number: Integer<u8>,
    /// Message severity
    pub severity: Severity,
    /// Message text
    pub text: String,
}

impl TypedSentence for TXT {
    const KIND: SentenceKind = SentenceKind::Txt;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, Error> {
        fields.expect(Arity::AtLeast(4))?;

        Ok(TXT {
            total_messages: fields.parse(0)?,
            message_number: fields.parse(1)?,
            severity: fields.parse(2)?,
            text: fields.rest(3).join(" "),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.total_messages.to_padded(2),
            self.message_number.to_padded(2),
            self.severity.code().to_owned(),
            self.text.clone(),
        ]
    }
}
