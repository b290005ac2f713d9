//! # NMEA 0183 Sentence Dispatcher
//!
//! This module provides the configurable entry point of the crate. It handles the
//! standard NMEA 0183 line format: `$HHH,D1,D2,...,Dn*CC\r\n`
//!
//! The parser is configurable to handle variations in:
//! - Checksum requirements (required or optional)
//! - Line ending requirements (optional, required or forbidden)
//! - Sentences missing from the registry (kept as envelopes or rejected)

use log::debug;

use crate::{
    Envelope, Error, FramingError, Registry, SentenceHeader, envelope::unframe,
    nmea_content::NmeaSentence,
};

/// Defines how the parser should handle NMEA message checksums.
///
/// NMEA 0183 messages can include an optional checksum in the format `*CC` where
/// CC is a two-digit hexadecimal value representing the XOR of all bytes in the
/// message content (excluding the '$' prefix and '*' delimiter).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    #[default]
    /// Checksum is required and must be present.
    ///
    /// The parser will fail if no `*CC` checksum is found at the end of the message.
    /// If a checksum is present, it will be validated against the calculated checksum.
    Required,

    /// Checksum is optional but will be validated if present.
    ///
    /// The parser will accept messages both with and without checksums:
    /// - If no checksum is present (`*CC` missing), the computed checksum is used
    /// - If a checksum is present, it must be valid or parsing will fail
    ///
    /// Use this mode when working with legacy equipment that may not always
    /// include checksums.
    Optional,
}

/// Defines how the parser should handle CRLF line endings.
///
/// NMEA 0183 messages typically end with a carriage return and line feed (`\r\n`),
/// but lines read from files or APIs often have them stripped already.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineEndingMode {
    #[default]
    /// Any trailing CR and LF characters are stripped before decoding.
    Optional,

    /// CRLF line ending is required and must be present.
    ///
    /// The parser will fail if the message does not end with `\r\n`.
    /// Use this mode when parsing raw serial port data.
    Required,

    /// Line endings are forbidden.
    ///
    /// The parser will fail if the message ends with a CR or LF character.
    Forbidden,
}

/// Defines how the parser should handle sentence codes missing from its registry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UnknownSentenceMode {
    #[default]
    /// Well-framed sentences with an unknown code are returned as an
    /// [`NmeaSentence::Untyped`] envelope.
    Envelope,

    /// Unknown codes fail with [`Error::UnrecognizedMessage`].
    Reject,
}

/// Configures an NMEA 0183 sentence parser.
///
/// It uses the builder pattern to allow for flexible configuration of the parser
/// settings before building the final, immutable [`Nmea0183Parser`].
///
/// # Examples
///
/// ```rust
/// use nmea0183_envelope::Nmea0183ParserBuilder;
///
/// // Required checksum, trailing CRLF stripped, standard registry
/// let parser = Nmea0183ParserBuilder::new().build();
/// assert!(parser.parse("$GPTXT,01,01,02,ANTSTATUS=OK*3B\r\n").is_ok());
/// ```
///
/// ## Configuration
///
/// ```rust
/// use nmea0183_envelope::{
///     ChecksumMode, LineEndingMode, Nmea0183ParserBuilder, UnknownSentenceMode,
/// };
///
/// // Strict: checksum and CRLF both required
/// let strict_parser = Nmea0183ParserBuilder::new()
///     .checksum_mode(ChecksumMode::Required)
///     .line_ending_mode(LineEndingMode::Required)
///     .build();
/// assert!(strict_parser.parse("$PMTK101*32\r\n").is_ok());
/// assert!(strict_parser.parse("$PMTK101*32").is_err()); // (missing CRLF)
/// assert!(strict_parser.parse("$PMTK101\r\n").is_err()); // (missing checksum)
///
/// // Checksum required, no CRLF allowed
/// let no_crlf_parser = Nmea0183ParserBuilder::new()
///     .line_ending_mode(LineEndingMode::Forbidden)
///     .build();
/// assert!(no_crlf_parser.parse("$PMTK101*32").is_ok());
/// assert!(no_crlf_parser.parse("$PMTK101*32\r\n").is_err()); // (CRLF present)
///
/// // Lenient: checksum optional, unknown sentences rejected
/// let lenient_parser = Nmea0183ParserBuilder::new()
///     .checksum_mode(ChecksumMode::Optional)
///     .unknown_sentences(UnknownSentenceMode::Reject)
///     .build();
/// assert!(lenient_parser.parse("$PMTK101*32").is_ok()); // (with valid checksum)
/// assert!(lenient_parser.parse("$PMTK101").is_ok()); // (without checksum)
/// assert!(lenient_parser.parse("$PMTK101*99").is_err()); // (invalid checksum)
/// assert!(lenient_parser.parse("$GPZZZ,1").is_err()); // (unknown sentence)
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct Nmea0183ParserBuilder {
    /// Checksum mode for the parser.
    checksum_mode: ChecksumMode,
    /// Line ending mode for the parser.
    line_ending_mode: LineEndingMode,
    /// Handling of codes missing from the registry.
    unknown_sentences: UnknownSentenceMode,
    /// Registry the header codes are looked up in.
    registry: Registry,
}

impl Nmea0183ParserBuilder {
    /// Creates a new NMEA 0183 parser builder with default settings.
    ///
    /// The default settings are:
    /// - Checksum mode: [`ChecksumMode::Required`]
    /// - Line ending mode: [`LineEndingMode::Optional`]
    /// - Unknown sentences: [`UnknownSentenceMode::Envelope`]
    /// - Registry: [`Registry::standard`]
    pub fn new() -> Self {
        Nmea0183ParserBuilder {
            checksum_mode: ChecksumMode::default(),
            line_ending_mode: LineEndingMode::default(),
            unknown_sentences: UnknownSentenceMode::default(),
            registry: Registry::standard(),
        }
    }

    /// Sets the checksum mode for the parser.
    ///
    /// # Arguments
    ///
    /// * `mode` - The desired checksum mode:
    ///   - [`ChecksumMode::Required`]: Checksum must be present and valid
    ///   - [`ChecksumMode::Optional`]: Checksum may be absent or must be valid if present
    pub fn checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    /// Sets the line ending mode for the parser.
    ///
    /// # Arguments
    ///
    /// * `mode` - The desired line ending mode:
    ///   - [`LineEndingMode::Optional`]: Trailing CR/LF characters are stripped
    ///   - [`LineEndingMode::Required`]: Message must end with `\r\n`
    ///   - [`LineEndingMode::Forbidden`]: Message must not end with CR or LF
    pub fn line_ending_mode(mut self, mode: LineEndingMode) -> Self {
        self.line_ending_mode = mode;
        self
    }

    /// Sets how sentence codes missing from the registry are handled.
    pub fn unknown_sentences(mut self, mode: UnknownSentenceMode) -> Self {
        self.unknown_sentences = mode;
        self
    }

    /// Replaces the registry header codes are looked up in.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Builds the parser with the configured settings.
    pub fn build(self) -> Nmea0183Parser {
        Nmea0183Parser {
            checksum_mode: self.checksum_mode,
            line_ending_mode: self.line_ending_mode,
            unknown_sentences: self.unknown_sentences,
            registry: self.registry,
        }
    }
}

impl Default for Nmea0183ParserBuilder {
    fn default() -> Self {
        Nmea0183ParserBuilder::new()
    }
}

/// Decodes NMEA 0183 lines into typed sentences.
///
/// Each line goes through the same stages: line ending policy, framing,
/// checksum verification, registry lookup and finally the typed decoder of
/// the sentence, if it has one.
///
/// # Examples
///
/// ```rust
/// use nmea0183_envelope::{Nmea0183Parser, nmea_content::NmeaSentence};
///
/// let parser = Nmea0183Parser::new();
///
/// match parser.parse("$GPGSV,3,1,12,01,05,060,18,02,17,259,43,04,56,287,28,09,08,277,28*77") {
///     Ok(NmeaSentence::GSV(gsv)) => assert_eq!(gsv.satellites.len(), 4),
///     other => panic!("unexpected result {other:?}"),
/// }
///
/// match parser.parse("$PMTK251,38400*27") {
///     Ok(NmeaSentence::Untyped(envelope)) => assert_eq!(envelope.fields(), ["38400"]),
///     other => panic!("unexpected result {other:?}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Nmea0183Parser {
    checksum_mode: ChecksumMode,
    line_ending_mode: LineEndingMode,
    unknown_sentences: UnknownSentenceMode,
    registry: Registry,
}

impl Nmea0183Parser {
    /// Creates a parser with the default settings of [`Nmea0183ParserBuilder::new`].
    pub fn new() -> Self {
        Nmea0183ParserBuilder::new().build()
    }

    /// Starts configuring a parser.
    pub fn builder() -> Nmea0183ParserBuilder {
        Nmea0183ParserBuilder::new()
    }

    /// The registry header codes are looked up in.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Frames one line and verifies its checksum without dissecting its fields.
    pub fn decode_envelope(&self, raw: &str) -> Result<Envelope, Error> {
        let line = self.line(raw)?;
        let (code, fields) = unframe(line, self.checksum_mode)?;

        let header = match self.registry.lookup(code) {
            Some(header) => header.clone(),
            None if self.unknown_sentences == UnknownSentenceMode::Envelope => {
                debug!("{code} is not registered, keeping the envelope");
                SentenceHeader::parse(code)?
            }
            None => return Err(Error::UnrecognizedMessage(code.to_owned())),
        };

        Ok(Envelope::new(header, fields))
    }

    /// Decodes one line into its typed sentence.
    ///
    /// Sentences without a typed decoder are returned as
    /// [`NmeaSentence::Untyped`].
    pub fn parse(&self, raw: &str) -> Result<NmeaSentence, Error> {
        NmeaSentence::decode(self.decode_envelope(raw)?)
    }

    fn line<'a>(&self, raw: &'a str) -> Result<&'a str, FramingError> {
        let is_line_end = |c: char| c == '\r' || c == '\n';

        match self.line_ending_mode {
            LineEndingMode::Optional => Ok(raw.trim_end_matches(is_line_end)),
            LineEndingMode::Required => raw
                .strip_suffix("\r\n")
                .ok_or(FramingError::MissingLineEnding),
            LineEndingMode::Forbidden if raw.ends_with(is_line_end) => {
                Err(FramingError::UnexpectedLineEnding)
            }
            LineEndingMode::Forbidden => Ok(raw),
        }
    }
}

impl Default for Nmea0183Parser {
    fn default() -> Self {
        Nmea0183Parser::new()
    }
}
