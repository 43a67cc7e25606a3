//! Parser settings: optional framing chars and the argument delimiter.

use ucmd_config::{DEFAULT_DELIMITER, UNSET_CHAR};

use crate::error::ConfigError;

/// Framing and delimiter settings read by every `process` call.
///
/// `None` means the framing char is not required. The three fields are
/// independent; [`ParserConfig::new`] validates combinations, while the raw
/// setters on [`crate::Dispatcher`] accept anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParserConfig {
    pub start_char: Option<char>,
    pub stop_char: Option<char>,
    pub delimiter: char,
}

impl Default for ParserConfig {
    /// No framing, space-delimited.
    fn default() -> Self {
        Self {
            start_char: None,
            stop_char: None,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl ParserConfig {
    /// Build a validated configuration.
    ///
    /// Rejects whitespace framing chars (lines are trimmed before the framing
    /// check, so they could never match) and a delimiter that doubles as a
    /// framing char.
    pub fn new(
        start_char: Option<char>,
        stop_char: Option<char>,
        delimiter: char,
    ) -> Result<Self, ConfigError> {
        for frame in [start_char, stop_char].into_iter().flatten() {
            if frame.is_whitespace() {
                return Err(ConfigError::WhitespaceFrameChar(frame));
            }
            if frame == delimiter {
                return Err(ConfigError::DelimiterIsFrameChar(delimiter));
            }
        }
        Ok(Self { start_char, stop_char, delimiter })
    }

    /// Firmware-style constructor: [`UNSET_CHAR`] (NUL) disables a framing char.
    pub fn from_raw_chars(start: char, stop: char, delimiter: char) -> Result<Self, ConfigError> {
        Self::new(frame_char(start), frame_char(stop), delimiter)
    }

    /// Same settings with a different start char.
    pub const fn with_start_char(mut self, start_char: Option<char>) -> Self {
        self.start_char = start_char;
        self
    }

    /// Same settings with a different stop char.
    pub const fn with_stop_char(mut self, stop_char: Option<char>) -> Self {
        self.stop_char = stop_char;
        self
    }

    /// Same settings with a different delimiter.
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Map the NUL sentinel to "unset".
pub const fn frame_char(c: char) -> Option<char> {
    if c == UNSET_CHAR { None } else { Some(c) }
}
