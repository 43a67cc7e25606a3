//! Error taxonomy shared by the tokenizer, the dispatcher and the handlers.
//!
//! The `Display` text of every [`CmdError`] is the fixed line shown to the
//! operator; [`report`] is the helper the transport side uses to emit it.

use core::fmt::Write;

use thiserror::Error;

/// Everything that can go wrong while parsing or running a command line.
///
/// All variants are recoverable; the dispatcher never retries or swallows
/// them. Handlers return the same type, so a handler may report any of these
/// (the arity and argument variants exist mostly for them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CmdError {
    /// A start char is configured but the line does not begin with it.
    #[error("Missing start character")]
    MissingStartChar,

    /// A stop char is configured but the line does not end with it.
    #[error("Missing stop character")]
    MissingStopChar,

    /// Reserved; not raised by the parser.
    #[error("Missing delimiter character")]
    MissingDelimiter,

    /// Reserved; not raised by the parser.
    #[error("Invalid command")]
    InvalidCommand,

    /// No dictionary entry carries the parsed name.
    #[error("No matching command")]
    NoMatchingCommand,

    /// Handler-level arity check.
    #[error("Too few args")]
    TooFewArgs,

    /// Handler-level arity check.
    #[error("Too many args")]
    TooManyArgs,

    /// The argument text was empty after trimming.
    #[error("No args")]
    NoArgs,

    /// Handler-level value check.
    #[error("Invalid argument")]
    InvalidArg,

    /// The line holds more arguments than the argument buffer can take.
    #[error("Argument limit exceeded (max {limit})")]
    ArgLimitExceeded { limit: usize },
}

impl CmdError {
    /// Fixed operator-facing text for this error.
    ///
    /// Same wording as `Display`, minus the limit detail, for targets that
    /// would rather not pull in formatting machinery.
    pub const fn message(&self) -> &'static str {
        match self {
            CmdError::MissingStartChar => "Missing start character",
            CmdError::MissingStopChar => "Missing stop character",
            CmdError::MissingDelimiter => "Missing delimiter character",
            CmdError::InvalidCommand => "Invalid command",
            CmdError::NoMatchingCommand => "No matching command",
            CmdError::TooFewArgs => "Too few args",
            CmdError::TooManyArgs => "Too many args",
            CmdError::NoArgs => "No args",
            CmdError::InvalidArg => "Invalid argument",
            CmdError::ArgLimitExceeded { .. } => "Argument limit exceeded",
        }
    }
}

/// Rejected [`crate::ParserConfig`] combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The delimiter equals the start or stop char.
    #[error("delimiter {0:?} is also used as a framing character")]
    DelimiterIsFrameChar(char),

    /// Framing chars are matched after trimming, so whitespace can never match.
    #[error("framing character {0:?} is whitespace")]
    WhitespaceFrameChar(char),
}

/// Write the outcome of a `process` call to `out`.
///
/// `Ok(())` produces no output; an error produces exactly one line.
pub fn report<W: Write>(result: &Result<(), CmdError>, out: &mut W) -> core::fmt::Result {
    match result {
        Ok(()) => Ok(()),
        Err(err) => writeln!(out, "{}", err),
    }
}
