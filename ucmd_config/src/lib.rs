//! Compile-time limits and defaults shared by the uCmd crates.
//!
//! Tune these for the target: every buffer in `ucmd_core` is sized from them,
//! so nothing here costs heap.

#![no_std]

/// Maximum number of arguments a single line may carry.
pub const MAX_ARGS: usize = 10;

/// Maximum length (bytes) of one input line read from the transport.
pub const INPUT_MAX_LEN: usize = 128;

/// Sentinel used by firmware-style configuration for "no framing char".
pub const UNSET_CHAR: char = '\0';

/// Default separator between the command name and its arguments.
pub const DEFAULT_DELIMITER: char = ' ';

/// Reserved literal that lists the command dictionary instead of dispatching.
pub const HELP_COMMAND: &str = "help";

/// Header written before the help listing.
pub const HELP_HEADER: &str = "Command dictionary:";

/// How long the transport may wait for the rest of a line (milliseconds).
pub const READ_TIMEOUT_MS: u64 = 100;
