//! # uCmd core
//!
//! A `no_std`, zero-heap parser and dispatcher for single text lines arriving
//! over a byte-stream transport (typically a UART). A line goes through:
//!
//! 1. framing check (optional start/stop characters),
//! 2. split into command name and delimiter-separated arguments,
//! 3. exact-match lookup in a registration-ordered command dictionary,
//! 4. invocation of the matching [`Handler`].
//!
//! Every failure comes back as a [`CmdError`]; errors produced by handlers are
//! returned to the caller unmodified.
//!
//! ```ignore
//! use ucmd_core::{CmdError, CommandSpec, DefaultDispatcher, ParserConfig};
//!
//! fn led(args: &[&str]) -> Result<(), CmdError> {
//!     match args.first() {
//!         Some(&"on") | Some(&"off") => Ok(()),
//!         _ => Err(CmdError::InvalidArg),
//!     }
//! }
//!
//! const COMMANDS: &[CommandSpec<'static>] = &[CommandSpec::new("led", &led)];
//!
//! let mut dispatcher = DefaultDispatcher::new(ParserConfig::default());
//! dispatcher.set_registry(COMMANDS);
//! dispatcher.process("led on")?;
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod session;
pub mod tokenizer;

pub use config::ParserConfig;
pub use dispatcher::{DefaultDispatcher, Dispatcher, ParsedLine};
pub use error::{CmdError, ConfigError, report};
pub use registry::{Builtin, CommandRegistry, CommandSpec, Handler};
pub use session::{LineSource, Session, SliceSource};
pub use tokenizer::{Args, count_delimiters, split_args};
