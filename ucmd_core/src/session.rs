//! Glue between a byte-stream transport and the [`Dispatcher`].
//!
//! The transport is abstracted as a [`LineSource`]; output goes to any
//! `core::fmt::Write` sink (a UART writer, a `heapless::String`, stdout...).

use core::fmt::Write;
use core::time::Duration;

use heapless::String;
use ucmd_config::READ_TIMEOUT_MS;

use crate::dispatcher::Dispatcher;
use crate::error::CmdError;

/// A transport able to hand over complete lines.
///
/// `IML` is the maximum line length; longer lines are truncated by the source.
pub trait LineSource<const IML: usize> {
    /// Is a full line ready to be read?
    fn line_available(&mut self) -> bool;

    /// Read the pending line, waiting at most `timeout` for it to complete.
    fn read_line(&mut self, timeout: Duration) -> Option<String<IML>>;
}

/// Replays a fixed list of lines. Handy for tests and scripted start-up.
pub struct SliceSource<'s> {
    lines: &'s [&'s str],
    next: usize,
}

impl<'s> SliceSource<'s> {
    pub const fn new(lines: &'s [&'s str]) -> Self {
        Self { lines, next: 0 }
    }

    /// Lines not yet read.
    pub fn remaining(&self) -> usize {
        self.lines.len() - self.next
    }
}

impl<const IML: usize> LineSource<IML> for SliceSource<'_> {
    fn line_available(&mut self) -> bool {
        self.next < self.lines.len()
    }

    fn read_line(&mut self, _timeout: Duration) -> Option<String<IML>> {
        let line = self.lines.get(self.next)?;
        self.next += 1;
        let mut buf = String::new();
        for c in line.chars() {
            if buf.push(c).is_err() {
                break; // truncate
            }
        }
        Some(buf)
    }
}

/// Polls a [`LineSource`] and feeds complete lines to a [`Dispatcher`].
///
/// Each handled line is preceded by an empty line on the output. The reserved
/// builtins (`help`) are answered from the registry; anything else is echoed
/// and then processed.
pub struct Session<'a, const MAX: usize> {
    dispatcher: Dispatcher<'a, MAX>,
    timeout: Duration,
}

impl<'a, const MAX: usize> Session<'a, MAX> {
    pub const fn new(dispatcher: Dispatcher<'a, MAX>) -> Self {
        Self {
            dispatcher,
            timeout: Duration::from_millis(READ_TIMEOUT_MS),
        }
    }

    /// Override the per-line read timeout.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub const fn dispatcher(&self) -> &Dispatcher<'a, MAX> {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<'a, MAX> {
        &mut self.dispatcher
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Handle at most one line from `source`.
    ///
    /// Returns `Ok(())` when nothing was pending, when a builtin ran, or when
    /// the dispatched command succeeded; otherwise the dispatch error.
    /// Output sink failures are ignored.
    pub fn poll<S, W, const IML: usize>(&self, source: &mut S, out: &mut W) -> Result<(), CmdError>
    where
        S: LineSource<IML>,
        W: Write,
    {
        if !source.line_available() {
            return Ok(());
        }
        match source.read_line(self.timeout) {
            Some(line) => self.handle_line(&line, out),
            None => Ok(()),
        }
    }

    /// Handle one already-read line.
    pub fn handle_line<W: Write>(&self, line: &str, out: &mut W) -> Result<(), CmdError> {
        let line = line.trim();
        let _ = writeln!(out);

        let registry = self.dispatcher.registry();
        if let Some(builtin) = registry.builtin(line) {
            trace!("builtin {=str}", builtin.name());
            let _ = builtin.run(registry, out);
            return Ok(());
        }

        let _ = writeln!(out, "{}", line);
        self.dispatcher.process(line)
    }
}
