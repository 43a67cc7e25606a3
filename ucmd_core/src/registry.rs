//! Command dictionary: `(name, handler)` pairs in registration order.
//!
//! The registry borrows the spec table; it never copies or owns it, so the
//! table must outlive every `process` call. On firmware that is usually a
//! `const` table generated by `define_commands!`.

use core::fmt::{self, Write};

use ucmd_config::{HELP_COMMAND, HELP_HEADER};

use crate::error::CmdError;

/// Something that can run a command.
///
/// `args.len()` is the argument count. Return `Ok(())` on success; any error
/// is handed back to the caller of `process` verbatim.
pub trait Handler {
    fn call(&self, args: &[&str]) -> Result<(), CmdError>;
}

impl<F> Handler for F
where
    F: Fn(&[&str]) -> Result<(), CmdError>,
{
    #[inline(always)]
    fn call(&self, args: &[&str]) -> Result<(), CmdError> {
        self(args)
    }
}

/// One dictionary entry. Immutable once built.
#[derive(Clone, Copy)]
pub struct CommandSpec<'a> {
    pub name: &'a str,
    pub handler: &'a dyn Handler,
}

impl<'a> CommandSpec<'a> {
    pub const fn new(name: &'a str, handler: &'a dyn Handler) -> Self {
        Self { name, handler }
    }
}

impl fmt::Debug for CommandSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Entries every registry answers to without registration.
///
/// They are matched against the whole trimmed line, before framing checks and
/// before normal dispatch, and shadow registered commands of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Builtin {
    /// List every registered name in registration order.
    Help,
}

impl Builtin {
    pub const fn name(&self) -> &'static str {
        match self {
            Builtin::Help => HELP_COMMAND,
        }
    }

    /// Run the builtin against `registry`, writing its output to `out`.
    pub fn run<W: Write>(&self, registry: &CommandRegistry<'_>, out: &mut W) -> fmt::Result {
        match self {
            Builtin::Help => registry.write_help(out),
        }
    }
}

/// Borrowed, ordered view over a spec table.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRegistry<'a> {
    specs: &'a [CommandSpec<'a>],
}

impl<'a> CommandRegistry<'a> {
    pub const fn new(specs: &'a [CommandSpec<'a>]) -> Self {
        Self { specs }
    }

    pub const fn len(&self) -> usize {
        self.specs.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> core::slice::Iter<'a, CommandSpec<'a>> {
        self.specs.iter()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.specs.iter().map(|spec| spec.name)
    }

    /// First entry whose name equals `name` exactly (case-sensitive).
    pub fn find(&self, name: &str) -> Option<&'a CommandSpec<'a>> {
        self.iter().find(|spec| spec.name == name)
    }

    /// The builtin entry named `line`, if any.
    pub fn builtin(&self, line: &str) -> Option<Builtin> {
        [Builtin::Help].into_iter().find(|b| b.name() == line)
    }

    /// Write the dictionary listing: a header, then one name per line.
    pub fn write_help<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "{}", HELP_HEADER)?;
        for name in self.names() {
            writeln!(out, "{}", name)?;
        }
        Ok(())
    }
}
