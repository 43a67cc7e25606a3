//! Framing check, name/argument split, lookup and invocation.
//!
//! A [`Dispatcher`] is a plain value: configuration and registry live in it
//! rather than in globals, so several independent parsers can coexist. It is
//! not internally synchronised; share it across execution contexts only behind
//! whatever lock the platform provides.

use ucmd_config::MAX_ARGS;

use crate::config::ParserConfig;
use crate::error::CmdError;
use crate::registry::{CommandRegistry, CommandSpec};
use crate::tokenizer::{Args, split_args};

/// A line split into its command name and arguments. Lives for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'l, const N: usize> {
    pub name: &'l str,
    pub args: Args<'l, N>,
}

impl<const N: usize> ParsedLine<'_, N> {
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

/// Parser/dispatcher with room for `MAX` arguments per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher<'a, const MAX: usize> {
    config: ParserConfig,
    registry: CommandRegistry<'a>,
}

/// Dispatcher sized with the crate-wide argument limit.
pub type DefaultDispatcher<'a> = Dispatcher<'a, MAX_ARGS>;

impl<'a, const MAX: usize> Dispatcher<'a, MAX> {
    /// A dispatcher with an empty registry.
    pub const fn new(config: ParserConfig) -> Self {
        Self {
            config,
            registry: CommandRegistry::new(&[]),
        }
    }

    /// A dispatcher ready to process lines.
    pub const fn with_registry(config: ParserConfig, specs: &'a [CommandSpec<'a>]) -> Self {
        Self {
            config,
            registry: CommandRegistry::new(specs),
        }
    }

    /// Set all three parser chars at once. No validation.
    pub fn configure(&mut self, start_char: Option<char>, stop_char: Option<char>, delimiter: char) {
        self.config = ParserConfig {
            start_char,
            stop_char,
            delimiter,
        };
    }

    pub fn set_start_char(&mut self, start_char: Option<char>) {
        self.config.start_char = start_char;
    }

    pub fn set_stop_char(&mut self, stop_char: Option<char>) {
        self.config.stop_char = stop_char;
    }

    pub fn set_delimiter(&mut self, delimiter: char) {
        self.config.delimiter = delimiter;
    }

    /// Replace the command dictionary. The table is borrowed, not copied.
    pub fn set_registry(&mut self, specs: &'a [CommandSpec<'a>]) {
        self.registry = CommandRegistry::new(specs);
        debug!("registry set: {} commands", specs.len());
    }

    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub const fn registry(&self) -> &CommandRegistry<'a> {
        &self.registry
    }

    /// Check framing and split `raw` into name and arguments.
    ///
    /// The line is trimmed, then the start char (if set) must be its first
    /// char and the stop char (if set) its last; each is removed once matched.
    /// Everything before the first delimiter is the name. The rest, trimmed,
    /// is split into arguments unless it is empty.
    pub fn parse<'l>(&self, raw: &'l str) -> Result<ParsedLine<'l, MAX>, CmdError> {
        let mut line = raw.trim();

        if let Some(start) = self.config.start_char {
            line = line.strip_prefix(start).ok_or_else(|| {
                warn!("missing start char");
                CmdError::MissingStartChar
            })?;
        }

        if let Some(stop) = self.config.stop_char {
            line = line.strip_suffix(stop).ok_or_else(|| {
                warn!("missing stop char");
                CmdError::MissingStopChar
            })?;
        }

        let (name, arg_text) = match line.split_once(self.config.delimiter) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let args = if arg_text.is_empty() {
            Args::new()
        } else {
            split_args::<MAX>(arg_text, self.config.delimiter)?
        };

        Ok(ParsedLine { name, args })
    }

    /// Parse `raw`, find its command and run the handler.
    ///
    /// Returns the handler's own result unchanged, or
    /// [`CmdError::NoMatchingCommand`] if no entry has the parsed name.
    pub fn process(&self, raw: &str) -> Result<(), CmdError> {
        let parsed = self.parse(raw)?;

        let spec = self.registry.find(parsed.name).ok_or_else(|| {
            debug!("no command named {=str}", parsed.name);
            CmdError::NoMatchingCommand
        })?;

        trace!("dispatch {=str} with {} args", spec.name, parsed.arg_count());
        let result = spec.handler.call(&parsed.args);
        if let Err(err) = result {
            debug!("{=str} failed: {}", spec.name, err);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Handler;
    use core::cell::{Cell, RefCell};
    use std::string::{String, ToString};
    use std::vec::Vec;

    /// Handler that records every call it receives.
    struct Recorder {
        calls: RefCell<Vec<Vec<String>>>,
        result: Cell<Result<(), CmdError>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                result: Cell::new(Ok(())),
            }
        }

        fn returning(result: Result<(), CmdError>) -> Self {
            let rec = Self::new();
            rec.result.set(result);
            rec
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.borrow().clone()
        }
    }

    impl Handler for Recorder {
        fn call(&self, args: &[&str]) -> Result<(), CmdError> {
            self.calls
                .borrow_mut()
                .push(args.iter().map(|a| a.to_string()).collect());
            self.result.get()
        }
    }

    fn framed() -> ParserConfig {
        ParserConfig::new(Some('<'), Some('>'), ' ').unwrap()
    }

    #[test]
    fn test_dispatch_passes_args() {
        let cmd = Recorder::new();
        let specs = [CommandSpec::new("cmd", &cmd)];
        let dispatcher = DefaultDispatcher::with_registry(ParserConfig::default(), &specs);

        assert_eq!(dispatcher.process("cmd a b"), Ok(()));
        assert_eq!(cmd.calls(), vec![vec!["a".to_string(), "b".to_string()]]);
    }

    #[test]
    fn test_handler_result_is_returned_verbatim() {
        let cmd = Recorder::returning(Err(CmdError::TooFewArgs));
        let specs = [CommandSpec::new("cmd", &cmd)];
        let dispatcher = DefaultDispatcher::with_registry(ParserConfig::default(), &specs);

        assert_eq!(dispatcher.process("cmd a b"), Err(CmdError::TooFewArgs));
        assert_eq!(cmd.calls().len(), 1);
    }

    #[test]
    fn test_no_args() {
        let cmd = Recorder::new();
        let specs = [CommandSpec::new("reboot", &cmd)];
        let dispatcher = DefaultDispatcher::with_registry(ParserConfig::default(), &specs);

        assert_eq!(dispatcher.process("  reboot  "), Ok(()));
        assert_eq!(dispatcher.process("reboot    "), Ok(()));
        assert_eq!(cmd.calls(), vec![Vec::<String>::new(), Vec::new()]);
    }

    #[test]
    fn test_framing_stripped() {
        let cmd = Recorder::new();
        let specs = [CommandSpec::new("cmd", &cmd)];
        let dispatcher = DefaultDispatcher::with_registry(framed(), &specs);

        assert_eq!(dispatcher.process("<cmd arg1>"), Ok(()));
        assert_eq!(cmd.calls(), vec![vec!["arg1".to_string()]]);
    }

    #[test]
    fn test_missing_start_char() {
        let cmd = Recorder::new();
        let specs = [CommandSpec::new("cmd", &cmd)];
        let dispatcher = DefaultDispatcher::with_registry(framed(), &specs);

        assert_eq!(dispatcher.process("cmd arg1>"), Err(CmdError::MissingStartChar));
        assert_eq!(dispatcher.process(""), Err(CmdError::MissingStartChar));
        assert!(cmd.calls().is_empty());
    }

    #[test]
    fn test_missing_stop_char() {
        let cmd = Recorder::new();
        let specs = [CommandSpec::new("cmd", &cmd)];
        let dispatcher = DefaultDispatcher::with_registry(framed(), &specs);

        assert_eq!(dispatcher.process("<cmd arg1"), Err(CmdError::MissingStopChar));
        // the start char alone leaves nothing to carry a stop char
        assert_eq!(dispatcher.process("<"), Err(CmdError::MissingStopChar));
        assert!(cmd.calls().is_empty());
    }

    #[test]
    fn test_stop_char_only() {
        let cmd = Recorder::new();
        let specs = [CommandSpec::new("cmd", &cmd)];
        let mut dispatcher = DefaultDispatcher::with_registry(ParserConfig::default(), &specs);
        dispatcher.set_stop_char(Some(';'));

        assert_eq!(dispatcher.process("cmd 1 2;"), Ok(()));
        assert_eq!(dispatcher.process(""), Err(CmdError::MissingStopChar));
        assert_eq!(cmd.calls(), vec![vec!["1".to_string(), "2".to_string()]]);
    }

    #[test]
    fn test_stop_char_removes_one_char_only() {
        let dispatcher = DefaultDispatcher::new(framed());
        let parsed = dispatcher.parse("<cmd ab>").unwrap();
        assert_eq!(parsed.args.as_slice(), &["ab"]);
    }

    #[test]
    fn test_unknown_command() {
        let cmd = Recorder::new();
        let specs = [CommandSpec::new("cmd", &cmd)];
        let dispatcher = DefaultDispatcher::with_registry(ParserConfig::default(), &specs);

        assert_eq!(dispatcher.process("unknown_cmd"), Err(CmdError::NoMatchingCommand));
        assert_eq!(dispatcher.process("Cmd"), Err(CmdError::NoMatchingCommand));
        assert_eq!(dispatcher.process(""), Err(CmdError::NoMatchingCommand));
        assert!(cmd.calls().is_empty());
    }

    #[test]
    fn test_empty_registry() {
        let dispatcher = DefaultDispatcher::new(ParserConfig::default());
        assert_eq!(dispatcher.process("cmd"), Err(CmdError::NoMatchingCommand));
    }

    #[test]
    fn test_first_registered_match_wins() {
        let first = Recorder::returning(Err(CmdError::InvalidArg));
        let second = Recorder::new();
        let specs = [CommandSpec::new("dup", &first), CommandSpec::new("dup", &second)];
        let dispatcher = DefaultDispatcher::with_registry(ParserConfig::default(), &specs);

        assert_eq!(dispatcher.process("dup"), Err(CmdError::InvalidArg));
        assert_eq!(first.calls().len(), 1);
        assert!(second.calls().is_empty());
    }

    #[test]
    fn test_custom_delimiter() {
        let cmd = Recorder::new();
        let specs = [CommandSpec::new("set", &cmd)];
        let mut dispatcher = DefaultDispatcher::with_registry(ParserConfig::default(), &specs);
        dispatcher.configure(Some('$'), Some('#'), ',');

        assert_eq!(dispatcher.process("  $set,speed,,12#  "), Ok(()));
        assert_eq!(
            cmd.calls(),
            vec![vec!["speed".to_string(), String::new(), "12".to_string()]]
        );
    }

    #[test]
    fn test_name_is_not_trimmed_after_framing() {
        let dispatcher = DefaultDispatcher::new(framed());
        let parsed = dispatcher.parse("< cmd>").unwrap();
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.args.as_slice(), &["cmd"]);
    }

    #[test]
    fn test_too_many_args() {
        let cmd = Recorder::new();
        let specs = [CommandSpec::new("cmd", &cmd)];
        let dispatcher = Dispatcher::<2>::with_registry(ParserConfig::default(), &specs);

        assert_eq!(dispatcher.process("cmd a b"), Ok(()));
        assert_eq!(
            dispatcher.process("cmd a b c"),
            Err(CmdError::ArgLimitExceeded { limit: 2 })
        );
        assert_eq!(cmd.calls().len(), 1);
    }

    #[test]
    fn test_default_limit_is_ten() {
        let dispatcher = DefaultDispatcher::new(ParserConfig::default());
        assert!(dispatcher.parse("cmd 1 2 3 4 5 6 7 8 9 10").is_ok());
        assert_eq!(
            dispatcher.parse("cmd 1 2 3 4 5 6 7 8 9 10 11"),
            Err(CmdError::ArgLimitExceeded { limit: 10 })
        );
    }

    #[test]
    fn test_repeat_registration_is_stateless() {
        let cmd = Recorder::returning(Err(CmdError::InvalidArg));
        let specs = [CommandSpec::new("cmd", &cmd)];
        let mut dispatcher = DefaultDispatcher::new(ParserConfig::default());

        dispatcher.set_registry(&specs);
        let first = dispatcher.process("cmd x");
        dispatcher.set_registry(&specs);
        let second = dispatcher.process("cmd x");

        assert_eq!(first, second);
        assert_eq!(cmd.calls(), vec![vec!["x".to_string()], vec!["x".to_string()]]);
    }

    #[test]
    fn test_registry_replacement_invokes_nothing() {
        let old = Recorder::new();
        let new = Recorder::new();
        let old_specs = [CommandSpec::new("cmd", &old)];
        let new_specs = [CommandSpec::new("cmd", &new)];
        let mut dispatcher = DefaultDispatcher::with_registry(ParserConfig::default(), &old_specs);

        dispatcher.set_registry(&new_specs);
        assert!(old.calls().is_empty());
        assert!(new.calls().is_empty());

        dispatcher.process("cmd").unwrap();
        assert!(old.calls().is_empty());
        assert_eq!(new.calls().len(), 1);
    }

    #[test]
    fn test_independent_instances() {
        let cmd = Recorder::new();
        let specs = [CommandSpec::new("cmd", &cmd)];
        let plain = DefaultDispatcher::with_registry(ParserConfig::default(), &specs);
        let framed = DefaultDispatcher::with_registry(framed(), &specs);

        assert_eq!(plain.process("cmd"), Ok(()));
        assert_eq!(framed.process("cmd"), Err(CmdError::MissingStartChar));
        assert_eq!(framed.process("<cmd>"), Ok(()));
    }

    #[test]
    fn test_parsed_line() {
        let dispatcher = DefaultDispatcher::new(ParserConfig::default());
        let parsed = dispatcher.parse("move 10 -5").unwrap();
        assert_eq!(parsed.name, "move");
        assert_eq!(parsed.arg_count(), 2);
        assert_eq!(parsed.args.as_slice(), &["10", "-5"]);
    }
}
