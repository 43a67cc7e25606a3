//! Host demo: stdin plays the serial port, stdout the terminal.

use std::io::{self, BufRead, Write as _};
use std::time::Duration;

use heapless::String;
use ucmd_config::INPUT_MAX_LEN;
use ucmd_core::{DefaultDispatcher, LineSource, ParserConfig, Session, report};
use ucmd_dispatcher::define_commands;

use usercode::commands as uc;

define_commands! {
    mod commands;
    uc::led,
    uc::add,
    uc::baud,
    uc::reboot,
    "echo" => uc::echo_args,
}

/// Line source over any buffered reader. Blocks on read; the timeout is
/// meaningless for a terminal and ignored.
struct ReaderSource<R> {
    reader: R,
    eof: bool,
}

impl<R: BufRead> ReaderSource<R> {
    fn new(reader: R) -> Self {
        Self { reader, eof: false }
    }
}

impl<R: BufRead> LineSource<INPUT_MAX_LEN> for ReaderSource<R> {
    fn line_available(&mut self) -> bool {
        if self.eof {
            return false;
        }
        match self.reader.fill_buf() {
            Ok(buf) if !buf.is_empty() => true,
            _ => {
                self.eof = true;
                false
            }
        }
    }

    fn read_line(&mut self, _timeout: Duration) -> Option<String<INPUT_MAX_LEN>> {
        let mut raw = std::string::String::new();
        match self.reader.read_line(&mut raw) {
            Ok(0) | Err(_) => {
                self.eof = true;
                None
            }
            Ok(_) => {
                let mut line = String::new();
                for c in raw.chars() {
                    if line.push(c).is_err() {
                        println!("⚠️ line truncated to {} bytes", INPUT_MAX_LEN);
                        break;
                    }
                }
                Some(line)
            }
        }
    }
}

/// `core::fmt::Write` adapter over stdout.
struct Stdout;

impl core::fmt::Write for Stdout {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        print!("{}", s);
        Ok(())
    }
}

fn main() {
    let mut dispatcher = DefaultDispatcher::new(ParserConfig::default());
    dispatcher.set_registry(commands::COMMANDS);
    let session = Session::new(dispatcher);

    let stdin = io::stdin();
    let mut source = ReaderSource::new(stdin.lock());
    let mut out = Stdout;

    println!("uCmd demo: {} commands (try 'help', Ctrl-D to quit)", commands::NUM_COMMANDS);

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        if !LineSource::<INPUT_MAX_LEN>::line_available(&mut source) {
            println!("\n⛔ Input closed...");
            break;
        }

        let result = session.poll::<_, _, INPUT_MAX_LEN>(&mut source, &mut out);
        match result {
            Ok(()) => {}
            Err(_) => {
                print!("❌ ");
                let _ = report(&result, &mut out);
            }
        }
    }
}
