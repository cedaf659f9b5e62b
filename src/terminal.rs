//! Terminal capability detection and line-based interaction

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use owo_colors::{colors::css, OwoColorize};

mod table;
pub use table::Table;

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Color as error (red)
    fn error(&self) -> String;
    /// Color as info (blue)
    fn info(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
    /// Embolden the text
    fn heading(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if supports_color() {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if supports_color() {
            self.fg::<css::Orange>().to_string()
        } else {
            self.to_string()
        }
    }

    fn error(&self) -> String {
        if supports_color() {
            self.fg::<css::Red>().to_string()
        } else {
            self.to_string()
        }
    }

    fn info(&self) -> String {
        if supports_color() {
            self.fg::<css::LightBlue>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }

    fn heading(&self) -> String {
        if supports_color() {
            self.bold().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn error(&self) -> String {
        self.as_str().error()
    }

    fn info(&self) -> String {
        self.as_str().info()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }

    fn heading(&self) -> String {
        self.as_str().heading()
    }
}

/// A line-oriented conversation with the operator.
///
/// Every interactive step blocks on exactly one line of input.
pub trait Console {
    /// Shows `prompt` and reads one line, with surrounding whitespace trimmed.
    ///
    /// Returns `None` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be written or the line cannot be
    /// read.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Writes one line of output.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn print(&mut self, line: &str) -> io::Result<()>;
}

/// A [`Console`] over any reader and writer pair.
#[derive(Debug)]
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R, W> Terminal<R, W> {
    /// Creates a terminal reading from `input` and writing to `output`.
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the terminal, returning its output sink.
    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl Terminal<StdinLock<'static>, Stdout> {
    /// A terminal bound to the process's standard input and output.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for Terminal<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        // invalid UTF-8 is replaced, never an error
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    fn print(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn read_line_trims_and_echoes_prompt() {
        let mut terminal = Terminal::new(Cursor::new("  Ana Paula \n"), Vec::new());

        let line = terminal.read_line("Name: ").unwrap();

        assert_eq!(line.as_deref(), Some("Ana Paula"));
        assert_eq!(terminal.into_output(), b"Name: ");
    }

    #[test]
    fn read_line_returns_none_at_end_of_input() {
        let mut terminal = Terminal::new(Cursor::new("only\n"), Vec::new());

        assert_eq!(terminal.read_line("").unwrap().as_deref(), Some("only"));
        assert_eq!(terminal.read_line("").unwrap(), None);
    }

    #[test]
    fn blank_line_is_empty_not_none() {
        let mut terminal = Terminal::new(Cursor::new("\n"), Vec::new());
        assert_eq!(terminal.read_line("").unwrap().as_deref(), Some(""));
    }

    #[test]
    fn invalid_utf8_is_replaced_not_an_error() {
        let mut terminal = Terminal::new(Cursor::new(b"Jo\xe3o\n".to_vec()), Vec::new());

        let line = terminal.read_line("").unwrap();

        assert_eq!(line.as_deref(), Some("Jo\u{FFFD}o"));
        assert_eq!(terminal.read_line("").unwrap(), None);
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let mut terminal = Terminal::new(Cursor::new("0"), Vec::new());
        assert_eq!(terminal.read_line("").unwrap().as_deref(), Some("0"));
    }

    #[test]
    fn print_appends_newline() {
        let mut terminal = Terminal::new(Cursor::new(""), Vec::new());
        terminal.print("hello").unwrap();
        assert_eq!(terminal.into_output(), b"hello\n");
    }
}
