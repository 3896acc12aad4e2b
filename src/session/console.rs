//! Line-oriented terminal abstraction.
//!
//! The pager and the session talk to the user only through [`Console`], so
//! tests can script input and capture output with in-memory buffers.

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Prompted line input plus line output.
pub trait Console {
    /// Show `prompt` and read one line without its line terminator.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Print one line of output.
    fn print_line(&mut self, line: &str) -> Result<()>;
}

/// A [`Console`] over any buffered reader and writer.
#[derive(Debug)]
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LineConsole { input, output }
    }

    /// Consume the console, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl LineConsole<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's standard streams.
    pub fn stdio() -> Self {
        LineConsole::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            // Keep the transcript readable when input ends mid-prompt.
            writeln!(self.output)?;
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn print_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }
}
