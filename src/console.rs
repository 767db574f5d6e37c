//! Line-oriented user interaction.
//!
//! Every prompt and every workflow message goes through [`Console`], so the
//! session can be driven from stdin/stdout or from a scripted buffer.

use crate::constants::{
    ERROR_PREFIX, HEADER_WIDTH, INFO_PREFIX, SUCCESS_PREFIX, WARNING_PREFIX,
};
use crate::error::Result;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

pub trait Console {
    /// Reads one line without its terminator. `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>>;

    /// Writes `text` followed by a newline.
    fn write_line(&mut self, text: &str) -> Result<()>;

    /// Writes `text` without a newline and flushes, ready for an answer.
    fn write_prompt(&mut self, text: &str) -> Result<()>;

    /// Shows `prompt` and returns the trimmed answer. End of input reads as empty.
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.write_prompt(prompt)?;
        Ok(self
            .read_line()?
            .map(|line| line.trim().to_string())
            .unwrap_or_default())
    }

    /// Like [`Console::ask`] but shows `[default]` and returns it on empty input.
    fn ask_or(&mut self, label: &str, default: &str) -> Result<String> {
        let answer = self.ask(&format!("{} [{}]: ", label, default))?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    fn header(&mut self, title: &str) -> Result<()> {
        let rule = "=".repeat(HEADER_WIDTH);
        self.write_line("")?;
        self.write_line(&rule)?;
        self.write_line(&format!("  {}", title))?;
        self.write_line(&rule)
    }

    fn info(&mut self, text: &str) -> Result<()> {
        self.write_line(&format!("{} {}", INFO_PREFIX, text))
    }

    fn success(&mut self, text: &str) -> Result<()> {
        self.write_line(&format!("{} {}", SUCCESS_PREFIX, text))
    }

    fn warning(&mut self, text: &str) -> Result<()> {
        self.write_line(&format!("{} {}", WARNING_PREFIX, text))
    }

    fn failure(&mut self, text: &str) -> Result<()> {
        self.write_line(&format!("{} {}", ERROR_PREFIX, text))
    }
}

/// A [`Console`] over any buffered reader and writer.
pub struct TextConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TextConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl TextConsole<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for TextConsole<R, W> {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn write_prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }
}
