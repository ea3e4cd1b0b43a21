// file: src/ui/input.rs
// description: line input sources for the chat shell
// reference: dialoguer prompts for terminals, buffered lines for pipes

use crate::error::{AgentError, Result};
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use std::io::{self, BufRead, IsTerminal};

/// Blocking source of user lines. `Ok(None)` means the input is exhausted.
pub trait LineSource: Send {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

pub struct TerminalInput {
    theme: ColorfulTheme,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let read = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text();

        match read {
            Ok(line) => Ok(Some(line)),
            Err(dialoguer::Error::IO(e))
                if matches!(
                    e.kind(),
                    io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted
                ) =>
            {
                Ok(None)
            }
            Err(dialoguer::Error::IO(e)) => Err(AgentError::Io(e)),
        }
    }
}

/// Reads one line per turn from any buffered reader, e.g. piped stdin.
pub struct ReaderInput<R> {
    reader: R,
}

impl<R: BufRead + Send> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead + Send> LineSource for ReaderInput<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Interactive prompt when stdin is a terminal, plain line reads otherwise.
pub fn stdin_source() -> Box<dyn LineSource> {
    if io::stdin().is_terminal() {
        Box::new(TerminalInput::new())
    } else {
        Box::new(ReaderInput::new(io::BufReader::new(io::stdin())))
    }
}

impl LineSource for Box<dyn LineSource> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        (**self).read_line(prompt)
    }
}
