use std::io::{BufRead, Write};

use console::{style, Emoji, Term};
use dialoguer::{theme::ColorfulTheme, Input};
use thiserror::Error;

use crate::cli::input::FieldError;

static CROSS: Emoji<'_, '_> = Emoji("❌ ", "x ");

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Input ended")]
    EndOfInput,

    #[error("No valid value for '{prompt}' after {attempts} attempts")]
    AttemptsExhausted { prompt: String, attempts: u32 },

    #[error("Terminal error: {0}")]
    Terminal(#[from] dialoguer::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of user answers for the menu shell.
pub trait Prompter {
    /// Shows `prompt` and returns one raw line of input without the line terminator.
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError>;

    /// Shows one block of shell output. A line break is added after `text`.
    fn output(&mut self, text: &str) -> Result<(), PromptError>;

    /// Tells the user why the last answer was rejected.
    fn report_invalid(&mut self, error: &FieldError) -> Result<(), PromptError>;

    /// Waits for the user to acknowledge the output of an action.
    fn pause(&mut self) -> Result<(), PromptError>;

    fn clear_screen(&mut self) -> Result<(), PromptError> {
        Ok(())
    }
}

pub struct TerminalPrompter {
    term: Term,
    theme: ColorfulTheme,
    pause_enabled: bool,
    clear_enabled: bool,
}

impl TerminalPrompter {
    pub fn new(pause_enabled: bool, clear_enabled: bool) -> Self {
        Self {
            term: Term::stdout(),
            theme: ColorfulTheme::default(),
            pause_enabled,
            clear_enabled,
        }
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term)?;
        Ok(answer)
    }

    fn output(&mut self, text: &str) -> Result<(), PromptError> {
        self.term.write_line(text)?;
        Ok(())
    }

    fn report_invalid(&mut self, error: &FieldError) -> Result<(), PromptError> {
        self.term
            .write_line(&format!("{}{}", CROSS, style(error).red()))?;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PromptError> {
        if !self.pause_enabled {
            return Ok(());
        }
        self.term
            .write_line(&style("Press any key to continue...").dim().to_string())?;
        self.term.read_key()?;
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<(), PromptError> {
        if self.clear_enabled && self.term.is_term() {
            self.term.clear_screen()?;
        }
        Ok(())
    }
}

/// Reads newline separated answers from any reader, echoing each prompt and answer, and
/// all shell output, to `writer`. Used when stdin is not a terminal and by tests.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput);
        }
        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        writeln!(self.writer, "{}: {}", prompt, answer)?;
        Ok(answer)
    }

    fn output(&mut self, text: &str) -> Result<(), PromptError> {
        writeln!(self.writer, "{}", text)?;
        Ok(())
    }

    fn report_invalid(&mut self, error: &FieldError) -> Result<(), PromptError> {
        writeln!(self.writer, "  {}", error)?;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PromptError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_line_prompter_reads_and_echoes() {
        let mut prompter = LinePrompter::new(Cursor::new("first\r\nsecond\n"), Vec::new());
        assert_eq!(prompter.read_line("Name").unwrap(), "first");
        assert_eq!(prompter.read_line("Maker").unwrap(), "second");
        assert!(matches!(
            prompter.read_line("Weight"),
            Err(PromptError::EndOfInput)
        ));

        let transcript = String::from_utf8(prompter.into_writer()).unwrap();
        assert_eq!(transcript, "Name: first\nMaker: second\n");
    }

    #[test]
    fn test_line_prompter_keeps_blank_lines() {
        let mut prompter = LinePrompter::new(Cursor::new("\n  \n"), std::io::sink());
        assert_eq!(prompter.read_line("a").unwrap(), "");
        assert_eq!(prompter.read_line("b").unwrap(), "  ");
    }

    #[test]
    fn test_line_prompter_reports_invalid() {
        let mut prompter = LinePrompter::new(Cursor::new(""), Vec::new());
        prompter.report_invalid(&FieldError::Blank).unwrap();
        let transcript = String::from_utf8(prompter.into_writer()).unwrap();
        assert_eq!(transcript, format!("  {}\n", FieldError::Blank));
    }

    #[test]
    fn test_line_prompter_writes_output() {
        let mut prompter = LinePrompter::new(Cursor::new(""), Vec::new());
        prompter.output("Products sorted by quantity.").unwrap();
        prompter.output("a\nb").unwrap();
        let transcript = String::from_utf8(prompter.into_writer()).unwrap();
        assert_eq!(transcript, "Products sorted by quantity.\na\nb\n");
    }
}
