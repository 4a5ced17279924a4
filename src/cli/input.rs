use thiserror::Error;
use tracing::{debug, warn};

use crate::cli::prompt::{PromptError, Prompter};

/// Why a typed answer was rejected. Always recovered by asking again.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("A value is required.")]
    Blank,

    #[error("'{0}' is not a whole number.")]
    NotAnInteger(String),

    #[error("'{0}' is not a number.")]
    NotANumber(String),

    #[error("Value must be {0}.")]
    OutOfRange(String),
}

pub fn parse_non_empty(raw: &str) -> Result<String, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::Blank);
    }
    Ok(value.to_string())
}

pub fn parse_int_at_least(raw: &str, min: i32) -> Result<i32, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::Blank);
    }
    let number: i32 = value
        .parse()
        .map_err(|_| FieldError::NotAnInteger(value.to_string()))?;
    if number < min {
        return Err(FieldError::OutOfRange(format!(">= {}", min)));
    }
    Ok(number)
}

/// Accepts `,` as the decimal separator. `NaN` and infinities are not numbers here, and
/// `-0` reads as `0`.
fn parse_number(raw: &str) -> Result<f64, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::Blank);
    }
    let number: f64 = value
        .replace(',', ".")
        .parse()
        .map_err(|_| FieldError::NotANumber(value.to_string()))?;
    if !number.is_finite() {
        return Err(FieldError::NotANumber(value.to_string()));
    }
    if number == 0.0 {
        return Ok(0.0);
    }
    Ok(number)
}

pub fn parse_number_above(raw: &str, min_exclusive: f64) -> Result<f64, FieldError> {
    let number = parse_number(raw)?;
    if number <= min_exclusive {
        return Err(FieldError::OutOfRange(format!("> {}", min_exclusive)));
    }
    Ok(number)
}

pub fn parse_number_at_least(raw: &str, min_inclusive: f64) -> Result<f64, FieldError> {
    let number = parse_number(raw)?;
    if number < min_inclusive {
        return Err(FieldError::OutOfRange(format!(">= {}", min_inclusive)));
    }
    Ok(number)
}

/// Asks the same question until the answer parses. With `max_attempts` set the loop gives
/// up after that many rejected answers.
pub struct InputReader<'a, P: Prompter + ?Sized> {
    prompter: &'a mut P,
    max_attempts: Option<u32>,
}

impl<'a, P: Prompter + ?Sized> InputReader<'a, P> {
    pub fn new(prompter: &'a mut P, max_attempts: Option<u32>) -> Self {
        Self {
            prompter,
            max_attempts,
        }
    }

    pub fn output(&mut self, text: &str) -> Result<(), PromptError> {
        self.prompter.output(text)
    }

    pub fn read_until_valid<T, F>(&mut self, prompt: &str, parse: F) -> Result<T, PromptError>
    where
        F: Fn(&str) -> Result<T, FieldError>,
    {
        let mut rejected = 0u32;
        loop {
            let raw = self.prompter.read_line(prompt)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    rejected += 1;
                    warn!("Rejected answer for '{}': {}", prompt, e);
                    self.prompter.report_invalid(&e)?;

                    if let Some(max) = self.max_attempts {
                        if rejected >= max {
                            debug!("Giving up on '{}' after {} attempts", prompt, rejected);
                            return Err(PromptError::AttemptsExhausted {
                                prompt: prompt.to_string(),
                                attempts: rejected,
                            });
                        }
                    }
                }
            }
        }
    }

    pub fn read_non_empty(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.read_until_valid(prompt, parse_non_empty)
    }

    pub fn read_int(&mut self, prompt: &str, min: i32) -> Result<i32, PromptError> {
        self.read_until_valid(prompt, |raw| parse_int_at_least(raw, min))
    }

    pub fn read_number_above(
        &mut self,
        prompt: &str,
        min_exclusive: f64,
    ) -> Result<f64, PromptError> {
        self.read_until_valid(prompt, |raw| parse_number_above(raw, min_exclusive))
    }

    pub fn read_number_at_least(
        &mut self,
        prompt: &str,
        min_inclusive: f64,
    ) -> Result<f64, PromptError> {
        self.read_until_valid(prompt, |raw| parse_number_at_least(raw, min_inclusive))
    }
}
