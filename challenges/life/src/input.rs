use std::io::{BufRead, Write};
use std::str::FromStr;

use log::debug;

use crate::error::InputError;

/// Line-oriented console reader that writes prompts and retries on bad input.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Print `prompt` and read one trimmed line.
    pub fn next_line(&mut self, prompt: &str) -> Result<String, InputError> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        // Bytes that are not UTF-8 become U+FFFD and get rejected by the
        // caller's parser like any other bad entry.
        let mut input = Vec::new();
        if self.reader.read_until(b'\n', &mut input)? == 0 {
            return Err(InputError::Closed(prompt.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&input).trim().to_string())
    }

    /// Report a rejected entry to the user.
    pub fn complain(&mut self, message: &str) -> Result<(), InputError> {
        writeln!(self.writer, "{message}")?;
        Ok(())
    }

    /// Keep asking until `parse` accepts the line.
    pub fn ask<T>(
        &mut self,
        prompt: &str,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> Result<T, InputError> {
        loop {
            let line = self.next_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(message) => {
                    debug!("rejected input {line:?}: {message}");
                    self.complain(&message)?;
                }
            }
        }
    }

    /// Ask for an integer no smaller than `min`.
    pub fn ask_number<T>(&mut self, prompt: &str, min: T) -> Result<T, InputError>
    where
        T: FromStr + PartialOrd + Copy + std::fmt::Display,
    {
        self.ask(prompt, |line| parse_at_least(line, min))
    }

    /// Ask for a single character, upper or lower case, out of `accepted`.
    pub fn ask_choice(&mut self, prompt: &str, accepted: &[char]) -> Result<char, InputError> {
        self.ask(prompt, |line| {
            let choice = single_char(line)
                .map(|c| c.to_ascii_lowercase())
                .filter(|c| accepted.contains(c));
            choice.ok_or_else(|| {
                let options: Vec<String> = accepted.iter().map(char::to_string).collect();
                format!("please enter one of: {}", options.join(", "))
            })
        })
    }
}

/// The only character on the line, if there is exactly one.
pub fn single_char(line: &str) -> Option<char> {
    let mut chars = line.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

pub fn parse_at_least<T>(line: &str, min: T) -> Result<T, String>
where
    T: FromStr + PartialOrd + Copy + std::fmt::Display,
{
    match line.trim().parse::<T>() {
        Ok(value) if value >= min => Ok(value),
        _ => Err(format!("please enter a whole number of at least {min}")),
    }
}
