//! Line-oriented prompting over any reader/writer pair.

use std::io::{self, BufRead, Write};

/// Prompt failures.
#[derive(Debug)]
pub enum PromptError {
    /// Input reached end of file.
    Closed,
    Io(io::Error),
}

impl From<io::Error> for PromptError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

pub struct Prompter<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Prompter<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Prints `label` without a newline and reads one line, minus the line
    /// terminator.
    pub fn ask(&mut self, label: &str) -> Result<String, PromptError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Asks until the answer parses as a positive integer.
    pub fn ask_positive(&mut self, label: &str) -> Result<usize, PromptError> {
        loop {
            match self.ask(label)?.trim().parse::<i64>() {
                Ok(value) if value < 1 => self.say("Please enter a positive number.")?,
                Ok(value) => match usize::try_from(value) {
                    Ok(count) => return Ok(count),
                    Err(_) => self.say("Please enter a valid number.")?,
                },
                Err(_) => self.say("Please enter a valid number.")?,
            }
        }
    }

    /// Prints one line.
    pub fn say(&mut self, text: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prints text as-is.
    pub fn print(&mut self, text: &str) -> Result<(), PromptError> {
        write!(self.output, "{text}")?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> O {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::{PromptError, Prompter};
    use std::io::Cursor;

    #[test]
    fn ask_strips_line_endings_and_reports_eof() {
        let mut prompter = Prompter::new(Cursor::new("  Alex \r\n"), Vec::new());
        assert_eq!(prompter.ask("Name: ").unwrap(), "  Alex ");
        assert!(matches!(prompter.ask("Name: "), Err(PromptError::Closed)));
    }

    #[test]
    fn ask_positive_reprompts_until_valid() {
        let mut prompter = Prompter::new(Cursor::new("abc\n0\n-2\n3\n"), Vec::new());
        assert_eq!(prompter.ask_positive("Count: ").unwrap(), 3);
        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(output.matches("Please enter a valid number.").count(), 1);
        assert_eq!(output.matches("Please enter a positive number.").count(), 2);
    }

    #[test]
    fn ask_positive_reprompts_on_overflowing_count() {
        let mut prompter = Prompter::new(Cursor::new("99999999999999999999999\n5\n"), Vec::new());
        assert_eq!(prompter.ask_positive("Count: ").unwrap(), 5);
        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(output.matches("Please enter a valid number.").count(), 1);
    }
}
