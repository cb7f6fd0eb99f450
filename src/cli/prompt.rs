//! Interactive prompts for missing arguments

use crate::error::{Error, Result};
use std::io::{self, BufRead, Write};

/// Reads answers from a line-based input
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter over the process stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter over arbitrary input and output
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Return `value` if present, otherwise ask for it.
    ///
    /// End of input cancels; an empty answer is an error naming `label`.
    pub fn value_or_ask(&mut self, value: Option<String>, question: &str, label: &str) -> Result<String> {
        if let Some(v) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            return Ok(v);
        }

        write!(self.output, "{question}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Cancelled);
        }

        let answer = line.trim();
        if answer.is_empty() {
            return Err(Error::config(format!("{label} cannot be empty")));
        }
        Ok(answer.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_present_value_skips_prompt() {
        let mut p = prompter("");
        let v = p
            .value_or_ask(Some(" abc ".to_string()), "Enter key", "API key")
            .unwrap();
        assert_eq!(v, "abc");
        assert!(p.output.is_empty());
    }

    #[test]
    fn test_reads_and_trims_answer() {
        let mut p = prompter("  report-1 \n");
        let v = p.value_or_ask(None, "Enter FlexReport ID", "FlexReport ID").unwrap();
        assert_eq!(v, "report-1");
        assert_eq!(String::from_utf8(p.output).unwrap(), "Enter FlexReport ID: ");
    }

    #[test]
    fn test_blank_value_falls_back_to_prompt() {
        let mut p = prompter("typed\n");
        let v = p.value_or_ask(Some("  ".to_string()), "Q", "L").unwrap();
        assert_eq!(v, "typed");
    }

    #[test]
    fn test_empty_answer_is_error() {
        let mut p = prompter("\n");
        let err = p.value_or_ask(None, "Enter key", "API key").unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: API key cannot be empty");
    }

    #[test]
    fn test_eof_cancels() {
        let mut p = prompter("");
        let err = p.value_or_ask(None, "Enter key", "API key").unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }
}
