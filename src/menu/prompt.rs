//! Numbered-menu prompt with a bounded retry budget
//!
//! Accepts an index in `[1, N]` or `q`/`Q`. EOF before any rejected token is a
//! quit; EOF after one, or running out of attempts, is [`InputError::Exhausted`].

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{InputError, Result};
use crate::menu::Theme;

/// Default number of prompts shown before giving up
pub const DEFAULT_ATTEMPTS: usize = 3;

/// A single interpreted input token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Zero-based index into the listed items
    Select(usize),
    /// Leave without acting
    Quit,
    /// Rejected token, with the reason shown to the user
    Invalid(String),
}

/// Interpret one line of input against a menu of `count` items
pub fn parse_choice(token: &str, count: usize) -> Choice {
    let token = token.trim();

    if token.eq_ignore_ascii_case("q") {
        return Choice::Quit;
    }
    if token.is_empty() {
        return Choice::Invalid("Please enter a number or 'q'".to_string());
    }

    match token.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::Select(n - 1),
        Ok(n) => Choice::Invalid(format!("{n} is not between 1 and {count}")),
        Err(_) => Choice::Invalid(format!("'{token}' is not a number")),
    }
}

/// Prompt settings
#[derive(Debug, Clone)]
pub struct Prompt<'a> {
    /// Text shown before the cursor, e.g. "Switch to #"
    pub label: &'a str,
    /// Number of selectable items
    pub count: usize,
    /// Prompts shown before giving up
    pub max_attempts: usize,
}

impl<'a> Prompt<'a> {
    pub fn new(label: &'a str, count: usize) -> Self {
        Self {
            label,
            count,
            max_attempts: DEFAULT_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Read lines until a valid choice; `Ok(None)` means quit
    pub fn read<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
        theme: &Theme,
    ) -> Result<Option<usize>> {
        let mut rejected = 0usize;

        while rejected < self.max_attempts {
            write!(out, "\n{} (or 'q'): ", theme.paint(self.label, theme.prompt))?;
            out.flush()?;

            let mut line = String::new();
            let read = input.read_line(&mut line).map_err(InputError::Read)?;
            if read == 0 {
                writeln!(out)?;
                if rejected == 0 {
                    debug!("EOF at prompt, quitting");
                    return Ok(None);
                }
                return Err(InputError::Exhausted { attempts: rejected }.into());
            }

            match parse_choice(&line, self.count) {
                Choice::Select(index) => return Ok(Some(index)),
                Choice::Quit => return Ok(None),
                Choice::Invalid(reason) => {
                    rejected += 1;
                    debug!("Rejected input {:?} ({}/{})", line.trim(), rejected, self.max_attempts);
                    writeln!(out, "{}", theme.paint(reason, theme.error))?;
                }
            }
        }

        Err(InputError::Exhausted {
            attempts: self.max_attempts,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    fn run(input: &str, count: usize) -> (Result<Option<usize>>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = Prompt::new("Pick #", count).read(&mut reader, &mut out, &Theme::plain());
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1", 2), Choice::Select(0));
        assert_eq!(parse_choice(" 2 \n", 2), Choice::Select(1));
        assert_eq!(parse_choice("q", 2), Choice::Quit);
        assert_eq!(parse_choice("Q\n", 2), Choice::Quit);
        assert!(matches!(parse_choice("0", 2), Choice::Invalid(_)));
        assert!(matches!(parse_choice("3", 2), Choice::Invalid(_)));
        assert!(matches!(parse_choice("-1", 2), Choice::Invalid(_)));
        assert!(matches!(parse_choice("docs", 2), Choice::Invalid(_)));
        assert!(matches!(parse_choice("", 2), Choice::Invalid(_)));
        assert!(matches!(parse_choice("1", 0), Choice::Invalid(_)));
    }

    #[test]
    fn test_valid_selection() {
        let (result, _) = run("2\n", 3);
        assert_eq!(result.unwrap(), Some(1));
    }

    #[test]
    fn test_quit_and_immediate_eof() {
        assert_eq!(run("q\n", 3).0.unwrap(), None);
        assert_eq!(run("", 3).0.unwrap(), None);
    }

    #[test]
    fn test_reprompt_then_select() {
        let (result, out) = run("9\n1\n", 1);
        assert_eq!(result.unwrap(), Some(0));
        assert_eq!(out.matches("Pick # (or 'q'): ").count(), 2);
        assert!(out.contains("9 is not between 1 and 1"));
    }

    #[test]
    fn test_budget_exhausted() {
        let (result, out) = run("x\ny\nz\n1\n", 2);
        assert!(matches!(
            result,
            Err(Error::Input(InputError::Exhausted { attempts: 3 }))
        ));
        assert_eq!(out.matches("Pick #").count(), 3);
    }

    #[test]
    fn test_eof_after_rejection_is_exhausted() {
        let (result, _) = run("nope\n", 2);
        assert!(matches!(
            result,
            Err(Error::Input(InputError::Exhausted { attempts: 1 }))
        ));
    }
}
