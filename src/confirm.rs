//! Human confirmation of machine translations
//!
//! The pipeline asks a [`Confirmer`] about every freshly translated entry.
//! [`AutoConfirm`] accepts everything (`--no-validation`); [`InteractivePrompt`]
//! shows the original and the translation and lets the user type a
//! replacement when they reject it.

use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};

/// Outcome of a confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Keep the machine translation
    Accept,
    /// Use this text instead
    Replace(String),
}

pub trait Confirmer {
    /// Decide on `translated`, the restored machine translation of `original`
    fn confirm(&mut self, key: &str, original: &str, translated: &str) -> Result<Decision>;
}

/// Accepts every machine translation unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Confirmer for AutoConfirm {
    fn confirm(&mut self, _key: &str, _original: &str, _translated: &str) -> Result<Decision> {
        Ok(Decision::Accept)
    }
}

/// Terminal prompt: yes keeps the translation, anything else asks for one
///
/// The default answer is "no", so pressing enter goes straight to typing a
/// replacement.
#[derive(Debug)]
pub struct InteractivePrompt<R, W> {
    input: R,
    output: W,
}

impl InteractivePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        InteractivePrompt::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractivePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        InteractivePrompt { input, output }
    }

    /// Consume the prompt and hand back its output (for inspecting transcripts)
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(Error::Prompt)?;
        if read == 0 {
            return Err(Error::Prompt(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            )));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{} (yes/no) [no]:\n> ", question).map_err(Error::Prompt)?;
        self.output.flush().map_err(Error::Prompt)?;
        let answer = self.read_line()?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}:\n> ", question).map_err(Error::Prompt)?;
        self.output.flush().map_err(Error::Prompt)?;
        self.read_line()
    }
}

impl<R: BufRead, W: Write> Confirmer for InteractivePrompt<R, W> {
    fn confirm(&mut self, key: &str, original: &str, translated: &str) -> Result<Decision> {
        writeln!(self.output, "[{}]", key).map_err(Error::Prompt)?;
        writeln!(self.output, "ORIGINAL: {}", original).map_err(Error::Prompt)?;

        if self.ask_yes_no(&format!("TRANSLATED: {}", translated))? {
            return Ok(Decision::Accept);
        }

        let replacement = self.ask("Please type the translation 🚀")?;
        Ok(Decision::Replace(replacement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> InteractivePrompt<Cursor<Vec<u8>>, Vec<u8>> {
        InteractivePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_auto_confirm_accepts() {
        let decision = AutoConfirm.confirm("k", "Hello", "Bonjour").unwrap();
        assert_eq!(decision, Decision::Accept);
    }

    #[test]
    fn test_prompt_yes_accepts() {
        let mut prompt = prompt("yes\n");
        let decision = prompt.confirm("greeting", "Hello", "Bonjour").unwrap();
        assert_eq!(decision, Decision::Accept);

        let transcript = String::from_utf8(prompt.into_output()).unwrap();
        assert!(transcript.contains("ORIGINAL: Hello"));
        assert!(transcript.contains("TRANSLATED: Bonjour"));
    }

    #[test]
    fn test_prompt_accepts_short_and_uppercase_yes() {
        let decision = prompt("Y\n").confirm("k", "a", "b").unwrap();
        assert_eq!(decision, Decision::Accept);
    }

    #[test]
    fn test_prompt_no_asks_for_replacement() {
        let decision = prompt("no\nSalut tout le monde\n")
            .confirm("k", "Hello everyone", "Bonjour tous")
            .unwrap();
        assert_eq!(decision, Decision::Replace("Salut tout le monde".to_string()));
    }

    #[test]
    fn test_prompt_defaults_to_no() {
        let decision = prompt("\nManual\r\n").confirm("k", "a", "b").unwrap();
        assert_eq!(decision, Decision::Replace("Manual".to_string()));
    }

    #[test]
    fn test_prompt_at_end_of_input_fails() {
        let result = prompt("no\n").confirm("k", "a", "b");
        assert!(matches!(result, Err(Error::Prompt(_))));
    }

    #[test]
    fn test_prompt_empty_line_replacement_is_allowed() {
        let decision = prompt("no\n\n").confirm("k", "a", "b").unwrap();
        assert_eq!(decision, Decision::Replace(String::new()));
    }
}
