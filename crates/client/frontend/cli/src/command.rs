//! Parsing of typed commands.
use std::str::FromStr;

use thiserror::Error;

use client_frontend_core::FormField;
use leaderboard_core::{Category, InputMode};

/// One line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Open the form, optionally with a raw category selection.
    New(Option<String>),
    Mode(InputMode),
    /// Set a form field. The value is kept exactly as typed.
    Set { field: FormField, value: String },
    Submit,
    Cancel,
    Form,
    /// Print one board, or both.
    Show(Option<Category>),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}`; type `help` for a list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown input mode `{0}`; use `split` or `text`")]
    InvalidMode(String),

    #[error("unknown field `{0}`")]
    InvalidField(String),

    #[error("unknown board `{0}`; use `staff` or `clients`")]
    InvalidCategory(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, rest) = split_word(line.trim_start());

        match name.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "new" | "add" => {
                let selection = rest.trim();
                Ok(Command::New(
                    (!selection.is_empty()).then(|| selection.to_string()),
                ))
            }
            "mode" => {
                let mode = rest.trim();
                if mode.is_empty() {
                    return Err(CommandError::Usage("mode split|text"));
                }
                mode.parse()
                    .map(Command::Mode)
                    .map_err(|_| CommandError::InvalidMode(mode.to_string()))
            }
            "set" => {
                let (field, value) = split_word(rest.trim_start());
                if field.is_empty() {
                    return Err(CommandError::Usage("set <field> <value>"));
                }
                let field = field
                    .parse()
                    .map_err(|_| CommandError::InvalidField(field.to_string()))?;
                Ok(Command::Set {
                    field,
                    value: value.to_string(),
                })
            }
            "submit" => Ok(Command::Submit),
            "cancel" => Ok(Command::Cancel),
            "form" => Ok(Command::Form),
            "show" | "boards" => {
                let board = rest.trim();
                if board.is_empty() {
                    return Ok(Command::Show(None));
                }
                board
                    .parse()
                    .map(|category| Command::Show(Some(category)))
                    .map_err(|_| CommandError::InvalidCategory(board.to_string()))
            }
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Splits off the first word. The remainder loses only the one separator.
fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (input, ""),
    }
}
