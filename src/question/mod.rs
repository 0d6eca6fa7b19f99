use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[cfg(test)]
mod tests;

lazy_static! {
    static ref OPTION_NUMBER_REGEX: Regex = Regex::new(r"option\s*(\d+)").unwrap();
}

pub const OPTION_COUNT: usize = 4;

#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(raw: &str) -> Option<Difficulty> {
        match raw.trim().to_lowercase().as_ref() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Unknown values fall back to `Medium`. The flag tells whether that happened.
    pub fn normalize(raw: &str) -> (Difficulty, bool) {
        match Difficulty::parse(raw) {
            Some(difficulty) => (difficulty, false),
            None => (Difficulty::Medium, true),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("invalid correct option {0:?} (expected 1-4, \"Option N\" or A-D)")]
pub struct InvalidCorrectOption(pub String);

/// Reads the answer-key column. Accepts `3`, `Option 3` and `C`, in any case,
/// with quote characters stripped.
pub fn parse_correct_option(raw: &str) -> Result<u8, InvalidCorrectOption> {
    let text: String = raw
        .chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect::<String>()
        .trim()
        .to_lowercase();

    let index = if text.contains("option") {
        OPTION_NUMBER_REGEX
            .captures(&text)
            .and_then(|captures| captures[1].parse::<u8>().ok())
    } else {
        match text.as_ref() {
            "a" => Some(1),
            "b" => Some(2),
            "c" => Some(3),
            "d" => Some(4),
            other => other.parse::<u8>().ok(),
        }
    };

    match index {
        Some(i) if i >= 1 && (i as usize) <= OPTION_COUNT => Ok(i),
        _ => Err(InvalidCorrectOption(raw.to_owned())),
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuestionRecord {
    pub external_id: Option<String>,
    pub prompt: String,
    pub options: [String; OPTION_COUNT],
    pub correct_option: u8,
    pub difficulty: Difficulty,
}

impl QuestionRecord {
    /// `None` when the answer key does not point at one of the options.
    pub fn correct_answer(&self) -> Option<&str> {
        usize::from(self.correct_option)
            .checked_sub(1)
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
    }

    pub fn option_label(index: u8) -> char {
        (b'A' + index.saturating_sub(1)) as char
    }
}
