use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Difficulty;

pub const CHOICE_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Frontmatter of a question file. Validated by the content loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionMeta {
    pub title: String,
    pub question: String,
    pub date: NaiveDate,
    pub choices: Vec<String>,
    pub correct: u8,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub draft: bool,
}

/// A daily question entry. `body` is the markdown explanation of the answer.
#[derive(Debug, Clone)]
pub struct Question {
    pub id: String,
    pub slug: String,
    pub meta: QuestionMeta,
    pub body: String,
}

impl Question {
    pub fn is_correct(&self, choice: u8) -> bool {
        choice == self.meta.correct
    }

    pub fn correct_letter(&self) -> char {
        choice_letter(self.meta.correct)
    }
}

pub fn choice_letter(index: u8) -> char {
    CHOICE_LETTERS.get(index as usize).copied().unwrap_or('?')
}

/// Parse a choice given as a letter (`A`-`D`) or an index (`0`-`3`).
pub fn parse_choice(s: &str) -> Option<u8> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u8>() {
        return (n < 4).then_some(n);
    }
    let mut chars = s.chars();
    let c = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }
    CHOICE_LETTERS.iter().position(|l| *l == c).map(|i| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("a"), Some(0));
        assert_eq!(parse_choice("D"), Some(3));
        assert_eq!(parse_choice("2"), Some(2));
        assert_eq!(parse_choice("4"), None);
        assert_eq!(parse_choice("E"), None);
        assert_eq!(parse_choice("AB"), None);
        assert_eq!(parse_choice(""), None);
    }

    #[test]
    fn test_choice_letter() {
        assert_eq!(choice_letter(1), 'B');
        assert_eq!(choice_letter(9), '?');
    }
}
