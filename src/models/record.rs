use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::null_as_default;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(anyhow::anyhow!("Unknown difficulty: {}", s)),
        }
    }
}

/// One answered day. Stored under its own `date_str` in the record map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub answered: bool,
    pub correct: bool,
    pub selected_answer: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty: Difficulty,
    pub date_str: String,
    /// Milliseconds since the Unix epoch. Informational only.
    pub timestamp: i64,
    /// Question title, shown in the calendar view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_record_uses_camel_case_keys() {
        let rec = DailyRecord {
            answered: true,
            correct: false,
            selected_answer: 2,
            difficulty: Difficulty::Hard,
            date_str: "2024-01-03".to_string(),
            timestamp: 1_704_240_000_000,
            title: None,
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["selectedAnswer"], 2);
        assert_eq!(json["dateStr"], "2024-01-03");
        assert_eq!(json["difficulty"], "hard");
        assert!(json.get("title").is_none());
    }

    #[test]
    fn test_record_without_difficulty_defaults_to_medium() {
        let rec: DailyRecord = serde_json::from_str(
            r#"{"answered":true,"correct":true,"selectedAnswer":0,"dateStr":"2024-01-01","timestamp":0}"#,
        )
        .unwrap();
        assert_eq!(rec.difficulty, Difficulty::Medium);
        assert_eq!(rec.title, None);
    }
}
