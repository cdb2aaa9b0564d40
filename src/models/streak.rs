use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{DailyRecord, null_as_default};

/// Badge thresholds on the best streak, with the label stored for each.
pub const STREAK_BADGES: [(u32, &str); 3] = [(3, "3连击"), (7, "7连击"), (30, "30连击")];

/// Derived summary of the record map. Always recomputed before a save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreakData {
    pub current: u32,
    pub best: u32,
    pub last_date: Option<String>,
    /// Set whenever any correct record exists, not only when the latest day was correct.
    pub last_correct: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
}

impl StreakData {
    /// Badge labels unlocked by a best streak of `best` days.
    pub fn badges_for(best: u32) -> Vec<String> {
        STREAK_BADGES
            .iter()
            .filter(|(threshold, _)| best >= *threshold)
            .map(|(_, label)| label.to_string())
            .collect()
    }

    /// Days still needed for the next badge, if one is left.
    pub fn next_badge(&self) -> Option<(&'static str, u32)> {
        STREAK_BADGES
            .iter()
            .find(|(threshold, _)| self.best < *threshold)
            .map(|(threshold, label)| (*label, threshold - self.best))
    }
}

/// Everything persisted under the storage key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuestionStorage {
    #[serde(deserialize_with = "null_as_default")]
    pub daily_records: BTreeMap<String, DailyRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub streak: StreakData,
}
