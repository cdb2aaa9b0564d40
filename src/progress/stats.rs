use std::collections::BTreeMap;

use crate::models::{ByDifficulty, DailyRecord, StatsData};

/// Totals, accuracy and per-difficulty counts over answered records.
pub fn aggregate_stats(records: &BTreeMap<String, DailyRecord>) -> StatsData {
    let mut total_answered = 0u32;
    let mut total_correct = 0u32;
    let mut by_difficulty = ByDifficulty::default();

    for rec in records.values().filter(|r| r.answered) {
        total_answered += 1;
        let bucket = by_difficulty.get_mut(rec.difficulty);
        bucket.answered += 1;
        if rec.correct {
            total_correct += 1;
            bucket.correct += 1;
        }
    }

    StatsData {
        total_answered,
        total_correct,
        accuracy: accuracy(total_correct, total_answered),
        by_difficulty,
    }
}

fn accuracy(correct: u32, answered: u32) -> f64 {
    if answered == 0 {
        return 0.0;
    }
    (1000.0 * correct as f64 / answered as f64).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stats::DifficultyStats;
    use crate::models::Difficulty;

    fn rec(date: &str, correct: bool, difficulty: Difficulty) -> (String, DailyRecord) {
        (
            date.to_string(),
            DailyRecord {
                answered: true,
                correct,
                selected_answer: 0,
                difficulty,
                date_str: date.to_string(),
                timestamp: 0,
                title: None,
            },
        )
    }

    #[test]
    fn test_empty_stats() {
        let stats = aggregate_stats(&BTreeMap::new());
        assert_eq!(stats.total_answered, 0);
        assert_eq!(stats.accuracy, 0.0);
        assert_eq!(stats.by_difficulty, ByDifficulty::default());
    }

    #[test]
    fn test_two_of_three_medium() {
        let records: BTreeMap<_, _> = [
            rec("2024-01-01", true, Difficulty::Medium),
            rec("2024-01-02", false, Difficulty::Medium),
            rec("2024-01-03", true, Difficulty::Medium),
        ]
        .into_iter()
        .collect();
        let stats = aggregate_stats(&records);
        assert_eq!(stats.total_answered, 3);
        assert_eq!(stats.total_correct, 2);
        assert_eq!(stats.accuracy, 66.7);
        assert_eq!(
            stats.by_difficulty.medium,
            DifficultyStats {
                answered: 3,
                correct: 2
            }
        );
        assert_eq!(stats.by_difficulty.easy, DifficultyStats::default());
        assert_eq!(stats.by_difficulty.hard, DifficultyStats::default());
    }

    #[test]
    fn test_mixed_difficulties_and_unanswered() {
        let mut records: BTreeMap<_, _> = [
            rec("2024-01-01", true, Difficulty::Easy),
            rec("2024-01-02", false, Difficulty::Hard),
            rec("2024-01-03", true, Difficulty::Hard),
        ]
        .into_iter()
        .collect();
        let (key, mut skipped) = rec("2024-01-04", true, Difficulty::Easy);
        skipped.answered = false;
        records.insert(key, skipped);

        let stats = aggregate_stats(&records);
        assert_eq!(stats.total_answered, 3);
        assert_eq!(stats.by_difficulty.get(Difficulty::Easy).answered, 1);
        assert_eq!(stats.by_difficulty.get(Difficulty::Hard).correct, 1);
        assert_eq!(stats.accuracy, 66.7);
    }

    #[test]
    fn test_accuracy_rounds_to_one_decimal() {
        assert_eq!(accuracy(1, 3), 33.3);
        assert_eq!(accuracy(1, 8), 12.5);
        assert_eq!(accuracy(5, 5), 100.0);
    }
}
