use chrono::NaiveDate;
use log::info;
use std::collections::BTreeMap;

use crate::db::RecordStore;
use crate::models::{DailyRecord, Difficulty, StatsData, StreakData};
use crate::progress::{aggregate_stats, recompute_streak_at};
use crate::utils::date::{format_date_key, Clock, SystemClock};

/// Result of one answer submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub streak: StreakData,
    /// `current` as stored before this answer
    pub prev_streak: u32,
}

impl AnswerOutcome {
    pub fn extended(&self) -> bool {
        self.streak.current > self.prev_streak
    }

    pub fn broken(&self) -> bool {
        self.prev_streak > 0 && self.streak.current == 0
    }
}

/// Answer submission and record queries over one record store.
pub struct ProgressTracker {
    store: RecordStore,
    clock: Box<dyn Clock>,
}

impl ProgressTracker {
    pub fn new(store: RecordStore) -> Self {
        Self::with_clock(store, SystemClock)
    }

    pub fn with_clock(store: RecordStore, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Record the answer for `date`, overwriting any earlier answer that day.
    ///
    /// A wrong answer always leaves `current` at 0, while `best` and the badges
    /// are computed as if the wrong day had not been recorded. The returned
    /// streak is valid even if the save itself was dropped.
    pub fn save_answer(
        &mut self,
        date: NaiveDate,
        correct: bool,
        selected_answer: u8,
        difficulty: Difficulty,
        title: Option<String>,
    ) -> AnswerOutcome {
        let mut data = self.store.load();
        let prev_streak = data.streak.current;
        let today = self.clock.today();

        let date_str = format_date_key(date);
        let rec = DailyRecord {
            answered: true,
            correct,
            selected_answer,
            difficulty,
            date_str: date_str.clone(),
            timestamp: self.clock.timestamp_millis(),
            title,
        };
        data.daily_records.insert(date_str.clone(), rec);
        data.streak = recompute_streak_at(&data.daily_records, today);

        if !correct {
            if let Some(rec) = data.daily_records.remove(&date_str) {
                data.streak = recompute_streak_at(&data.daily_records, today);
                data.streak.current = 0;
                data.daily_records.insert(date_str.clone(), rec);
            }
        }

        info!(
            "Answer for {} saved ({}): streak {} -> {}",
            date_str,
            if correct { "correct" } else { "incorrect" },
            prev_streak,
            data.streak.current
        );
        self.store.save(&data);

        AnswerOutcome {
            streak: data.streak,
            prev_streak,
        }
    }

    pub fn daily_records(&self) -> BTreeMap<String, DailyRecord> {
        self.store.load().daily_records
    }

    pub fn streak(&self) -> StreakData {
        self.store.load().streak
    }

    pub fn stats(&self) -> StatsData {
        aggregate_stats(&self.store.load().daily_records)
    }

    pub fn is_answered(&self, date: NaiveDate) -> bool {
        self.store
            .load()
            .daily_records
            .get(&format_date_key(date))
            .is_some_and(|r| r.answered)
    }
}
