use chrono::{Local, NaiveDate};
use log::warn;
use std::collections::BTreeMap;

use crate::models::{DailyRecord, StreakData};
use crate::utils::date::{day_gap, format_date_key, parse_date_key};

/// Recompute the streak summary against today's local date.
pub fn recompute_streak(records: &BTreeMap<String, DailyRecord>) -> StreakData {
    recompute_streak_at(records, Local::now().date_naive())
}

/// Recompute the streak summary from the full record map.
///
/// Only days answered correctly count. The current run starts at the most
/// recent correct day and walks back one day at a time. It still counts when
/// that day is yesterday, so an unanswered today does not break it yet.
/// `best` is the longest run of consecutive correct days anywhere in history.
pub fn recompute_streak_at(
    records: &BTreeMap<String, DailyRecord>,
    today: NaiveDate,
) -> StreakData {
    let mut streak = StreakData::default();

    let mut correct_days: Vec<NaiveDate> = records
        .iter()
        .filter(|(_, rec)| rec.answered && rec.correct)
        .filter_map(|(key, _)| {
            let day = parse_date_key(key);
            if day.is_none() {
                warn!("Skipping record with invalid date key '{}'", key);
            }
            day
        })
        .collect();
    correct_days.sort_unstable_by(|a, b| b.cmp(a));
    correct_days.dedup();

    let Some(&most_recent) = correct_days.first() else {
        return streak;
    };

    let mut run = 0u32;
    let mut last = most_recent;
    for &day in &correct_days {
        if run > 0 && day_gap(last, day) > 1 {
            break;
        }
        run += 1;
        last = day;
    }
    streak.last_date = Some(format_date_key(last));
    streak.last_correct = true;
    streak.current = if day_gap(today, last) <= 1 { run } else { 0 };

    let mut best = run;
    let mut stretch = 0u32;
    for (i, &day) in correct_days.iter().enumerate() {
        if i > 0 && day_gap(correct_days[i - 1], day) > 1 {
            best = best.max(stretch);
            stretch = 0;
        }
        stretch += 1;
    }
    streak.best = best.max(stretch);

    for badge in StreakData::badges_for(streak.best) {
        if !streak.achievements.contains(&badge) {
            streak.achievements.push(badge);
        }
    }

    streak
}
