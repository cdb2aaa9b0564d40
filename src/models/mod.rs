pub mod question;
pub mod record;
pub mod stats;
pub mod streak;

pub use question::Question;
pub use record::{DailyRecord, Difficulty};
pub use stats::{ByDifficulty, StatsData};
pub use streak::{QuestionStorage, StreakData, STREAK_BADGES};

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
