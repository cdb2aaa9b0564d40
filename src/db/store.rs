use log::{debug, warn};

use crate::db::backend::{StorageBackend, StorageError};
use crate::models::QuestionStorage;

pub const DEFAULT_STORAGE_KEY: &str = "daily-question-data";

/// Loads and saves the whole answer history as one JSON blob under `key`.
///
/// A store without a backend stands for a context with no persistent storage:
/// every load is empty and every save is dropped. Read and write failures are
/// logged and swallowed, so callers always get a usable value back.
pub struct RecordStore {
    backend: Option<Box<dyn StorageBackend>>,
    key: String,
}

impl RecordStore {
    pub fn new(backend: impl StorageBackend + 'static, key: impl Into<String>) -> Self {
        Self {
            backend: Some(Box::new(backend)),
            key: key.into(),
        }
    }

    pub fn unavailable(key: impl Into<String>) -> Self {
        Self {
            backend: None,
            key: key.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load(&self) -> QuestionStorage {
        let Some(backend) = &self.backend else {
            return QuestionStorage::default();
        };
        match read(&**backend, &self.key) {
            Ok(Some(data)) => {
                debug!(
                    "Loaded {} daily records from '{}'",
                    data.daily_records.len(),
                    self.key
                );
                data
            }
            Ok(None) => QuestionStorage::default(),
            Err(e) => {
                warn!("Discarding stored data under '{}': {}", self.key, e);
                QuestionStorage::default()
            }
        }
    }

    pub fn save(&mut self, data: &QuestionStorage) {
        let Some(backend) = &mut self.backend else {
            return;
        };
        let result = serde_json::to_string(data)
            .map_err(StorageError::from)
            .and_then(|raw| backend.set_item(&self.key, &raw));
        match result {
            Ok(()) => debug!(
                "Saved {} daily records to '{}'",
                data.daily_records.len(),
                self.key
            ),
            Err(e) => warn!("Could not save to '{}': {}", self.key, e),
        }
    }
}

fn read(backend: &dyn StorageBackend, key: &str) -> Result<Option<QuestionStorage>, StorageError> {
    match backend.get_item(key)? {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::backend::MemoryBackend;
    use crate::models::{DailyRecord, Difficulty, StreakData};

    fn record(date: &str) -> DailyRecord {
        DailyRecord {
            answered: true,
            correct: true,
            selected_answer: 1,
            difficulty: Difficulty::Easy,
            date_str: date.to_string(),
            timestamp: 0,
            title: Some("Ownership".to_string()),
        }
    }

    #[test]
    fn test_empty_backend_loads_default() {
        let store = RecordStore::new(MemoryBackend::new(), DEFAULT_STORAGE_KEY);
        assert_eq!(store.load(), QuestionStorage::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = RecordStore::new(MemoryBackend::new(), DEFAULT_STORAGE_KEY);
        let mut data = QuestionStorage::default();
        data.daily_records
            .insert("2024-01-01".to_string(), record("2024-01-01"));
        data.streak.best = 1;
        store.save(&data);
        assert_eq!(store.load(), data);
    }

    #[test]
    fn test_corrupt_data_loads_default() {
        for raw in ["{not json", "null", "[1,2]", r#"{"dailyRecords":{"x":5}}"#] {
            let backend = MemoryBackend::new().with_item(DEFAULT_STORAGE_KEY, raw);
            let store = RecordStore::new(backend, DEFAULT_STORAGE_KEY);
            assert_eq!(store.load(), QuestionStorage::default(), "input {raw}");
        }
    }

    #[test]
    fn test_missing_streak_is_filled() {
        let raw = r#"{"dailyRecords":{"2024-01-01":{"answered":true,"correct":true,"selectedAnswer":0,"difficulty":"easy","dateStr":"2024-01-01","timestamp":1}}}"#;
        let backend = MemoryBackend::new().with_item(DEFAULT_STORAGE_KEY, raw);
        let store = RecordStore::new(backend, DEFAULT_STORAGE_KEY);
        let data = store.load();
        assert_eq!(data.daily_records.len(), 1);
        assert_eq!(data.streak, StreakData::default());
    }

    #[test]
    fn test_null_difficulty_keeps_other_records() {
        let raw = r#"{"dailyRecords":{
            "2024-01-01":{"answered":true,"correct":true,"selectedAnswer":0,
                "difficulty":null,"dateStr":"2024-01-01","timestamp":1},
            "2024-01-02":{"answered":true,"correct":false,"selectedAnswer":2,
                "difficulty":"hard","dateStr":"2024-01-02","timestamp":2}
        }}"#;
        let backend = MemoryBackend::new().with_item(DEFAULT_STORAGE_KEY, raw);
        let data = RecordStore::new(backend, DEFAULT_STORAGE_KEY).load();
        assert_eq!(data.daily_records.len(), 2);
        assert_eq!(data.daily_records["2024-01-01"].difficulty, Difficulty::Medium);
        assert_eq!(data.daily_records["2024-01-02"].difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_unavailable_store_is_always_empty() {
        let mut store = RecordStore::unavailable(DEFAULT_STORAGE_KEY);
        let mut data = QuestionStorage::default();
        data.daily_records
            .insert("2024-01-01".to_string(), record("2024-01-01"));
        store.save(&data);
        assert!(!store.is_available());
        assert_eq!(store.load(), QuestionStorage::default());
    }

    #[test]
    fn test_quota_failure_is_swallowed() {
        let mut store = RecordStore::new(MemoryBackend::new().with_quota(16), DEFAULT_STORAGE_KEY);
        let mut data = QuestionStorage::default();
        data.daily_records
            .insert("2024-01-01".to_string(), record("2024-01-01"));
        store.save(&data);
        assert_eq!(store.load(), QuestionStorage::default());
    }

    #[test]
    fn test_keys_are_isolated() {
        let mut a = RecordStore::new(MemoryBackend::new(), "a");
        let mut data = QuestionStorage::default();
        data.streak.best = 9;
        a.save(&data);
        assert_eq!(a.key(), "a");
        assert_eq!(a.load().streak.best, 9);

        let b = RecordStore::new(MemoryBackend::new().with_item("a", "{}"), "b");
        assert_eq!(b.load(), QuestionStorage::default());
    }
}
