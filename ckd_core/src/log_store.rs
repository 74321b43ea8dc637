//! Per-day completion log.
//!
//! The store maps each calendar day to the set of exercise ids completed on
//! it. It owns no derived state; streaks and progress are computed from it
//! on demand. Persistence lives in [`crate::storage`].

use crate::DateKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from calendar day to the exercises completed that day
///
/// Serializes as `{"YYYY-MM-DD": ["exercise_id", ...]}`. Duplicate ids in
/// stored arrays collapse on load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogStore {
    days: BTreeMap<DateKey, BTreeSet<String>>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip completion of `exercise_id` on `date`
    ///
    /// The id is not checked against the catalog. A day whose last exercise
    /// is removed is dropped from the map. The caller must persist the store
    /// after every call.
    pub fn toggle_exercise(&mut self, date: DateKey, exercise_id: &str) {
        let log = self.days.entry(date).or_default();
        if !log.remove(exercise_id) {
            log.insert(exercise_id.to_string());
        }
        if log.is_empty() {
            self.days.remove(&date);
        }
        tracing::debug!("Toggled {} on {}", exercise_id, date);
    }

    /// Exercises completed on `date`, empty if nothing was logged
    pub fn get_daily_log(&self, date: DateKey) -> BTreeSet<String> {
        self.days.get(&date).cloned().unwrap_or_default()
    }

    /// Number of exercises completed on `date`
    pub fn completed_count(&self, date: DateKey) -> usize {
        self.days.get(&date).map_or(0, BTreeSet::len)
    }

    /// True if at least one exercise was completed on `date`
    pub fn has_activity(&self, date: DateKey) -> bool {
        self.completed_count(date) > 0
    }

    pub fn contains(&self, date: DateKey, exercise_id: &str) -> bool {
        self.days
            .get(&date)
            .is_some_and(|log| log.contains(exercise_id))
    }

    /// Number of stored days, including any empty entries loaded from storage
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> DateKey {
        DateKey::from_ymd(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_absent_day_is_empty() {
        let store = LogStore::new();
        assert!(store.get_daily_log(day()).is_empty());
        assert!(!store.has_activity(day()));
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut store = LogStore::new();

        store.toggle_exercise(day(), "main_walk");
        assert!(store.contains(day(), "main_walk"));
        assert_eq!(store.completed_count(day()), 1);

        store.toggle_exercise(day(), "main_walk");
        assert!(!store.contains(day(), "main_walk"));
        assert!(store.get_daily_log(day()).is_empty());
        assert!(!store.has_activity(day()));
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let mut store = LogStore::new();
        store.toggle_exercise(day(), "warmup_walk");
        store.toggle_exercise(day(), "cool_breathe");
        let before = store.get_daily_log(day());

        store.toggle_exercise(day(), "main_strength");
        store.toggle_exercise(day(), "main_strength");
        assert_eq!(store.get_daily_log(day()), before);

        store.toggle_exercise(day(), "warmup_walk");
        store.toggle_exercise(day(), "warmup_walk");
        assert_eq!(store.get_daily_log(day()), before);
    }

    #[test]
    fn test_emptied_day_is_pruned() {
        let mut store = LogStore::new();
        store.toggle_exercise(day(), "main_walk");
        assert_eq!(store.len(), 1);
        store.toggle_exercise(day(), "main_walk");
        assert!(store.is_empty());
    }

    #[test]
    fn test_days_are_independent() {
        let mut store = LogStore::new();
        store.toggle_exercise(day(), "main_walk");
        store.toggle_exercise(day().pred(), "cool_stretch");

        assert_eq!(store.get_daily_log(day()).len(), 1);
        assert!(store.contains(day().pred(), "cool_stretch"));
        assert!(!store.contains(day(), "cool_stretch"));
    }

    #[test]
    fn test_deserialize_dedupes_and_keeps_empty_entries() {
        let json = r#"{"2024-06-15":["main_walk","main_walk","cool_breathe"],"2024-06-14":[]}"#;
        let store: LogStore = serde_json::from_str(json).unwrap();

        assert_eq!(store.completed_count(day()), 2);
        assert_eq!(store.len(), 2);
        assert!(!store.has_activity(day().pred()));
    }

    #[test]
    fn test_non_canonical_keys_are_rejected() {
        // These would all name 2024-06-15 if parsed leniently
        let json = r#"{"2024-06-15":["a"],"2024-6-15":["b"]," 2024-06-15":["c"]}"#;
        assert!(serde_json::from_str::<LogStore>(json).is_err());

        let json = r#"{"2024-6-15":["main_walk"]}"#;
        assert!(serde_json::from_str::<LogStore>(json).is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let mut store = LogStore::new();
        store.toggle_exercise(day(), "main_walk");
        store.toggle_exercise(day(), "cool_breathe");

        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"2024-06-15":["cool_breathe","main_walk"]}"#);
    }
}
