//! Streak derivation with a one-day grace tolerance.
//!
//! The streak is never stored. It is recomputed in full from the
//! [`LogStore`] and the injected "today" whenever the log changes.
//!
//! ## Grace-day rule
//!
//! 1. **Today active**: count starts at 1, the backward scan starts at
//!    yesterday.
//! 2. **Today inactive**: yesterday is the grace day. If it is active the
//!    count starts at 1 and the scan starts the day before; otherwise the
//!    streak is 0 and nothing further back is examined.
//! 3. **Scan**: each active day adds one, the first inactive day stops.
//!
//! Only one missed day is forgiven, and only when that day is today.

use crate::{DateKey, LogStore};

/// Days before today the scan may reach (exclusive)
///
/// A safety bound, not a semantic limit: hitting it ends the scan with the
/// count accumulated so far, so the largest reportable streak is this many
/// days.
pub const MAX_LOOKBACK_DAYS: u64 = 365;

/// Which day a non-zero streak is anchored on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreakAnchor {
    /// No streak: neither today nor yesterday has activity
    None,
    /// Today has activity
    Today,
    /// Today is still open but yesterday has activity
    GraceDay,
}

/// Classify which branch of the grace-day rule applies
pub fn streak_anchor(store: &LogStore, today: DateKey) -> StreakAnchor {
    if store.has_activity(today) {
        StreakAnchor::Today
    } else if store.has_activity(today.pred()) {
        StreakAnchor::GraceDay
    } else {
        StreakAnchor::None
    }
}

/// Count consecutive active days under the grace-day rule
pub fn compute_streak(store: &LogStore, today: DateKey) -> u32 {
    let first_scan_offset = match streak_anchor(store, today) {
        StreakAnchor::None => return 0,
        StreakAnchor::Today => 1,
        StreakAnchor::GraceDay => 2,
    };

    let mut count = 1;
    for offset in first_scan_offset..MAX_LOOKBACK_DAYS {
        match today.checked_days_before(offset) {
            Some(day) if store.has_activity(day) => count += 1,
            _ => break,
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> DateKey {
        DateKey::from_ymd(2024, 6, 15).unwrap()
    }

    /// Store with one exercise logged on each of the given day offsets
    fn store_with(offsets: &[u64]) -> LogStore {
        let mut store = LogStore::new();
        for &offset in offsets {
            store.toggle_exercise(today().days_before(offset), "main_walk");
        }
        store
    }

    #[test]
    fn test_empty_store_has_no_streak() {
        let store = LogStore::new();
        assert_eq!(compute_streak(&store, today()), 0);
        assert_eq!(streak_anchor(&store, today()), StreakAnchor::None);
    }

    #[test]
    fn test_only_today() {
        let store = store_with(&[0]);
        assert_eq!(compute_streak(&store, today()), 1);
        assert_eq!(streak_anchor(&store, today()), StreakAnchor::Today);
    }

    #[test]
    fn test_grace_day_keeps_yesterday() {
        let json = format!(
            r#"{{"{}":["x"],"{}":[]}}"#,
            today().pred(),
            today()
        );
        let store: LogStore = serde_json::from_str(&json).unwrap();

        assert_eq!(compute_streak(&store, today()), 1);
        assert_eq!(streak_anchor(&store, today()), StreakAnchor::GraceDay);
    }

    #[test]
    fn test_gap_yesterday_truncates_before_older_activity() {
        let json = format!(
            r#"{{"{}":[],"{}":["x"],"{}":["y"]}}"#,
            today().days_before(1),
            today().days_before(2),
            today()
        );
        let store: LogStore = serde_json::from_str(&json).unwrap();
        assert_eq!(compute_streak(&store, today()), 1);
    }

    #[test]
    fn test_ten_days_without_today() {
        let offsets: Vec<u64> = (1..=10).collect();
        let store = store_with(&offsets);
        assert_eq!(compute_streak(&store, today()), 10);
    }

    #[test]
    fn test_today_anchored_run() {
        for k in 0..6u64 {
            let offsets: Vec<u64> = (0..=k).collect();
            let mut store = store_with(&offsets);
            // Activity beyond the gap must not count
            store.toggle_exercise(today().days_before(k + 2), "main_walk");
            assert_eq!(compute_streak(&store, today()), k as u32 + 1);
        }
    }

    #[test]
    fn test_grace_day_alone() {
        let store = store_with(&[1, 3, 4]);
        assert_eq!(compute_streak(&store, today()), 1);
    }

    #[test]
    fn test_no_grace_beyond_today() {
        // Today and yesterday both empty: earlier runs are ignored
        let store = store_with(&[2, 3, 4, 5]);
        assert_eq!(compute_streak(&store, today()), 0);

        // A gap further back is not forgiven either
        let store = store_with(&[0, 1, 3, 4]);
        assert_eq!(compute_streak(&store, today()), 2);
    }

    #[test]
    fn test_lookback_bound() {
        let offsets: Vec<u64> = (0..500).collect();
        let store = store_with(&offsets);
        assert_eq!(compute_streak(&store, today()), MAX_LOOKBACK_DAYS as u32);

        let offsets: Vec<u64> = (1..500).collect();
        let store = store_with(&offsets);
        assert_eq!(compute_streak(&store, today()), MAX_LOOKBACK_DAYS as u32 - 1);
    }

    #[test]
    fn test_scan_stops_at_earliest_date() {
        let earliest = DateKey::new(chrono::NaiveDate::MIN);
        let mut store = LogStore::new();
        store.toggle_exercise(earliest, "main_walk");
        assert_eq!(compute_streak(&store, earliest), 1);

        let later = DateKey::new(
            chrono::NaiveDate::MIN
                .checked_add_days(chrono::Days::new(2))
                .unwrap(),
        );
        store.toggle_exercise(later, "main_walk");
        store.toggle_exercise(later.pred(), "main_walk");
        assert_eq!(compute_streak(&store, later), 3);
    }

    #[test]
    fn test_idempotent() {
        let store = store_with(&[0, 1, 2, 5]);
        let first = compute_streak(&store, today());
        assert_eq!(compute_streak(&store, today()), first);
        assert_eq!(first, 3);
    }

    #[test]
    fn test_toggle_off_today_falls_back_to_grace() {
        let mut store = store_with(&[1, 2]);
        store.toggle_exercise(today(), "cool_breathe");
        assert_eq!(compute_streak(&store, today()), 3);

        store.toggle_exercise(today(), "cool_breathe");
        assert!(!store.has_activity(today()));
        assert_eq!(compute_streak(&store, today()), 2);
    }
}
