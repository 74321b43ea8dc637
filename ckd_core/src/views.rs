//! Read-only views derived from the completion log.

use crate::{Catalog, DateKey, LogStore};

/// Number of days shown in the history strip
pub const WINDOW_DAYS: u64 = 7;

/// One day of the 7-day history strip
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub date: DateKey,
    pub has_activity: bool,
    pub is_today: bool,
}

/// True if `exercise_id` was completed on `date`
pub fn is_completed(store: &LogStore, date: DateKey, exercise_id: &str) -> bool {
    store.contains(date, exercise_id)
}

/// Share of the catalog completed on `date`, as a whole percentage
///
/// Rounds half up and never exceeds 100, even if ids outside the catalog
/// were logged.
pub fn get_progress(store: &LogStore, date: DateKey, catalog: &Catalog) -> u8 {
    let total = catalog.len();
    if total == 0 {
        return 0;
    }
    let done = store.completed_count(date).min(total);
    ((200 * done + total) / (2 * total)) as u8
}

/// The 7 calendar days ending at `today`, oldest first
pub fn seven_day_window(store: &LogStore, today: DateKey) -> Vec<DayCell> {
    (0..WINDOW_DAYS)
        .rev()
        .map(|offset| {
            let date = today.days_before(offset);
            DayCell {
                date,
                has_activity: store.has_activity(date),
                is_today: offset == 0,
            }
        })
        .collect()
}
