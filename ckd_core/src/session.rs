//! Session orchestration: mutate, persist, recompute.
//!
//! A [`Tracker`] owns the log for the running session. Every toggle is
//! written through to storage before any derived view is produced, so the
//! next summary and the next write both see the mutation.

use crate::{
    compute_streak, default_catalog, get_progress, seven_day_window, streak_anchor, Catalog,
    DateKey, DayCell, Error, LogStorage, LogStore, Result, StreakAnchor,
};
use std::collections::BTreeSet;

/// Everything a front end shows for one day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DaySummary {
    pub date: DateKey,
    pub streak: u32,
    pub anchor: StreakAnchor,
    pub progress: u8,
    pub completed: BTreeSet<String>,
    pub total: usize,
    pub week: Vec<DayCell>,
}

/// Single-owner session over a log and its storage
pub struct Tracker<S: LogStorage> {
    catalog: &'static Catalog,
    store: LogStore,
    storage: S,
}

impl<S: LogStorage> Tracker<S> {
    /// Hydrate the log from storage with the default catalog
    pub fn open(storage: S) -> Result<Self> {
        Self::with_catalog(storage, default_catalog())
    }

    pub fn with_catalog(storage: S, catalog: &'static Catalog) -> Result<Self> {
        let store = storage.load()?;
        tracing::debug!("Session opened with {} logged days", store.len());
        Ok(Self {
            catalog,
            store,
            storage,
        })
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Toggle an exercise and write the log through to storage
    ///
    /// Returns whether the exercise is completed after the toggle.
    pub fn toggle(&mut self, date: DateKey, exercise_id: &str) -> Result<bool> {
        if !self.catalog.contains(exercise_id) {
            return Err(Error::UnknownExercise(exercise_id.to_string()));
        }

        self.store.toggle_exercise(date, exercise_id);
        if let Err(e) = self.storage.save(&self.store) {
            // Roll back so memory never shows a toggle that was not written
            self.store.toggle_exercise(date, exercise_id);
            tracing::warn!("Failed to save log after toggling {}: {}", exercise_id, e);
            return Err(e);
        }

        let done = self.store.contains(date, exercise_id);
        tracing::info!(
            "{} {} on {}",
            if done { "Completed" } else { "Cleared" },
            exercise_id,
            date
        );
        Ok(done)
    }

    pub fn streak(&self, today: DateKey) -> u32 {
        compute_streak(&self.store, today)
    }

    /// Derived view of `today` from the current log
    pub fn summary(&self, today: DateKey) -> DaySummary {
        DaySummary {
            date: today,
            streak: compute_streak(&self.store, today),
            anchor: streak_anchor(&self.store, today),
            progress: get_progress(&self.store, today, self.catalog),
            completed: self.store.get_daily_log(today),
            total: self.catalog.len(),
            week: seven_day_window(&self.store, today),
        }
    }
}
