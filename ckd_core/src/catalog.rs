//! Default catalog of exercises.
//!
//! This module provides the built-in daily routine. The catalog is fixed:
//! there is no editing at runtime.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Safety guidance shown alongside the checklist
pub const SAFETY_TIPS: &[(&str, &str)] = &[
    (
        "The Talk Test",
        "If you can't speak comfortably while moving, slow down.",
    ),
    ("Stop if", "You feel dizzy, chest pain, or nausea."),
    ("Hydration", "Stick to your fluid limits."),
];

pub const DISCLAIMER: &str = "This tool is for tracking purposes only. Always follow the \
specific advice of your nephrologist regarding fluid intake and exercise intensity.";

/// Get a reference to the cached default catalog
pub fn default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog in display order
///
/// **Note**: prefer `default_catalog()` which returns a cached reference.
pub fn build_default_catalog() -> Catalog {
    let exercise = |id: &str, label: &str, phase: Phase, duration: &str| ExerciseDefinition {
        id: id.into(),
        label: label.into(),
        phase,
        duration: duration.into(),
    };

    Catalog {
        exercises: vec![
            exercise("warmup_rotation", "Shoulder Rotations", Phase::WarmUp, "2-3 mins"),
            exercise("warmup_walk", "Gentle Walk in Place", Phase::WarmUp, "2-3 mins"),
            exercise("main_walk", "Brisk Walk (Talk Test)", Phase::Main, "10-30 mins"),
            exercise(
                "main_strength",
                "Seated Leg Lifts / Wall Push-ups",
                Phase::Main,
                "1 set (10-15 reps)",
            ),
            exercise("cool_stretch", "Leg Stretches", Phase::CoolDown, "3-5 mins"),
            exercise("cool_breathe", "Deep Breathing", Phase::CoolDown, "2 mins"),
        ],
    }
}

impl Catalog {
    /// Number of exercises in the catalog
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Look up an exercise by id
    pub fn get(&self, id: &str) -> Option<&ExerciseDefinition> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Exercises of one phase, in catalog order
    pub fn by_phase(&self, phase: Phase) -> impl Iterator<Item = &ExerciseDefinition> {
        self.exercises.iter().filter(move |e| e.phase == phase)
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.exercises.is_empty() {
            errors.push("Catalog has no exercises".to_string());
            return errors;
        }

        let mut seen = HashSet::new();
        for exercise in &self.exercises {
            if exercise.id.is_empty() {
                errors.push("Exercise has empty ID".to_string());
            } else if !seen.insert(exercise.id.as_str()) {
                errors.push(format!("Duplicate exercise ID '{}'", exercise.id));
            }
            if exercise.label.is_empty() {
                errors.push(format!("Exercise '{}' has empty label", exercise.id));
            }
        }

        for phase in Phase::all() {
            if self.by_phase(*phase).next().is_none() {
                errors.push(format!("Catalog has no {} exercises", phase));
            }
        }

        errors
    }
}
