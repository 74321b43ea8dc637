//! Core domain types for the CKD Active tracker.
//!
//! This module defines the static exercise catalog types:
//! - Phases of a daily session
//! - Exercise definitions
//! - The catalog that holds them in display order

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Phase
// ============================================================================

/// Phase of the daily routine an exercise belongs to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    WarmUp,
    Main,
    CoolDown,
}

impl Phase {
    /// All phases in routine order
    pub fn all() -> &'static [Phase] {
        &[Phase::WarmUp, Phase::Main, Phase::CoolDown]
    }

    /// Human-readable heading for the phase
    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::WarmUp => "Warm-Up",
            Phase::Main => "Main Phase",
            Phase::CoolDown => "Cool-Down",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warm_up" | "warmup" | "warm-up" => Ok(Phase::WarmUp),
            "main" | "main phase" | "main_phase" => Ok(Phase::Main),
            "cool_down" | "cooldown" | "cool-down" => Ok(Phase::CoolDown),
            other => Err(format!("unknown phase '{}'", other)),
        }
    }
}

// ============================================================================
// Exercise Definitions
// ============================================================================

/// A single checklist item (e.g., "Deep Breathing")
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseDefinition {
    pub id: String,
    pub label: String,
    pub phase: Phase,
    /// Display-only duration hint such as "2-3 mins"
    pub duration: String,
}

// ============================================================================
// Catalog Type
// ============================================================================

/// The complete, ordered catalog of exercises
///
/// Order is display order only; it has no bearing on streak logic.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub exercises: Vec<ExerciseDefinition>,
}
