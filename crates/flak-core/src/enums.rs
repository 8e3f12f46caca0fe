//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Session mode. `Idle` when no session has been started or after exit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Idle,
    /// Timed session with the normal difficulty profile.
    Normal,
    /// Timed session with the intensified ("extra enemies") profile.
    Intensified,
    /// Untimed session against static targets, no auto-spawn.
    Practice,
}

impl GameMode {
    /// Whether this mode runs the session timer and auto-spawn.
    pub fn is_timed(self) -> bool {
        matches!(self, GameMode::Normal | GameMode::Intensified)
    }
}

/// Top-level session lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Idle,
    Playing,
    /// Timer ran out. Stays here until the next start command.
    Ended,
}

/// What a visual proxy represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualKind {
    Enemy,
    Projectile,
    Target(TargetVariant),
}

/// Alternating practice target styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetVariant {
    #[default]
    Orange,
    Yellow,
}

impl TargetVariant {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            TargetVariant::Orange
        } else {
            TargetVariant::Yellow
        }
    }
}

/// Visual state change requested of the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    /// Target has been hit.
    Hit,
}

/// Why an explosion effect was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionCause {
    EnemyDestroyed,
    TargetHit,
    GroundImpact,
}

/// End-of-session grade based on enemies destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResultRank {
    PracticeMore,
    KeepTrying,
    Skilled,
    Excellent,
    Untouchable,
}

impl ResultRank {
    pub fn from_destroyed(destroyed: u32) -> Self {
        match destroyed {
            n if n >= RANK_UNTOUCHABLE => ResultRank::Untouchable,
            n if n >= RANK_EXCELLENT => ResultRank::Excellent,
            n if n >= RANK_SKILLED => ResultRank::Skilled,
            n if n >= RANK_KEEP_TRYING => ResultRank::KeepTrying,
            _ => ResultRank::PracticeMore,
        }
    }

    /// Player-facing result line.
    pub fn message(self) -> &'static str {
        match self {
            ResultRank::Untouchable => "I would not want you as an enemy!",
            ResultRank::Excellent => "Superb marksmanship!",
            ResultRank::Skilled => "Pretty good shooting!",
            ResultRank::KeepTrying => "Keep at it!",
            ResultRank::PracticeMore => "Sharpen your aim in practice mode!",
        }
    }
}
