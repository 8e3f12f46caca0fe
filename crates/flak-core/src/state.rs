//! Stats snapshot: the externally observable state refreshed each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::TurretOrientation;

/// Everything a HUD needs after one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Engine tick counter (increments every tick, in every phase).
    pub tick: u64,
    pub mode: GameMode,
    pub phase: SessionPhase,
    pub score: u32,
    /// Seconds left in a timed session, clamped to zero. Always zero in practice.
    pub time_remaining_secs: f64,
    pub enemies_destroyed: u32,
    pub live_enemy_count: u32,
    pub live_projectile_count: u32,
    pub targets_hit: u32,
    pub targets_total: u32,
    pub turret: TurretOrientation,
    /// Set once the session has ended.
    pub rank: Option<ResultRank>,
    /// Events raised during this tick.
    pub events: Vec<GameEvent>,
}
