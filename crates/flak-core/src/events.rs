//! Events emitted by the simulation for effects, audio and UI feedback.
//!
//! Events are collected during a tick and handed out with that tick's
//! stats snapshot. Nothing in the simulation reads them back.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    SessionStarted { mode: GameMode },
    SessionEnded {
        score: u32,
        enemies_destroyed: u32,
        rank: ResultRank,
    },
    SessionExited,
    EnemySpawned { id: EntityId, position: Vec3 },
    ProjectileFired {
        id: EntityId,
        origin: Vec3,
        direction: Vec3,
    },
    /// Muzzle flash at the barrel tip.
    MuzzleFlash { position: Vec3 },
    Explosion { position: Vec3, cause: ExplosionCause },
    EnemyDestroyed {
        enemy: EntityId,
        projectile: EntityId,
        score: u32,
    },
    TargetHit {
        target: EntityId,
        projectile: EntityId,
        score: u32,
    },
}
