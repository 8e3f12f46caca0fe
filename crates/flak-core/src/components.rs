//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::TargetVariant;
use crate::types::BodyHandle;

/// An airborne enemy drifting through the play volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub position: Vec3,
    /// Units per 60 Hz frame.
    pub velocity: Vec3,
    pub radius: f32,
    pub hp: u32,
}

/// A fired shell backed by a physics body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Last position read from the physics body.
    pub position: Vec3,
    pub body: BodyHandle,
    /// Engine clock reading at fire time.
    pub created_at: Duration,
    pub lifetime: Duration,
}

/// A static practice target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub position: Vec3,
    pub radius: f32,
    pub hit: bool,
    pub variant: TargetVariant,
}
