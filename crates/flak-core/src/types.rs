//! Fundamental identifier, geometric and input types.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stable identifier of a simulated entity.
///
/// Ids are allocated monotonically and never reused, so a renderer can key
/// its visual proxies on them across sessions.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EntityId(pub u32);

/// Opaque handle to a body owned by the physics collaborator.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BodyHandle(pub u32);

/// Placement of a visual proxy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Uniform scale (the entity's radius).
    pub scale: f32,
}

impl Transform {
    pub fn new(position: Vec3, scale: f32) -> Self {
        Self { position, scale }
    }
}

/// Turret pose: azimuth about +Y, elevation about +Z (radians).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TurretOrientation {
    pub azimuth: f32,
    pub elevation: f32,
}

impl TurretOrientation {
    pub fn new(azimuth: f32, elevation: f32) -> Self {
        Self { azimuth, elevation }
    }
}

/// Key states sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub elevate_up: bool,
    pub elevate_down: bool,
    pub fire: bool,
}

impl InputState {
    /// Only the fire key held.
    pub fn firing() -> Self {
        Self {
            fire: true,
            ..Self::default()
        }
    }
}
