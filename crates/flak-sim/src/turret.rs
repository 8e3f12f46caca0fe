//! Turret pose and firing geometry.
//!
//! The barrel points along +X at rest. Elevation rotates it about +Z, then
//! azimuth rotates the result about +Y. The muzzle sits `muzzle_distance`
//! along that direction from a pivot `pivot_height` above the origin.

use glam::{Quat, Vec3};

use flak_core::types::{InputState, TurretOrientation};

use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Turret {
    orientation: TurretOrientation,
}

impl Turret {
    pub fn new(orientation: TurretOrientation) -> Self {
        Self { orientation }
    }

    /// Pose a session starts from.
    pub fn initial(config: &GameConfig) -> Self {
        Self::new(TurretOrientation::new(
            0.0,
            config
                .turret_initial_elevation
                .clamp(config.turret_elevation_min, config.turret_elevation_max),
        ))
    }

    pub fn orientation(&self) -> TurretOrientation {
        self.orientation
    }

    /// Apply one tick of held keys. Left turns counter-clockwise (+azimuth).
    pub fn apply_input(&mut self, input: &InputState, config: &GameConfig) {
        if input.rotate_left {
            self.orientation.azimuth += config.turret_rotation_speed;
        }
        if input.rotate_right {
            self.orientation.azimuth -= config.turret_rotation_speed;
        }
        if input.elevate_up {
            self.orientation.elevation = (self.orientation.elevation
                + config.turret_elevation_speed)
                .min(config.turret_elevation_max);
        }
        if input.elevate_down {
            self.orientation.elevation = (self.orientation.elevation
                - config.turret_elevation_speed)
                .max(config.turret_elevation_min);
        }
    }

    /// Unit firing direction for the current pose.
    pub fn direction(&self) -> Vec3 {
        let rotation = Quat::from_rotation_y(self.orientation.azimuth)
            * Quat::from_rotation_z(self.orientation.elevation);
        (rotation * Vec3::X).normalize()
    }

    /// World-space muzzle position for the current pose.
    pub fn muzzle(&self, config: &GameConfig) -> Vec3 {
        self.direction() * config.muzzle_distance + Vec3::new(0.0, config.pivot_height, 0.0)
    }
}
