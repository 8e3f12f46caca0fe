//! Runtime tuning configuration.
//!
//! [`GameConfig`] mirrors every tuning constant in `flak_core::constants`.
//! Defaults come from those constants; a TOML document may override any
//! subset of fields:
//!
//! ```toml
//! session_secs = 90.0
//! projectile_speed = 60.0
//!
//! [intensified]
//! spawn_interval_initial_ms = 500
//! spawn_interval_min_ms = 80
//! max_enemies_initial = 40
//! max_enemies_final = 100
//! ```

use std::path::Path;
use std::time::Duration;

use glam::Vec3;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use flak_core::constants::*;
use flak_core::enums::GameMode;

use crate::difficulty::{BurstProfile, DifficultyProfile};
use crate::error::ConfigError;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// Every gameplay tunable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Session ──────────────────────────────────────────────────────────
    pub session_secs: f64,

    // ── Physics ──────────────────────────────────────────────────────────
    pub physics_step_secs: f32,
    pub gravity: f32,

    // ── Turret ───────────────────────────────────────────────────────────
    pub turret_rotation_speed: f32,
    pub turret_elevation_speed: f32,
    pub turret_elevation_min: f32,
    pub turret_elevation_max: f32,
    pub turret_initial_elevation: f32,
    pub muzzle_distance: f32,
    pub pivot_height: f32,

    // ── Projectiles ──────────────────────────────────────────────────────
    pub projectile_speed: f32,
    pub projectile_lifetime_ms: u64,
    pub projectile_radius: f32,

    // ── Enemies ──────────────────────────────────────────────────────────
    pub enemy_base_speed: f32,
    pub enemy_vertical_speed: f32,
    pub enemy_radius: f32,
    pub enemy_hp: u32,
    pub spawn_distance_min: f32,
    pub spawn_distance_max: f32,
    pub spawn_height_min: f32,
    pub spawn_height_max: f32,

    // ── Bounds ───────────────────────────────────────────────────────────
    pub bounds_half_extent: f32,
    pub bounds_floor: f32,
    pub bounds_ceiling: f32,

    // ── Scoring ──────────────────────────────────────────────────────────
    pub enemy_score: u32,
    pub target_score: u32,

    // ── Difficulty ───────────────────────────────────────────────────────
    pub normal: DifficultyProfile,
    pub intensified: DifficultyProfile,
    pub normal_burst: BurstProfile,
    pub intensified_burst: BurstProfile,

    // ── Practice ─────────────────────────────────────────────────────────
    pub target_radius: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            session_secs: SESSION_SECS,
            physics_step_secs: PHYSICS_STEP,
            gravity: GRAVITY,
            turret_rotation_speed: TURRET_ROTATION_SPEED,
            turret_elevation_speed: TURRET_ELEVATION_SPEED,
            turret_elevation_min: TURRET_ELEVATION_MIN,
            turret_elevation_max: TURRET_ELEVATION_MAX,
            turret_initial_elevation: TURRET_INITIAL_ELEVATION,
            muzzle_distance: MUZZLE_DISTANCE,
            pivot_height: PIVOT_HEIGHT,
            projectile_speed: PROJECTILE_SPEED,
            projectile_lifetime_ms: PROJECTILE_LIFETIME_MS,
            projectile_radius: PROJECTILE_RADIUS,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_vertical_speed: ENEMY_VERTICAL_SPEED,
            enemy_radius: ENEMY_RADIUS,
            enemy_hp: ENEMY_HP,
            spawn_distance_min: SPAWN_DISTANCE_MIN,
            spawn_distance_max: SPAWN_DISTANCE_MAX,
            spawn_height_min: SPAWN_HEIGHT_MIN,
            spawn_height_max: SPAWN_HEIGHT_MAX,
            bounds_half_extent: BOUNDS_HALF_EXTENT,
            bounds_floor: BOUNDS_FLOOR,
            bounds_ceiling: BOUNDS_CEILING,
            enemy_score: ENEMY_SCORE,
            target_score: TARGET_SCORE,
            normal: DifficultyProfile::normal(),
            intensified: DifficultyProfile::intensified(),
            normal_burst: BurstProfile::normal(),
            intensified_burst: BurstProfile::intensified(),
            target_radius: TARGET_RADIUS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        if let Err(err) = config.validate() {
            warn!("rejected game config: {err}");
            return Err(err);
        }
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!("loaded game config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.session_secs > 0.0 && Duration::try_from_secs_f64(self.session_secs).is_ok()) {
            return Err(ConfigError::invalid(
                "session_secs",
                "a positive number of seconds",
                self.session_secs,
            ));
        }
        // Ordering checks below assume finite values.
        for (field, value) in [
            ("physics_step_secs", self.physics_step_secs),
            ("gravity", self.gravity),
            ("turret_rotation_speed", self.turret_rotation_speed),
            ("turret_elevation_speed", self.turret_elevation_speed),
            ("turret_elevation_min", self.turret_elevation_min),
            ("turret_elevation_max", self.turret_elevation_max),
            ("turret_initial_elevation", self.turret_initial_elevation),
            ("muzzle_distance", self.muzzle_distance),
            ("pivot_height", self.pivot_height),
            ("projectile_speed", self.projectile_speed),
            ("projectile_radius", self.projectile_radius),
            ("enemy_base_speed", self.enemy_base_speed),
            ("enemy_vertical_speed", self.enemy_vertical_speed),
            ("enemy_radius", self.enemy_radius),
            ("spawn_distance_min", self.spawn_distance_min),
            ("spawn_distance_max", self.spawn_distance_max),
            ("spawn_height_min", self.spawn_height_min),
            ("spawn_height_max", self.spawn_height_max),
            ("bounds_half_extent", self.bounds_half_extent),
            ("bounds_floor", self.bounds_floor),
            ("bounds_ceiling", self.bounds_ceiling),
            ("target_radius", self.target_radius),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, "a finite number", value));
            }
        }
        if !(self.physics_step_secs.is_finite() && self.physics_step_secs > 0.0) {
            return Err(ConfigError::invalid(
                "physics_step_secs",
                "positive",
                self.physics_step_secs,
            ));
        }
        if self.projectile_lifetime_ms == 0 {
            return Err(ConfigError::invalid(
                "projectile_lifetime_ms",
                "greater than zero",
                self.projectile_lifetime_ms,
            ));
        }
        for (field, value) in [
            ("projectile_radius", self.projectile_radius),
            ("enemy_radius", self.enemy_radius),
            ("target_radius", self.target_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(field, "positive", value));
            }
        }
        if self.enemy_hp == 0 {
            return Err(ConfigError::invalid("enemy_hp", "at least 1", self.enemy_hp));
        }
        if self.turret_elevation_min > self.turret_elevation_max {
            return Err(ConfigError::invalid(
                "turret_elevation_min",
                "at most turret_elevation_max",
                self.turret_elevation_min,
            ));
        }
        if self.spawn_distance_min >= self.spawn_distance_max {
            return Err(ConfigError::invalid(
                "spawn_distance_min",
                "below spawn_distance_max",
                self.spawn_distance_min,
            ));
        }
        if self.spawn_height_min >= self.spawn_height_max {
            return Err(ConfigError::invalid(
                "spawn_height_min",
                "below spawn_height_max",
                self.spawn_height_min,
            ));
        }
        for (field, profile) in [("normal", &self.normal), ("intensified", &self.intensified)] {
            if profile.spawn_interval_min_ms > profile.spawn_interval_initial_ms {
                return Err(ConfigError::invalid(
                    field,
                    "a profile whose spawn_interval_min_ms <= spawn_interval_initial_ms",
                    profile.spawn_interval_min_ms,
                ));
            }
            if profile.max_enemies_final < profile.max_enemies_initial {
                return Err(ConfigError::invalid(
                    field,
                    "a profile whose max_enemies_final >= max_enemies_initial",
                    profile.max_enemies_final,
                ));
            }
        }
        for (field, burst) in [
            ("normal_burst", &self.normal_burst),
            ("intensified_burst", &self.intensified_burst),
        ] {
            if burst.min_count > burst.max_count {
                return Err(ConfigError::invalid(
                    field,
                    "a burst whose min_count <= max_count",
                    burst.min_count,
                ));
            }
        }
        Ok(())
    }

    /// Session length. A value `validate` would reject reads as zero.
    pub fn session_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.session_secs).unwrap_or_default()
    }

    pub fn projectile_lifetime(&self) -> Duration {
        Duration::from_millis(self.projectile_lifetime_ms)
    }

    pub fn gravity_vector(&self) -> Vec3 {
        Vec3::new(0.0, self.gravity, 0.0)
    }

    /// Difficulty profile for a timed mode; `None` for Idle and Practice.
    pub fn profile_for(&self, mode: GameMode) -> Option<DifficultyProfile> {
        match mode {
            GameMode::Normal => Some(self.normal),
            GameMode::Intensified => Some(self.intensified),
            GameMode::Practice | GameMode::Idle => None,
        }
    }

    /// Start-of-session burst for a timed mode; `None` for Idle and Practice.
    pub fn burst_for(&self, mode: GameMode) -> Option<BurstProfile> {
        match mode {
            GameMode::Normal => Some(self.normal_burst),
            GameMode::Intensified => Some(self.intensified_burst),
            GameMode::Practice | GameMode::Idle => None,
        }
    }

    /// Whether a point lies inside the enemy play volume.
    pub fn in_bounds(&self, position: Vec3) -> bool {
        position.x.abs() <= self.bounds_half_extent
            && position.z.abs() <= self.bounds_half_extent
            && position.y >= self.bounds_floor
            && position.y <= self.bounds_ceiling
    }
}
