//! Autopilot gunner: turns the turret toward the nearest enemy (or unhit
//! practice target), leads for gravity drop, and taps fire when on target.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use flak_core::types::{InputState, TurretOrientation};
use flak_sim::{GameConfig, SimulationEngine};

use crate::game_loop::InputDriver;

/// Azimuth/elevation that puts a shell through a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimSolution {
    pub azimuth: f32,
    pub elevation: f32,
}

/// Barrel pose that lands a shell on `target`, or `None` when out of reach.
///
/// Uses the low-angle ballistic solution measured from the muzzle, which
/// itself moves with elevation, so the solve is refined a few times.
pub fn solve(target: Vec3, config: &GameConfig) -> Option<AimSolution> {
    let pivot = Vec3::new(0.0, config.pivot_height, 0.0);
    let offset = target - pivot;
    let horizontal = offset.x.hypot(offset.z);
    // Barrel at azimuth a points along (cos a, 0, -sin a).
    let azimuth = (-offset.z).atan2(offset.x);

    let v = config.projectile_speed;
    let g = -config.gravity;
    if g <= 0.0 || v <= 0.0 {
        return None;
    }

    let mut elevation = 0.0_f32;
    for _ in 0..4 {
        let d = horizontal - config.muzzle_distance * elevation.cos();
        let h = offset.y - config.muzzle_distance * elevation.sin();
        if d <= f32::EPSILON {
            elevation = config.turret_elevation_max;
            break;
        }
        let v2 = v * v;
        let discriminant = v2 * v2 - g * (g * d * d + 2.0 * h * v2);
        if discriminant < 0.0 {
            return None;
        }
        elevation = ((v2 - discriminant.sqrt()) / (g * d)).atan();
    }

    if elevation < config.turret_elevation_min - 1e-3 || elevation > config.turret_elevation_max {
        return None;
    }
    Some(AimSolution {
        azimuth,
        elevation: elevation.max(config.turret_elevation_min),
    })
}

/// Signed shortest angular difference `to - from`, in `[-PI, PI)`.
fn angle_delta(from: f32, to: f32) -> f32 {
    (to - from + PI).rem_euclid(TAU) - PI
}

pub struct Autopilot {
    fire_held: bool,
    /// Angular error (radians) within which the autopilot fires.
    tolerance: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            fire_held: false,
            tolerance: 0.03,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closest live enemy, else closest unhit practice target.
    pub fn pick_target(engine: &SimulationEngine) -> Option<Vec3> {
        let store = engine.store();
        let reachable = |p: &Vec3| solve(*p, engine.config()).is_some();
        let nearest = |points: Vec<Vec3>| {
            points
                .into_iter()
                .filter(|p| reachable(p))
                .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
        };

        nearest(store.enemies().into_iter().map(|(_, e)| e.position).collect()).or_else(|| {
            nearest(
                store
                    .targets()
                    .into_iter()
                    .filter(|(_, t)| !t.hit)
                    .map(|(_, t)| t.position)
                    .collect(),
            )
        })
    }

    /// Keys that move `current` toward `aim`, firing on alternate ticks once
    /// within tolerance so each shot is a fresh press.
    pub fn steer(
        &mut self,
        current: TurretOrientation,
        aim: Option<AimSolution>,
        config: &GameConfig,
    ) -> InputState {
        let Some(aim) = aim else {
            self.fire_held = false;
            return InputState {
                rotate_left: true,
                ..InputState::default()
            };
        };

        let d_az = angle_delta(current.azimuth, aim.azimuth);
        let d_el = aim.elevation - current.elevation;
        let half_az = config.turret_rotation_speed * 0.5;
        let half_el = config.turret_elevation_speed * 0.5;

        let on_target = d_az.abs() < self.tolerance && d_el.abs() < self.tolerance;
        let fire = on_target && !self.fire_held;
        self.fire_held = fire;

        InputState {
            rotate_left: d_az > half_az,
            rotate_right: d_az < -half_az,
            elevate_up: d_el > half_el,
            elevate_down: d_el < -half_el,
            fire,
        }
    }
}

impl InputDriver for Autopilot {
    fn next_input(&mut self, engine: &SimulationEngine) -> InputState {
        if !engine.session().is_running() {
            self.fire_held = false;
            return InputState::default();
        }
        let aim = Self::pick_target(engine).and_then(|target| solve(target, engine.config()));
        self.steer(engine.turret().orientation(), aim, engine.config())
    }
}
