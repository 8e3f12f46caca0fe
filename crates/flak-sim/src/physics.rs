//! Physics collaborator seam and the built-in ballistic world.
//!
//! The simulation never integrates projectile kinematics itself. It asks a
//! [`PhysicsWorld`] to create spherical bodies, steps it by a fixed delta once
//! per tick, and reads positions back. [`BallisticWorld`] is a minimal
//! implementation (free spheres under constant gravity) used headless and in
//! tests; a host may plug in a full engine instead.

use std::collections::BTreeMap;

use glam::Vec3;

use flak_core::types::BodyHandle;

pub trait PhysicsWorld {
    /// Add a sphere at `position` moving with `velocity`.
    fn create_body(&mut self, position: Vec3, velocity: Vec3, radius: f32) -> BodyHandle;

    /// Release a body. Returns `false` if the handle was unknown.
    fn remove_body(&mut self, handle: BodyHandle) -> bool;

    /// Advance every body by `fixed_delta` seconds.
    fn step_simulation(&mut self, fixed_delta: f32);

    /// Current position of a body, `None` once it has been removed.
    fn body_position(&self, handle: BodyHandle) -> Option<Vec3>;

    /// Number of live bodies.
    fn body_count(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Body {
    position: Vec3,
    velocity: Vec3,
    radius: f32,
}

/// Spheres under uniform gravity, integrated with semi-implicit Euler.
#[derive(Debug, Clone)]
pub struct BallisticWorld {
    gravity: Vec3,
    bodies: BTreeMap<BodyHandle, Body>,
    next_handle: u32,
}

impl BallisticWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            bodies: BTreeMap::new(),
            next_handle: 0,
        }
    }

    pub fn body_velocity(&self, handle: BodyHandle) -> Option<Vec3> {
        self.bodies.get(&handle).map(|body| body.velocity)
    }

    pub fn body_radius(&self, handle: BodyHandle) -> Option<f32> {
        self.bodies.get(&handle).map(|body| body.radius)
    }
}

impl Default for BallisticWorld {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, flak_core::constants::GRAVITY, 0.0))
    }
}

impl PhysicsWorld for BallisticWorld {
    fn create_body(&mut self, position: Vec3, velocity: Vec3, radius: f32) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        self.bodies.insert(
            handle,
            Body {
                position,
                velocity,
                radius,
            },
        );
        handle
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        self.bodies.remove(&handle).is_some()
    }

    fn step_simulation(&mut self, fixed_delta: f32) {
        for body in self.bodies.values_mut() {
            body.velocity += self.gravity * fixed_delta;
            body.position += body.velocity * fixed_delta;
        }
    }

    fn body_position(&self, handle: BodyHandle) -> Option<Vec3> {
        self.bodies.get(&handle).map(|body| body.position)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
