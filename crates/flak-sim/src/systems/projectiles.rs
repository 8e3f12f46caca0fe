//! Projectile/physics bridge.
//!
//! `fire` hands a new sphere to the physics collaborator; `run` copies body
//! positions back every tick and retires projectiles that outlived their
//! lifetime or hit the ground. Projectile kinematics are never integrated
//! here, the physics world is the only authority.

use std::time::Duration;

use glam::Vec3;
use log::debug;

use flak_core::components::Projectile;
use flak_core::enums::{ExplosionCause, VisualKind};
use flak_core::events::GameEvent;
use flak_core::types::{EntityId, Transform};

use crate::config::GameConfig;
use crate::physics::PhysicsWorld;
use crate::render::RenderSink;
use crate::store::EntityStore;

/// Counts from one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectileSweep {
    pub expired: usize,
    pub grounded: usize,
}

/// Create a physics-backed projectile at `origin` moving along `direction`.
#[allow(clippy::too_many_arguments)]
pub fn fire(
    store: &mut EntityStore,
    physics: &mut impl PhysicsWorld,
    renderer: &mut impl RenderSink,
    origin: Vec3,
    direction: Vec3,
    speed: f32,
    now: Duration,
    config: &GameConfig,
) -> (EntityId, Projectile) {
    let direction = direction.normalize_or_zero();
    let body = physics.create_body(origin, direction * speed, config.projectile_radius);
    let projectile = Projectile {
        position: origin,
        body,
        created_at: now,
        lifetime: config.projectile_lifetime(),
    };
    let id = store.insert_projectile(projectile);
    renderer.add_visual(
        id,
        VisualKind::Projectile,
        Transform::new(origin, config.projectile_radius),
    );
    (id, projectile)
}

#[derive(Clone, Copy)]
enum Retire {
    Expired,
    Grounded,
}

/// Sync positions from physics, then retire expired and grounded projectiles.
///
/// Lifetime is checked first: an expired projectile is removed silently even
/// if it is also below ground. A body the physics world no longer knows is
/// treated as expired.
pub fn run(
    store: &mut EntityStore,
    physics: &mut impl PhysicsWorld,
    renderer: &mut impl RenderSink,
    now: Duration,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) -> ProjectileSweep {
    let mut retiring: Vec<(EntityId, Retire)> = Vec::new();

    {
        let physics = &*physics;
        store.for_each_projectile_mut(|id, projectile| {
            let Some(position) = physics.body_position(projectile.body) else {
                retiring.push((id, Retire::Expired));
                return;
            };
            projectile.position = position;

            if now.saturating_sub(projectile.created_at) > projectile.lifetime {
                retiring.push((id, Retire::Expired));
            } else if position.y < 0.0 {
                retiring.push((id, Retire::Grounded));
            } else {
                renderer.sync_transform(id, Transform::new(position, config.projectile_radius));
            }
        });
    }

    let mut sweep = ProjectileSweep::default();
    for (id, reason) in retiring {
        let Some(projectile) = store.remove_projectile(id) else {
            continue;
        };
        physics.remove_body(projectile.body);
        renderer.remove_visual(id);
        match reason {
            Retire::Expired => {
                sweep.expired += 1;
                debug!("projectile {id:?} expired");
            }
            Retire::Grounded => {
                sweep.grounded += 1;
                events.push(GameEvent::Explosion {
                    position: projectile.position,
                    cause: ExplosionCause::GroundImpact,
                });
                debug!("projectile {id:?} hit the ground at {:?}", projectile.position);
            }
        }
    }
    sweep
}
