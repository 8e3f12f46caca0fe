//! Collision resolver: projectile vs enemy, and projectile vs practice target.
//!
//! Works on a snapshot of positions taken at the start of the pass. Hits
//! only mark entities as consumed; despawns happen once the pass is done,
//! so nothing is skipped or tested twice.

use log::debug;

use flak_core::enums::{ExplosionCause, Tint};
use flak_core::events::GameEvent;
use flak_core::types::EntityId;

use crate::config::GameConfig;
use crate::physics::PhysicsWorld;
use crate::render::RenderSink;
use crate::session::SessionState;
use crate::store::EntityStore;

/// Outcome of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub enemies_destroyed: usize,
    pub targets_hit: usize,
}

/// Strict sum-of-radii sphere test.
pub fn spheres_overlap(a: glam::Vec3, a_radius: f32, b: glam::Vec3, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Resolve every projectile against live enemies, then (when `with_targets`)
/// every surviving projectile against unhit practice targets.
///
/// A projectile resolves at most one collision per pass. Enemies and
/// projectiles are iterated in id order, so the earliest-spawned enemy wins.
#[allow(clippy::too_many_arguments)]
pub fn run(
    store: &mut EntityStore,
    physics: &mut impl PhysicsWorld,
    renderer: &mut impl RenderSink,
    session: &mut SessionState,
    with_targets: bool,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<EntityId>,
) -> CollisionReport {
    despawn_buffer.clear();
    let projectiles = store.projectiles();
    if projectiles.is_empty() {
        return CollisionReport::default();
    }
    let mut enemies = store.enemies();
    let mut enemy_gone = vec![false; enemies.len()];
    let mut enemy_wounded = vec![false; enemies.len()];
    let mut targets = if with_targets {
        store.targets()
    } else {
        Vec::new()
    };

    let mut report = CollisionReport::default();

    for &(projectile_id, projectile) in &projectiles {
        let enemy_hit = enemies
            .iter_mut()
            .enumerate()
            .filter(|(index, _)| !enemy_gone[*index])
            .find(|(_, (_, enemy))| {
                spheres_overlap(
                    projectile.position,
                    config.projectile_radius,
                    enemy.position,
                    enemy.radius,
                )
            });

        if let Some((index, (enemy_id, enemy))) = enemy_hit {
            despawn_buffer.push(projectile_id);
            enemy.hp = enemy.hp.saturating_sub(1);
            if enemy.hp > 0 {
                enemy_wounded[index] = true;
                continue;
            }
            enemy_gone[index] = true;
            session.record_enemy_kill(config.enemy_score);
            report.enemies_destroyed += 1;
            events.push(GameEvent::Explosion {
                position: enemy.position,
                cause: ExplosionCause::EnemyDestroyed,
            });
            events.push(GameEvent::EnemyDestroyed {
                enemy: *enemy_id,
                projectile: projectile_id,
                score: config.enemy_score,
            });
            debug!("projectile {projectile_id:?} destroyed enemy {enemy_id:?}");
            continue;
        }

        let target_hit = targets.iter_mut().find(|(_, target)| {
            !target.hit
                && spheres_overlap(
                    projectile.position,
                    config.projectile_radius,
                    target.position,
                    target.radius,
                )
        });

        if let Some((target_id, target)) = target_hit {
            target.hit = true;
            if !store.mark_target_hit(*target_id) {
                continue;
            }
            despawn_buffer.push(projectile_id);
            renderer.set_visual_state(*target_id, Tint::Hit);
            session.record_target_hit(config.target_score);
            report.targets_hit += 1;
            events.push(GameEvent::Explosion {
                position: target.position,
                cause: ExplosionCause::TargetHit,
            });
            events.push(GameEvent::TargetHit {
                target: *target_id,
                projectile: projectile_id,
                score: config.target_score,
            });
            debug!("projectile {projectile_id:?} hit target {target_id:?}");
        }
    }

    // Compact: wounded enemies get their hp written back, consumed entities go.
    for (index, (enemy_id, enemy)) in enemies.iter().enumerate() {
        if enemy_gone[index] {
            if store.remove_enemy(*enemy_id).is_some() {
                renderer.remove_visual(*enemy_id);
            }
        } else if enemy_wounded[index] {
            let current_hp = enemy.hp;
            store.for_each_enemy_mut(|id, live| {
                if id == *enemy_id {
                    live.hp = current_hp;
                }
            });
        }
    }
    for id in despawn_buffer.drain(..) {
        if let Some(projectile) = store.remove_projectile(id) {
            physics.remove_body(projectile.body);
            renderer.remove_visual(id);
        }
    }

    report
}
