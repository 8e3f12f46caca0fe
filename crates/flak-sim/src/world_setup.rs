//! Entity spawn factories and world teardown.
//!
//! Every factory inserts into the store and registers the visual proxy in
//! the same call, so the store and the renderer never disagree.

use glam::Vec3;
use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use flak_core::components::{Enemy, Target};
use flak_core::constants::TARGET_POSITIONS;
use flak_core::enums::{TargetVariant, VisualKind};
use flak_core::types::{EntityId, Transform};

use crate::config::GameConfig;
use crate::physics::PhysicsWorld;
use crate::render::RenderSink;
use crate::store::EntityStore;

/// Random spawn placement: polar around the origin with slow random drift.
pub fn random_enemy(rng: &mut ChaCha8Rng, config: &GameConfig) -> Enemy {
    let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let distance: f32 = rng.gen_range(config.spawn_distance_min..config.spawn_distance_max);
    let height: f32 = rng.gen_range(config.spawn_height_min..config.spawn_height_max);

    let position = Vec3::new(angle.cos() * distance, height, angle.sin() * distance);

    let velocity = Vec3::new(
        (rng.gen::<f32>() - 0.5) * config.enemy_base_speed,
        (rng.gen::<f32>() - 0.5) * config.enemy_vertical_speed,
        (rng.gen::<f32>() - 0.5) * config.enemy_base_speed,
    );

    Enemy {
        position,
        velocity,
        radius: config.enemy_radius,
        hp: config.enemy_hp,
    }
}

/// Spawn one enemy at a random placement.
pub fn spawn_enemy(
    store: &mut EntityStore,
    renderer: &mut impl RenderSink,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
) -> (EntityId, Enemy) {
    let enemy = random_enemy(rng, config);
    let id = insert_enemy(store, renderer, enemy);
    (id, enemy)
}

/// Insert a fully specified enemy and register its visual.
pub fn insert_enemy(
    store: &mut EntityStore,
    renderer: &mut impl RenderSink,
    enemy: Enemy,
) -> EntityId {
    let id = store.insert_enemy(enemy);
    renderer.add_visual(
        id,
        VisualKind::Enemy,
        Transform::new(enemy.position, enemy.radius),
    );
    debug!("enemy {:?} spawned at {:?}", id, enemy.position);
    id
}

/// Place the fixed practice target batch.
pub fn spawn_practice_targets(
    store: &mut EntityStore,
    renderer: &mut impl RenderSink,
    config: &GameConfig,
) -> Vec<EntityId> {
    TARGET_POSITIONS
        .iter()
        .enumerate()
        .map(|(index, &[x, y, z])| {
            let variant = TargetVariant::for_index(index);
            let target = Target {
                position: Vec3::new(x, y, z),
                radius: config.target_radius,
                hit: false,
                variant,
            };
            let id = store.insert_target(target);
            renderer.add_visual(
                id,
                VisualKind::Target(variant),
                Transform::new(target.position, target.radius),
            );
            id
        })
        .collect()
}

/// Remove every entity: physics bodies first, then visuals, then the store.
pub fn clear_world(
    store: &mut EntityStore,
    physics: &mut impl PhysicsWorld,
    renderer: &mut impl RenderSink,
) {
    for (id, projectile) in store.projectiles() {
        physics.remove_body(projectile.body);
        renderer.remove_visual(id);
    }
    for (id, _enemy) in store.enemies() {
        renderer.remove_visual(id);
    }
    for (id, _target) in store.targets() {
        renderer.remove_visual(id);
    }
    store.clear();
}
