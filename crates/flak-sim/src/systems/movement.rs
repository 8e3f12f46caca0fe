//! Enemy drift integration and out-of-bounds culling.
//!
//! Enemy velocities are expressed per 60 Hz frame, so the step is scaled by
//! `frame_delta * 60`: position += velocity * frame_delta * 60.

use log::debug;

use flak_core::constants::{DRIFT_FRAME_RATE, MAX_FRAME_DELTA_SECS};
use flak_core::types::{EntityId, Transform};

use crate::config::GameConfig;
use crate::render::RenderSink;
use crate::store::EntityStore;

/// Frame scale for a wall-clock frame delta, clamped to `[0, MAX_FRAME_DELTA_SECS]`.
pub fn frame_scale(frame_delta_secs: f32) -> f32 {
    let delta = if frame_delta_secs.is_finite() {
        frame_delta_secs.clamp(0.0, MAX_FRAME_DELTA_SECS)
    } else {
        0.0
    };
    delta * DRIFT_FRAME_RATE
}

/// Drift every enemy, then remove those that left the play volume.
/// Returns the number culled.
pub fn run(
    store: &mut EntityStore,
    renderer: &mut impl RenderSink,
    frame_delta_secs: f32,
    config: &GameConfig,
    cull_buffer: &mut Vec<EntityId>,
) -> usize {
    cull_buffer.clear();
    let scale = frame_scale(frame_delta_secs);

    store.for_each_enemy_mut(|id, enemy| {
        enemy.position += enemy.velocity * scale;
        if config.in_bounds(enemy.position) {
            renderer.sync_transform(id, Transform::new(enemy.position, enemy.radius));
        } else {
            cull_buffer.push(id);
        }
    });

    let mut culled = 0;
    for id in cull_buffer.drain(..) {
        if store.remove_enemy(id).is_some() {
            renderer.remove_visual(id);
            culled += 1;
            debug!("enemy {id:?} left the play volume");
        }
    }
    culled
}
