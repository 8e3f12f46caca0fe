//! Spawn controller: opening burst plus difficulty-driven auto-spawn.

use std::collections::VecDeque;
use std::time::Duration;

use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use flak_core::enums::GameMode;
use flak_core::events::GameEvent;
use flak_core::types::EntityId;

use crate::config::GameConfig;
use crate::difficulty::DifficultyProfile;
use crate::render::RenderSink;
use crate::store::EntityStore;
use crate::world_setup;

/// Per-session spawn bookkeeping. Replaced wholesale on every mode start,
/// which also cancels any burst entries still pending from the last session.
#[derive(Debug, Clone, Default)]
pub struct SpawnSchedule {
    profile: Option<DifficultyProfile>,
    last_spawn: Duration,
    /// Due times of burst spawns not yet placed, earliest first.
    burst: VecDeque<Duration>,
}

impl SpawnSchedule {
    /// Schedule for a session in `mode` starting at `now`.
    ///
    /// Timed modes get their difficulty profile and a burst of
    /// `min_count..=max_count` enemies staggered from `now`. Practice gets
    /// neither, which disables spawning entirely.
    pub fn for_session(
        mode: GameMode,
        now: Duration,
        config: &GameConfig,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let burst = match config.burst_for(mode) {
            Some(burst) => {
                let count = rng.gen_range(burst.min_count..=burst.max_count);
                let stagger = Duration::from_millis(burst.stagger_ms);
                (0..count).map(|i| now + stagger * i).collect()
            }
            None => VecDeque::new(),
        };
        Self {
            profile: config.profile_for(mode),
            last_spawn: now,
            burst,
        }
    }

    pub fn profile(&self) -> Option<DifficultyProfile> {
        self.profile
    }

    pub fn last_spawn(&self) -> Duration {
        self.last_spawn
    }

    pub fn pending_burst(&self) -> usize {
        self.burst.len()
    }
}

/// Place every burst enemy that has come due, as long as the cap allows.
/// Entries blocked by the cap stay queued for a later tick.
#[allow(clippy::too_many_arguments)]
pub fn run_burst(
    store: &mut EntityStore,
    renderer: &mut impl RenderSink,
    rng: &mut ChaCha8Rng,
    schedule: &mut SpawnSchedule,
    now: Duration,
    progress: f64,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) -> usize {
    let Some(profile) = schedule.profile else {
        return 0;
    };
    let cap = profile.current_max_enemies(progress);

    let mut spawned = 0;
    while let Some(&due) = schedule.burst.front() {
        if due > now || store.enemy_count() >= cap {
            break;
        }
        schedule.burst.pop_front();
        let (id, enemy) = world_setup::spawn_enemy(store, renderer, rng, config);
        events.push(GameEvent::EnemySpawned {
            id,
            position: enemy.position,
        });
        spawned += 1;
    }
    spawned
}

/// Auto-spawn at most one enemy.
///
/// Fires when the time since the last auto-spawn exceeds the current
/// interval AND the live enemy count is below the current cap.
#[allow(clippy::too_many_arguments)]
pub fn maybe_spawn(
    store: &mut EntityStore,
    renderer: &mut impl RenderSink,
    rng: &mut ChaCha8Rng,
    schedule: &mut SpawnSchedule,
    now: Duration,
    progress: f64,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) -> Option<EntityId> {
    let profile = schedule.profile?;
    let interval = profile.current_spawn_interval(progress);
    let cap = profile.current_max_enemies(progress);

    let since_last = now.saturating_sub(schedule.last_spawn);
    if since_last <= interval || store.enemy_count() >= cap {
        return None;
    }

    let (id, enemy) = world_setup::spawn_enemy(store, renderer, rng, config);
    schedule.last_spawn = now;
    events.push(GameEvent::EnemySpawned {
        id,
        position: enemy.position,
    });
    debug!(
        "auto-spawn at progress {progress:.2}: interval {interval:?}, cap {cap}, live {}",
        store.enemy_count()
    );
    Some(id)
}
