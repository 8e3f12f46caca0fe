//! Snapshot system: reads the store and session and builds a StatsSnapshot.
//!
//! This system is read-only. It never modifies the store.

use flak_core::events::GameEvent;
use flak_core::state::StatsSnapshot;

use crate::config::GameConfig;
use crate::session::SessionState;
use crate::store::EntityStore;
use crate::turret::Turret;

/// Build the observable stats for the tick that just ran.
pub fn build_snapshot(
    tick: u64,
    store: &EntityStore,
    session: &SessionState,
    turret: &Turret,
    config: &GameConfig,
    events: Vec<GameEvent>,
) -> StatsSnapshot {
    StatsSnapshot {
        tick,
        mode: session.mode(),
        phase: session.phase(),
        score: session.score(),
        time_remaining_secs: session
            .time_remaining(config.session_duration())
            .as_secs_f64(),
        enemies_destroyed: session.enemies_destroyed(),
        live_enemy_count: saturating_u32(store.enemy_count()),
        live_projectile_count: saturating_u32(store.projectile_count()),
        targets_hit: saturating_u32(store.targets_hit()),
        targets_total: saturating_u32(store.target_count()),
        turret: turret.orientation(),
        rank: session.rank(),
        events,
    }
}

fn saturating_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use flak_core::enums::{GameMode, SessionPhase};

    use super::*;
    use crate::render::NullRenderer;
    use crate::world_setup;

    #[test]
    fn test_idle_snapshot_is_empty() {
        let config = GameConfig::default();
        let snap = build_snapshot(
            3,
            &EntityStore::new(),
            &SessionState::idle(),
            &Turret::initial(&config),
            &config,
            Vec::new(),
        );
        assert_eq!(snap.tick, 3);
        assert_eq!(snap.phase, SessionPhase::Idle);
        assert_eq!(snap.time_remaining_secs, 0.0);
        assert_eq!(snap.live_enemy_count, 0);
        assert!(snap.rank.is_none());
    }

    #[test]
    fn test_timed_snapshot_counts_down() {
        let config = GameConfig::default();
        let mut session = SessionState::start(GameMode::Normal, Duration::from_secs(5));
        session.update_elapsed(Duration::from_millis(20_500));
        let snap = build_snapshot(
            0,
            &EntityStore::new(),
            &session,
            &Turret::initial(&config),
            &config,
            Vec::new(),
        );
        assert!((snap.time_remaining_secs - 44.5).abs() < 1e-9);
        assert_eq!(snap.mode, GameMode::Normal);
    }

    #[test]
    fn test_practice_snapshot_counts_targets() {
        let config = GameConfig::default();
        let mut store = EntityStore::new();
        let ids = world_setup::spawn_practice_targets(&mut store, &mut NullRenderer, &config);
        store.mark_target_hit(ids[2]);

        let snap = build_snapshot(
            0,
            &store,
            &SessionState::start(GameMode::Practice, Duration::ZERO),
            &Turret::initial(&config),
            &config,
            Vec::new(),
        );
        assert_eq!(snap.targets_total, 8);
        assert_eq!(snap.targets_hit, 1);
        assert_eq!(snap.time_remaining_secs, 0.0);
    }
}
