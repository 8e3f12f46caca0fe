//! Tests for the simulation engine: session lifecycle, firing, collisions
//! and collaborator bookkeeping, all driven through `tick`.

use std::time::Duration;

use approx::assert_relative_eq;
use glam::Vec3;

use flak_core::commands::PlayerCommand;
use flak_core::enums::*;
use flak_core::events::GameEvent;
use flak_core::state::StatsSnapshot;
use flak_core::types::{InputState, TurretOrientation};

use crate::config::{GameConfig, SimConfig};
use crate::engine::SimulationEngine;
use crate::physics::{BallisticWorld, PhysicsWorld};
use crate::render::RecordingRenderer;

/// Clock reading of 60 Hz frame `n`.
fn frame(n: u64) -> Duration {
    Duration::from_micros(n * 1_000_000 / 60)
}

fn idle() -> InputState {
    InputState::default()
}

/// Config whose turret starts level, so shots leave along +X.
fn level_config() -> SimConfig {
    SimConfig {
        game: GameConfig {
            turret_initial_elevation: 0.0,
            ..GameConfig::default()
        },
        ..SimConfig::default()
    }
}

fn recording_engine(config: SimConfig) -> SimulationEngine<BallisticWorld, RecordingRenderer> {
    let physics = BallisticWorld::new(config.game.gravity_vector());
    SimulationEngine::with_backends(config, physics, RecordingRenderer::new())
}

fn count_events(snap: &StatsSnapshot, pred: impl Fn(&GameEvent) -> bool) -> usize {
    snap.events.iter().filter(|e| pred(e)).count()
}

// ---- Determinism ----

/// Scripted input: sweep the turret and tap fire every 15 frames.
fn scripted_input(n: u64) -> InputState {
    InputState {
        rotate_left: (n / 120) % 2 == 0,
        rotate_right: (n / 120) % 2 == 1,
        elevate_up: n % 300 < 40,
        elevate_down: false,
        fire: n % 15 == 0,
    }
}

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartIntensified);
    engine_b.queue_command(PlayerCommand::StartIntensified);

    for n in 0..900 {
        let snap_a = engine_a.tick(frame(n), &scripted_input(n));
        let snap_b = engine_b.tick(frame(n), &scripted_input(n));

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartNormal);
    engine_b.queue_command(PlayerCommand::StartNormal);

    // The first burst enemy is placed on the start tick at a seeded spot.
    let snap_a = engine_a.tick(frame(0), &idle());
    let snap_b = engine_b.tick(frame(0), &idle());
    assert_ne!(
        serde_json::to_string(&snap_a).unwrap(),
        serde_json::to_string(&snap_b).unwrap(),
        "Different seeds should produce divergent output"
    );
}

// ---- Session lifecycle ----

#[test]
fn test_idle_engine_does_nothing() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    for n in 0..120 {
        let snap = engine.tick(frame(n), &InputState::firing());
        assert_eq!(snap.phase, SessionPhase::Idle);
        assert_eq!(snap.live_enemy_count, 0);
        assert_eq!(snap.live_projectile_count, 0);
        assert_eq!(snap.tick, n + 1);
    }
    assert_eq!(engine.physics().body_count(), 0);
}

#[test]
fn test_timed_session_ends_exactly_once_at_sixty_seconds() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartNormal);
    let started = engine.tick(frame(0), &idle());
    assert_eq!(started.phase, SessionPhase::Playing);
    assert_eq!(started.mode, GameMode::Normal);
    assert_eq!(
        count_events(&started, |e| matches!(e, GameEvent::SessionStarted { .. })),
        1
    );

    let mut ended_at = Vec::new();
    for n in 1..=3700 {
        let snap = engine.tick(frame(n), &idle());
        let ends = count_events(&snap, |e| matches!(e, GameEvent::SessionEnded { .. }));
        if ends > 0 {
            ended_at.push(n);
        }
        if n < 3600 {
            assert_eq!(snap.phase, SessionPhase::Playing, "ended early at frame {n}");
            assert!(snap.time_remaining_secs > 0.0);
        }
    }

    assert_eq!(ended_at, vec![3600]);
    assert_eq!(engine.phase(), SessionPhase::Ended);
    let snap = engine.tick(frame(3701), &idle());
    assert_eq!(snap.time_remaining_secs, 0.0);
    assert_eq!(
        snap.rank,
        Some(ResultRank::from_destroyed(snap.enemies_destroyed))
    );
}

#[test]
fn test_ended_session_is_frozen() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartNormal);
    for n in 0..=3600 {
        engine.tick(frame(n), &idle());
    }
    assert_eq!(engine.phase(), SessionPhase::Ended);

    let enemies: Vec<_> = engine.store().enemies();
    for n in 3601..3700 {
        let snap = engine.tick(frame(n), &scripted_input(n));
        assert!(snap.events.is_empty());
        assert_eq!(snap.live_projectile_count, 0);
    }
    assert_eq!(engine.store().enemies(), enemies);
}

#[test]
fn test_practice_never_ends_or_spawns() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartPractice);

    for n in 0..6000 {
        let snap = engine.tick(frame(n), &idle());
        assert_eq!(snap.phase, SessionPhase::Playing);
        assert_eq!(snap.live_enemy_count, 0);
        assert_eq!(snap.targets_total, 8);
        assert_eq!(snap.time_remaining_secs, 0.0);
    }
}

#[test]
fn test_exit_releases_everything() {
    let mut engine = recording_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::StartIntensified);
    for n in 0..240 {
        engine.tick(frame(n), &scripted_input(n));
    }
    assert!(engine.store().enemy_count() > 0);
    assert!(engine.physics().body_count() > 0);

    engine.queue_command(PlayerCommand::Exit);
    let snap = engine.tick(frame(240), &idle());

    assert_eq!(snap.phase, SessionPhase::Idle);
    assert_eq!(snap.mode, GameMode::Idle);
    assert_eq!(snap.score, 0);
    assert!(engine.store().is_empty());
    assert_eq!(engine.physics().body_count(), 0);
    assert_eq!(engine.renderer().live_count(), 0);
    assert_eq!(engine.renderer().stray_calls, 0);
    assert_eq!(snap.events, vec![GameEvent::SessionExited]);
}

#[test]
fn test_exit_cancels_pending_burst() {
    let mut engine = recording_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::StartIntensified);
    for n in 0..30 {
        engine.tick(frame(n), &idle());
    }
    assert!(engine.schedule().pending_burst() > 0);

    engine.queue_command(PlayerCommand::Exit);
    engine.tick(frame(30), &idle());
    assert_eq!(engine.schedule().pending_burst(), 0);

    for n in 31..400 {
        let snap = engine.tick(frame(n), &idle());
        assert_eq!(snap.live_enemy_count, 0, "enemy appeared at frame {n}");
        assert!(snap.events.is_empty());
    }
    assert_eq!(engine.renderer().live_count(), 0);
}

#[test]
fn test_exit_while_idle_is_ignored() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::Exit);
    let snap = engine.tick(frame(0), &idle());
    assert!(snap.events.is_empty());
    assert_eq!(snap.phase, SessionPhase::Idle);
}

#[test]
fn test_commands_apply_in_queue_order() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([PlayerCommand::StartNormal, PlayerCommand::Exit]);
    let snap = engine.tick(frame(0), &idle());

    assert_eq!(snap.phase, SessionPhase::Idle);
    assert!(matches!(
        snap.events.as_slice(),
        [
            GameEvent::SessionStarted {
                mode: GameMode::Normal
            },
            GameEvent::SessionExited
        ]
    ));
}

#[test]
fn test_restart_resets_session_and_turret() {
    let mut engine = SimulationEngine::new(level_config());
    engine.queue_command(PlayerCommand::StartNormal);
    let turn_left = InputState {
        rotate_left: true,
        ..idle()
    };
    for n in 0..300 {
        engine.tick(frame(n), &turn_left);
    }
    engine.tick(frame(300), &InputState::firing());
    assert_ne!(engine.turret().orientation().azimuth, 0.0);
    assert_eq!(engine.store().projectile_count(), 1);

    engine.queue_command(PlayerCommand::StartIntensified);
    let snap = engine.tick(frame(301), &idle());

    assert_eq!(snap.mode, GameMode::Intensified);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.enemies_destroyed, 0);
    assert_relative_eq!(snap.time_remaining_secs, 60.0);
    assert_eq!(snap.turret, TurretOrientation::new(0.0, 0.0));
    assert_eq!(snap.live_projectile_count, 0);
    assert_eq!(engine.physics().body_count(), 0);
    // Only the first burst entry of the new session is due yet.
    assert_eq!(snap.live_enemy_count, 1);
    assert!((14..=17).contains(&engine.schedule().pending_burst()));
}

#[test]
fn test_start_after_ended_begins_fresh_session() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartNormal);
    for n in 0..=3600 {
        engine.tick(frame(n), &scripted_input(n));
    }
    assert_eq!(engine.phase(), SessionPhase::Ended);

    engine.queue_command(PlayerCommand::StartNormal);
    let snap = engine.tick(frame(3601), &idle());

    assert_eq!(snap.phase, SessionPhase::Playing);
    assert_eq!(snap.mode, GameMode::Normal);
    assert_eq!(snap.rank, None);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.enemies_destroyed, 0);
    assert_relative_eq!(snap.time_remaining_secs, 60.0);
    assert_eq!(snap.live_projectile_count, 0);
    assert_eq!(snap.live_enemy_count, 1);
    assert_eq!(
        snap.events.first(),
        Some(&GameEvent::SessionStarted {
            mode: GameMode::Normal
        })
    );
    assert_eq!(
        count_events(&snap, |e| matches!(e, GameEvent::SessionEnded { .. })),
        0
    );
}

#[test]
fn test_clock_skew_clamps_elapsed() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartNormal);
    engine.tick(Duration::from_secs(10), &idle());

    let snap = engine.tick(Duration::from_secs(5), &idle());
    assert_eq!(snap.phase, SessionPhase::Playing);
    assert_relative_eq!(snap.time_remaining_secs, 60.0);
}

// ---- Firing ----

#[test]
fn test_level_shot_leaves_muzzle_along_x() {
    let mut engine = SimulationEngine::new(level_config());
    engine.queue_command(PlayerCommand::StartPractice);
    engine.tick(frame(0), &idle());

    let snap = engine.tick(frame(1), &InputState::firing());
    let fired: Vec<_> = snap
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::ProjectileFired {
                origin, direction, ..
            } => Some((*origin, *direction)),
            _ => None,
        })
        .collect();
    assert_eq!(fired.len(), 1);
    let (origin, direction) = fired[0];
    assert_relative_eq!(origin.x, 2.0, epsilon = 1e-5);
    assert_relative_eq!(origin.y, 1.8, epsilon = 1e-5);
    assert_relative_eq!(origin.z, 0.0, epsilon = 1e-5);
    assert_relative_eq!(direction.x, 1.0, epsilon = 1e-6);
    assert_eq!(
        count_events(&snap, |e| matches!(e, GameEvent::MuzzleFlash { .. })),
        1
    );
    assert_eq!(snap.live_projectile_count, 1);
    assert_eq!(engine.physics().body_count(), 1);

    // Next tick: moved downrange and started to drop.
    engine.tick(frame(2), &idle());
    let (_, projectile) = engine.store().projectiles()[0];
    assert!(projectile.position.x > origin.x);
    assert!(projectile.position.y < origin.y);
}

#[test]
fn test_fire_is_edge_triggered() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartPractice);
    engine.tick(frame(0), &idle());

    // Held for ten frames: one shot.
    for n in 1..=10 {
        engine.tick(frame(n), &InputState::firing());
    }
    assert_eq!(engine.store().projectile_count(), 1);

    // Release and press again: a second shot.
    engine.tick(frame(11), &idle());
    engine.tick(frame(12), &InputState::firing());
    assert_eq!(engine.store().projectile_count(), 2);
}

#[test]
fn test_level_shot_lands_and_releases_body() {
    let mut engine = SimulationEngine::new(level_config());
    engine.queue_command(PlayerCommand::StartPractice);
    engine.tick(frame(0), &idle());
    engine.tick(frame(1), &InputState::firing());

    let mut landed = 0;
    for n in 2..400 {
        let snap = engine.tick(frame(n), &idle());
        landed += count_events(&snap, |e| {
            matches!(
                e,
                GameEvent::Explosion {
                    cause: ExplosionCause::GroundImpact,
                    ..
                }
            )
        });
    }
    assert_eq!(landed, 1);
    assert_eq!(engine.store().projectile_count(), 0);
    assert_eq!(engine.physics().body_count(), 0);
}

// ---- Collisions through the engine ----

#[test]
fn test_shot_destroys_enemy_in_its_path() {
    let mut engine = recording_engine(level_config());
    engine.queue_command(PlayerCommand::StartPractice);
    engine.tick(frame(0), &idle());
    let enemy = engine.spawn_test_enemy(Vec3::new(6.0, 1.8, 0.0));

    engine.tick(frame(1), &InputState::firing());
    let mut destroyed_at = None;
    for n in 2..20 {
        let snap = engine.tick(frame(n), &idle());
        if count_events(&snap, |e| matches!(e, GameEvent::EnemyDestroyed { .. })) > 0 {
            destroyed_at = Some(n);
            assert_eq!(snap.score, 100);
            assert_eq!(snap.enemies_destroyed, 1);
            break;
        }
    }

    assert!(destroyed_at.is_some(), "shot should reach the enemy");
    assert!(engine.store().enemy(enemy).is_none());
    assert_eq!(engine.store().projectile_count(), 0);
    assert_eq!(engine.physics().body_count(), 0);
    assert_eq!(engine.renderer().stray_calls, 0);
    // Only the eight practice targets remain visible.
    assert_eq!(engine.renderer().live_count(), 8);
}

#[test]
fn test_practice_target_scores_once() {
    // At the default elevation the arc passes through target 0 at (30, 10, 0).
    let mut engine = recording_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::StartPractice);
    engine.tick(frame(0), &idle());
    let mut n = 1;

    let mut hits = 0;
    let mut score = 0;
    for shot in 0..3 {
        engine.tick(frame(n), &InputState::firing());
        n += 1;
        for _ in 0..120 {
            let snap = engine.tick(frame(n), &idle());
            n += 1;
            hits += count_events(&snap, |e| matches!(e, GameEvent::TargetHit { .. }));
            score = snap.score;
        }
        assert!(hits <= 1, "target scored again on shot {shot}");
    }

    assert_eq!(hits, 1);
    assert_eq!(score, 50);
    let (target_id, target) = engine.store().targets()[0];
    assert!(target.hit);
    assert_eq!(
        engine.renderer().visual(target_id).unwrap().tint,
        Some(Tint::Hit)
    );
    assert_eq!(engine.store().target_count(), 8);
}

// ---- Collaborator bookkeeping ----

#[test]
fn test_visuals_track_entities_one_to_one() {
    let mut engine = recording_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::StartIntensified);

    for n in 0..1800 {
        let snap = engine.tick(frame(n), &scripted_input(n));
        assert_eq!(engine.renderer().live_count(), engine.store().len());
        assert_eq!(
            engine.physics().body_count(),
            snap.live_projectile_count as usize
        );
    }
    assert_eq!(engine.renderer().stray_calls, 0);

    engine.queue_command(PlayerCommand::StartPractice);
    engine.tick(frame(1800), &idle());
    assert_eq!(engine.renderer().live_count(), 8);
    assert_eq!(engine.renderer().stray_calls, 0);
}

#[test]
fn test_population_never_exceeds_cap() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 9,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartIntensified);
    let profile = engine.config().intensified;
    let total = engine.config().session_duration();

    for n in 0..3600 {
        let snap = engine.tick(frame(n), &idle());
        let progress = crate::difficulty::progress(frame(n), total);
        assert!(
            snap.live_enemy_count as usize <= profile.current_max_enemies(progress),
            "population {} over cap at frame {n}",
            snap.live_enemy_count
        );
    }
}
