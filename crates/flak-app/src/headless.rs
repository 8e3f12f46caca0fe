//! Headless session runner on a simulated 60Hz clock.
//!
//! Runs as fast as the CPU allows, with the autopilot on the guns and the
//! effects system fed from engine events, and reports how the session went.

use std::time::Duration;

use anyhow::{bail, Result};
use log::{debug, info};

use flak_core::commands::PlayerCommand;
use flak_core::constants::TICK_RATE;
use flak_core::enums::{GameMode, SessionPhase};
use flak_core::events::GameEvent;
use flak_core::state::StatsSnapshot;
use flak_sim::effects::EffectsSystem;
use flak_sim::{SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::game_loop::{InputDriver, TICK_DURATION};

/// What happened during a headless run.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub mode: GameMode,
    pub frames: u64,
    pub shots_fired: u32,
    pub explosions: u32,
    /// Most explosion particles alive at once.
    pub peak_particles: usize,
    pub final_stats: StatsSnapshot,
}

/// Clock reading at frame `n`.
pub fn frame_time(n: u64) -> Duration {
    Duration::from_nanos(n.saturating_mul(1_000_000_000) / u64::from(TICK_RATE))
}

/// Play one session started by `start` until it ends or `max_secs` of
/// simulated time pass, whichever comes first.
pub fn run_session(
    config: SimConfig,
    start: PlayerCommand,
    max_secs: f64,
) -> Result<SessionReport> {
    let Some(mode) = start.target_mode() else {
        bail!("{start:?} does not start a session");
    };
    if !(max_secs.is_finite() && max_secs > 0.0) {
        bail!("session length must be a positive number of seconds, got {max_secs}");
    }
    let limit = Duration::from_secs_f64(max_secs);

    let mut effects = EffectsSystem::new(config.seed.wrapping_add(1));
    let mut engine = SimulationEngine::new(config);
    let mut pilot = Autopilot::new();
    engine.queue_command(start);

    let mut report = SessionReport {
        mode,
        frames: 0,
        shots_fired: 0,
        explosions: 0,
        peak_particles: 0,
        final_stats: StatsSnapshot::default(),
    };
    let frame_secs = TICK_DURATION.as_secs_f32();

    loop {
        let now = frame_time(report.frames);
        let input = pilot.next_input(&engine);
        let stats = engine.tick(now, &input);
        report.frames += 1;

        for event in &stats.events {
            match event {
                GameEvent::ProjectileFired { .. } => report.shots_fired += 1,
                GameEvent::Explosion { .. } => report.explosions += 1,
                _ => {}
            }
        }
        effects.ingest(&stats.events);
        effects.tick(frame_secs);
        report.peak_particles = report.peak_particles.max(effects.particles().len());

        if report.frames % 60 == 0 {
            debug!(
                "t={:.0}s score {} destroyed {} live {}",
                now.as_secs_f64(),
                stats.score,
                stats.enemies_destroyed,
                stats.live_enemy_count
            );
        }

        let done = stats.phase == SessionPhase::Ended || now >= limit;
        report.final_stats = stats;
        if done {
            break;
        }
    }

    info!(
        "{:?} session finished after {} frames: score {}, {} shots",
        mode, report.frames, report.final_stats.score, report.shots_fired
    );
    Ok(report)
}
